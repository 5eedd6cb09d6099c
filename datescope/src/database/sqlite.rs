use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;

use super::Database;
use crate::builder::Statement;

#[derive(Clone, Debug)]
pub struct Sqlite;

impl Database for Sqlite {
    const NAME: &'static str = "sqlite";

    fn write_placeholder(buf: &mut String, _index: usize) {
        buf.push('?');
    }
}

impl Statement<Sqlite> {
    /// Bind all parameters into an executable sqlx query.
    ///
    /// Timestamps are bound as UTC, so they compare correctly with other
    /// UTC timestamps stored through sqlx.
    pub fn query(&self) -> Query<'_, sqlx::Sqlite, SqliteArguments<'_>> {
        self.params()
            .iter()
            .fold(sqlx::query::<sqlx::Sqlite>(self.sql()), |query, param| query.bind(*param))
    }
}
