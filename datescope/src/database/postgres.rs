use sqlx::postgres::PgArguments;
use sqlx::query::Query;

use super::Database;
use crate::builder::Statement;

#[derive(Clone, Debug)]
pub struct Postgres;

impl Database for Postgres {
    const NAME: &'static str = "postgres";

    fn write_placeholder(buf: &mut String, index: usize) {
        buf.push('$');
        buf.push_str(&index.to_string());
    }
}

impl Statement<Postgres> {
    /// Bind all parameters into an executable sqlx query.
    pub fn query(&self) -> Query<'_, sqlx::Postgres, PgArguments> {
        self.params()
            .iter()
            .fold(sqlx::query::<sqlx::Postgres>(self.sql()), |query, param| query.bind(*param))
    }
}
