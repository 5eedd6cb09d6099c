use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::builder::QueryBuilder;
use crate::column::Column;
use crate::database::Database;

/// An operand of a predicate.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Column(Column),
    /// A normalized point in time, rendered as a bound parameter.
    Timestamp(DateTime<Tz>),
}

impl Expr {
    pub fn build_expr<DB: Database>(&self, builder: &mut QueryBuilder<DB>) {
        match self {
            Self::Column(column) => {
                builder.push(column.table());
                builder.push(".");
                builder.push(column.name());
            }
            Self::Timestamp(timestamp) => builder.push_param(timestamp.with_timezone(&Utc)),
        }
    }
}

impl From<Column> for Expr {
    fn from(column: Column) -> Self {
        Self::Column(column)
    }
}

impl From<DateTime<Tz>> for Expr {
    fn from(timestamp: DateTime<Tz>) -> Self {
        Self::Timestamp(timestamp)
    }
}
