//!
//! References to timestamp columns.
//!

use std::borrow::Cow;
use std::sync::Arc;

use chrono::DateTime;
use chrono_tz::Tz;

use crate::expr::Expr;
use crate::predicate::Predicate;
use crate::Table;

/// A column of some table, e.g. `books.created_at`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Column {
    table: &'static str,
    name: Cow<'static, str>,
}

impl Column {
    pub fn new(table: &'static str, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            table,
            name: name.into(),
        }
    }

    /// A column of the table `T`.
    pub fn of<T: Table>(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(T::NAME, name)
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `self >= value`
    pub fn gteq(&self, value: DateTime<Tz>) -> Predicate {
        Predicate::Gteq(Expr::Column(self.clone()), Expr::Timestamp(value))
    }

    /// `self <= value`
    pub fn lteq(&self, value: DateTime<Tz>) -> Predicate {
        Predicate::Lteq(Expr::Column(self.clone()), Expr::Timestamp(value))
    }

    /// `self = other`
    pub fn eq_column(&self, other: &Column) -> Predicate {
        Predicate::Eq(Expr::Column(self.clone()), Expr::Column(other.clone()))
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{}.{}", self.table, self.name)
    }
}

/// Deferred reference to the column a range scope compares against.
///
/// Resolved every time a filter is invoked, never at registration.
pub type AttributeLocator = Arc<dyn Fn() -> Column + Send + Sync>;
