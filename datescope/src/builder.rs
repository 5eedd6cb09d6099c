use chrono::{DateTime, Utc};

use crate::database::Database;

/// Accumulates SQL text together with its positional parameters.
pub struct QueryBuilder<DB: Database> {
    db: std::marker::PhantomData<DB>,
    buf: String,
    params: Vec<DateTime<Utc>>,
}

impl<DB: Database> QueryBuilder<DB> {
    pub fn new() -> Self {
        Self {
            db: std::marker::PhantomData,
            buf: String::new(),
            params: Vec::new(),
        }
    }

    pub fn build(self) -> Statement<DB> {
        Statement {
            db: std::marker::PhantomData,
            sql: self.buf,
            params: self.params,
        }
    }

    pub fn push(&mut self, str: &str) {
        self.buf.push_str(str);
    }

    /// Push a placeholder for `value` and remember the value for binding.
    pub fn push_param(&mut self, value: DateTime<Utc>) {
        self.params.push(value);
        DB::write_placeholder(&mut self.buf, self.params.len());
    }
}

impl<DB: Database> Default for QueryBuilder<DB> {
    fn default() -> Self {
        Self::new()
    }
}

/// A rendered query: SQL text plus the parameters to bind, in order.
pub struct Statement<DB: Database> {
    db: std::marker::PhantomData<DB>,
    sql: String,
    params: Vec<DateTime<Utc>>,
}

impl<DB: Database> Statement<DB> {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[DateTime<Utc>] {
        &self.params
    }
}

impl<DB: Database> std::fmt::Debug for Statement<DB> {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        fmt.debug_struct("Statement")
            .field("db", &DB::NAME)
            .field("sql", &self.sql)
            .field("params", &self.params)
            .finish()
    }
}
