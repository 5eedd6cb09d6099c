//!
//! The queryable abstraction that scopes operate on.
//!
//! Scopes never execute anything. They take a query and return a new one,
//! further constrained.
//!

use crate::builder::QueryBuilder;
use crate::column::Column;
use crate::database::Database;
use crate::predicate::Predicate;
use crate::Table;

/// `INNER JOIN table ON predicate`
#[derive(Clone, Debug, PartialEq)]
pub struct Join {
    table: &'static str,
    on: Predicate,
}

impl Join {
    pub fn inner(table: &'static str, on: Predicate) -> Self {
        Self { table, on }
    }

    /// Join `Target` through a foreign key:
    /// `INNER JOIN target ON target.target_column = owner.owner_column`.
    pub fn foreign<Owner: Table, Target: Table>(
        owner_column: &'static str,
        target_column: &'static str,
    ) -> Self {
        Self::inner(
            Target::NAME,
            Column::of::<Target>(target_column).eq_column(&Column::of::<Owner>(owner_column)),
        )
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn on(&self) -> &Predicate {
        &self.on
    }

    pub fn build_join<DB: Database>(&self, builder: &mut QueryBuilder<DB>) {
        builder.push("INNER JOIN ");
        builder.push(self.table);
        builder.push(" ON ");
        self.on.build_predicate(builder);
    }
}

/// The joins and predicates a query carries, detached from its entity type.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Clauses {
    pub joins: Vec<Join>,
    pub predicates: Vec<Predicate>,
}

///
/// An immutable, composable query over the entity `Self::Entity`.
///
/// Every method consumes the query and returns a new one, so a scope can
/// never affect a query it was not handed.
///
pub trait Queryable: Sized + Send + Sync + 'static {
    type Entity: Table;

    /// The unconstrained query.
    fn all() -> Self;

    /// Add a constraint, combined with the existing ones using AND.
    fn apply(self, predicate: Predicate) -> Self;

    /// Bring another table into the query.
    fn add_join(self, join: Join) -> Self;

    /// Take the query apart, dropping its entity type.
    fn into_clauses(self) -> Clauses;

    /// Reshape the query with a caller-supplied transform.
    fn join<F>(self, transform: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        transform(self)
    }

    /// Combine the joins and constraints of `other` into this query,
    /// keeping this query's entity as the result type.
    fn merge<O: Queryable>(self, other: O) -> Self {
        let Clauses { joins, predicates } = other.into_clauses();
        let query = joins.into_iter().fold(self, Self::add_join);
        predicates.into_iter().fold(query, Self::apply)
    }
}
