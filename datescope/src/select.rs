use crate::builder::{QueryBuilder, Statement};
use crate::database::Database;
use crate::logic;
use crate::predicate::Predicate;
use crate::query::{Clauses, Join, Queryable};
use crate::Table;

/// # Select
///
/// Encodes the intent of selecting rows of `E`, optionally joined with other
/// tables and constrained by predicates.
///
/// Identical joins and predicates are only kept once, so applying the same
/// scope twice yields the same query as applying it once.
///
/// Joins are plain `INNER JOIN`s: a row of `E` appears once per matching
/// joined row. Callers wanting each row once de-duplicate the fetched rows.
///
pub struct Select<E: Table> {
    joins: Vec<Join>,
    predicates: Vec<Predicate>,
    entity: std::marker::PhantomData<fn() -> E>,
}

impl<E: Table> Select<E> {
    pub fn new() -> Self {
        Self {
            joins: Vec::new(),
            predicates: Vec::new(),
            entity: std::marker::PhantomData,
        }
    }

    pub fn inner_join(mut self, join: Join) -> Self {
        if !self.joins.contains(&join) {
            self.joins.push(join);
        }
        self
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        if !self.predicates.contains(&predicate) {
            self.predicates.push(predicate);
        }
        self
    }

    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// All predicates combined with AND, if there are any.
    pub fn predicate(&self) -> Option<Predicate> {
        logic::conjunction(self.predicates.iter().cloned())
    }

    /// Render the query for the database `DB`.
    pub fn to_statement<DB: Database>(&self) -> Statement<DB> {
        let mut builder = QueryBuilder::<DB>::new();
        self.build_query(&mut builder);
        builder.build()
    }

    fn build_query<DB: Database>(&self, builder: &mut QueryBuilder<DB>) {
        builder.push("SELECT ");
        builder.push(E::NAME);
        builder.push(".* FROM ");
        builder.push(E::NAME);

        for join in &self.joins {
            builder.push(" ");
            join.build_join(builder);
        }

        if let Some(predicate) = self.predicate() {
            builder.push(" WHERE ");
            predicate.build_predicate(builder);
        }
    }
}

impl<E: Table> Default for Select<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Table> Clone for Select<E> {
    fn clone(&self) -> Self {
        Self {
            joins: self.joins.clone(),
            predicates: self.predicates.clone(),
            entity: std::marker::PhantomData,
        }
    }
}

impl<E: Table> PartialEq for Select<E> {
    fn eq(&self, other: &Self) -> bool {
        self.joins == other.joins && self.predicates == other.predicates
    }
}

impl<E: Table> std::fmt::Debug for Select<E> {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        fmt.debug_struct("Select")
            .field("from", &E::NAME)
            .field("joins", &self.joins)
            .field("predicates", &self.predicates)
            .finish()
    }
}

impl<E: Table> Queryable for Select<E> {
    type Entity = E;

    fn all() -> Self {
        Self::new()
    }

    fn apply(self, predicate: Predicate) -> Self {
        self.filter(predicate)
    }

    fn add_join(self, join: Join) -> Self {
        self.inner_join(join)
    }

    fn into_clauses(self) -> Clauses {
        Clauses {
            joins: self.joins,
            predicates: self.predicates,
        }
    }
}
