//!
//! Registered date scopes and their filters.
//!

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config;
use crate::filter::{FilterKey, ScopeOp};
use crate::query::Queryable;
use crate::range::DateRange;
use crate::temporal::{self, DateOrTime, IntoBound};
use crate::{ScopeError, ScopeResult, Table};

/// A filter applied to a query with a present bound.
pub type FilterFn<Q> = Arc<dyn Fn(Q, &DateOrTime) -> ScopeResult<Q> + Send + Sync>;

/// Deferred transform applied to a query before a filter constrains it,
/// typically adding the joins the constraint needs.
pub type BaseRelation<Q> = Arc<dyn Fn(Q) -> Q + Send + Sync>;

pub(crate) fn identity<Q>() -> BaseRelation<Q> {
    Arc::new(|query| query)
}

/// How a scope produces its constraints.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScopeKind {
    /// Compares a timestamp column directly.
    Range,
    /// Forwards to the scope `scope` of the entity `entity`.
    Delegated { entity: &'static str, scope: String },
}

/// Conversion of a scope definition into a registrable scope.
pub trait IntoScope<Q> {
    fn into_scope(self) -> DateScope<Q>;
}

///
/// The filters generated for one semantic name.
///
/// `after` and `before` each take an optional bound: an absent bound returns
/// the query untouched, so bounds can be omitted freely. `between` is
/// `after` followed by `before`.
///
pub struct DateScope<Q> {
    name: String,
    kind: ScopeKind,
    after: FilterFn<Q>,
    before: FilterFn<Q>,
}

impl<Q: Queryable> DateScope<Q> {
    pub(crate) fn new(name: String, kind: ScopeKind, after: FilterFn<Q>, before: FilterFn<Q>) -> Self {
        Self {
            name,
            kind,
            after,
            before,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ScopeKind {
        &self.kind
    }

    /// Delegated scopes have no `on` filter.
    pub fn supports(&self, op: ScopeOp) -> bool {
        op != ScopeOp::On || self.kind == ScopeKind::Range
    }

    /// Constrain to rows at or after `bound` (start of day for dates).
    pub fn after<B: IntoBound>(&self, query: Q, bound: B) -> ScopeResult<Q> {
        self.bounded(ScopeOp::After, &self.after, query, bound)
    }

    /// Constrain to rows at or before `bound` (end of day for dates).
    pub fn before<B: IntoBound>(&self, query: Q, bound: B) -> ScopeResult<Q> {
        self.bounded(ScopeOp::Before, &self.before, query, bound)
    }

    pub fn between<A, B>(&self, query: Q, after: A, before: B) -> ScopeResult<Q>
    where
        A: IntoBound,
        B: IntoBound,
    {
        let query = self.after(query, after)?;
        self.before(query, before)
    }

    /// Constrain to the calendar day containing `bound`, in the ambient
    /// time zone. The time of day of `bound`, if any, is ignored.
    pub fn on<B: IntoBound>(&self, query: Q, bound: B) -> ScopeResult<Q> {
        if !self.supports(ScopeOp::On) {
            return Err(ScopeError::UnsupportedOperation {
                filter: FilterKey::new(&self.name, ScopeOp::On).to_string(),
            });
        }

        let bound = match bound.into_bound()? {
            Some(bound) => bound,
            None => return Ok(query),
        };

        let tz = config::time_zone();
        let (start, end) = temporal::day_span(bound.calendar_day(tz), tz);
        self.between(query, start, end)
    }

    fn bounded<B: IntoBound>(
        &self,
        op: ScopeOp,
        filter: &FilterFn<Q>,
        query: Q,
        bound: B,
    ) -> ScopeResult<Q> {
        match bound.into_bound()? {
            None => Ok(query),
            Some(bound) => {
                tracing::trace!(
                    entity = <Q::Entity as Table>::NAME,
                    filter = %FilterKey::new(&self.name, op),
                    %bound,
                    "applying date scope"
                );
                filter(query, &bound)
            }
        }
    }
}

impl<Q> std::fmt::Debug for DateScope<Q> {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        fmt.debug_struct("DateScope")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

///
/// All date scopes registered on one entity, keyed by semantic name.
///
/// Registering a name that is already taken replaces the earlier scope.
///
pub struct ScopeSet<Q> {
    scopes: BTreeMap<String, DateScope<Q>>,
}

impl<Q: Queryable> ScopeSet<Q> {
    pub fn new() -> Self {
        Self {
            scopes: BTreeMap::new(),
        }
    }

    pub fn register(mut self, scope: impl IntoScope<Q>) -> Self {
        let scope = scope.into_scope();
        let entity = <Q::Entity as Table>::NAME;

        tracing::debug!(entity, scope = scope.name(), kind = ?scope.kind(), "registering date scope");

        if let Some(previous) = self.scopes.insert(scope.name().to_string(), scope) {
            tracing::warn!(
                entity,
                scope = previous.name(),
                "date scope registered twice, the last registration wins"
            );
        }

        self
    }

    /// Register a range scope on the `{name}_at` column of the entity.
    pub fn date_range(self, name: impl Into<String>) -> Self {
        self.register(DateRange::new(name))
    }

    pub fn get(&self, name: &str) -> Option<&DateScope<Q>> {
        self.scopes.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scopes.keys().map(String::as_str)
    }

    /// Every generated filter name, like `created_after`.
    pub fn filter_names(&self) -> Vec<String> {
        self.scopes
            .values()
            .flat_map(|scope| {
                ScopeOp::ALL
                    .iter()
                    .filter(move |op| scope.supports(**op))
                    .map(move |op| FilterKey::new(scope.name(), *op).to_string())
            })
            .collect()
    }

    /// Look up a filter by its generated name, like `created_between`.
    pub fn resolve(&self, filter: &str) -> ScopeResult<(&DateScope<Q>, ScopeOp)> {
        let unknown = || ScopeError::UnknownScope {
            entity: <Q::Entity as Table>::NAME,
            scope: filter.to_string(),
        };

        let key = FilterKey::parse(filter).ok_or_else(unknown)?;
        let scope = self.get(key.scope).ok_or_else(unknown)?;

        if scope.supports(key.op) {
            Ok((scope, key.op))
        } else {
            Err(ScopeError::UnsupportedOperation {
                filter: filter.to_string(),
            })
        }
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

impl<Q: Queryable> Default for ScopeSet<Q> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Q> std::fmt::Debug for ScopeSet<Q> {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        fmt.debug_list().entries(self.scopes.values()).finish()
    }
}
