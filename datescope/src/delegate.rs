//!
//! Delegated scopes: filters that run another entity's date scope and merge
//! the resulting constraints into a local query.
//!
//! ```ignore
//! impl Scoped for Author {
//!     type Query = Select<Author>;
//!
//!     fn scopes() -> &'static ScopeSet<Select<Author>> {
//!         static SCOPES: Lazy<ScopeSet<Select<Author>>> = Lazy::new(|| {
//!             ScopeSet::new()
//!                 // Author books_created_* => Book created_*
//!                 .register(delegate::<Book, _>("books_created").relation(join_books))
//!                 // Author with_any_books_written_* => Book created_*
//!                 .register(
//!                     delegate::<Book, _>("with_any_books_written")
//!                         .relation(join_books)
//!                         .scope("created"),
//!                 )
//!         });
//!         &SCOPES
//!     }
//! }
//! ```
//!

use std::sync::Arc;

use crate::filter::{FilterKey, ScopeOp};
use crate::query::Queryable;
use crate::scope::{self, BaseRelation, DateScope, FilterFn, IntoScope, ScopeKind};
use crate::temporal::DateOrTime;
use crate::{ScopeError, ScopeResult, Scoped};

/// Selects the operation of the target scope a delegated filter forwards to.
type Forward<T> = fn(
    &DateScope<<T as Scoped>::Query>,
    <T as Scoped>::Query,
    DateOrTime,
) -> ScopeResult<<T as Scoped>::Query>;

/// Definition of a scope `local_name` that delegates to a scope of `T`.
pub struct Delegate<Q, T> {
    local_name: String,
    relation: BaseRelation<Q>,
    target_scope: Option<String>,
    target: std::marker::PhantomData<fn() -> T>,
}

/// Start defining a scope that delegates to the entity `T`.
pub fn delegate<T, Q>(local_name: impl Into<String>) -> Delegate<Q, T>
where
    T: Scoped,
    Q: Queryable,
{
    Delegate {
        local_name: local_name.into(),
        relation: scope::identity(),
        target_scope: None,
        target: std::marker::PhantomData,
    }
}

impl<Q, T> Delegate<Q, T>
where
    T: Scoped,
    Q: Queryable,
{
    /// Transform the local query before merging, typically to join `T`.
    pub fn relation<F>(mut self, relation: F) -> Self
    where
        F: Fn(Q) -> Q + Send + Sync + 'static,
    {
        self.relation = Arc::new(relation);
        self
    }

    /// Name the target scope explicitly instead of inferring it.
    pub fn scope(mut self, target_scope: impl Into<String>) -> Self {
        self.target_scope = Some(target_scope.into());
        self
    }
}

impl<Q, T> IntoScope<Q> for Delegate<Q, T>
where
    T: Scoped,
    Q: Queryable,
{
    fn into_scope(self) -> DateScope<Q> {
        let target_scope = self
            .target_scope
            .unwrap_or_else(|| infer_target_scope(&self.local_name, T::PLURAL).to_string());

        let after = forward_to::<Q, T>(
            ScopeOp::After,
            self.relation.clone(),
            target_scope.clone(),
            DateScope::after,
        );
        let before = forward_to::<Q, T>(
            ScopeOp::Before,
            self.relation,
            target_scope.clone(),
            DateScope::before,
        );

        let kind = ScopeKind::Delegated {
            entity: T::NAME,
            scope: target_scope,
        };

        DateScope::new(self.local_name, kind, after, before)
    }
}

///
/// Infer the target scope from a local scope name by stripping a leading
/// `{plural}_`, where `plural` is the target entity's plural name.
///
/// This is a plain string prefix match: `books_created` becomes `created`
/// for `Book`, while `with_any_books_written` stays as it is and needs an
/// explicit target scope.
///
pub fn infer_target_scope<'a>(local_name: &'a str, plural: &str) -> &'a str {
    local_name
        .strip_prefix(plural)
        .and_then(|rest| rest.strip_prefix('_'))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(local_name)
}

fn forward_to<Q, T>(
    op: ScopeOp,
    relation: BaseRelation<Q>,
    target_scope: String,
    forward: Forward<T>,
) -> FilterFn<Q>
where
    T: Scoped,
    Q: Queryable,
{
    Arc::new(move |query: Q, bound: &DateOrTime| -> ScopeResult<Q> {
        let target = T::scopes().get(&target_scope).ok_or_else(|| {
            ScopeError::UnknownDelegateFilter {
                entity: T::NAME,
                filter: FilterKey::new(&target_scope, op).to_string(),
            }
        })?;

        tracing::trace!(
            entity = T::NAME,
            filter = %FilterKey::new(&target_scope, op),
            "delegating date scope"
        );

        let scoped = forward(target, T::query(), *bound)?;
        Ok(query.join(|query| relation(query)).merge(scoped))
    })
}
