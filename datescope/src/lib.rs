//!
//! Date range scopes for query builders.
//!
//! Given a semantic timestamp name like `created`, a [Scoped] entity gets a
//! family of filters operating on the `created_at` column:
//!
//! ```text
//! created_after(t)       created_at >= lower(t)
//! created_before(t)      created_at <= upper(t)
//! created_between(a, b)  created_after(a) AND created_before(b)
//! created_on(d)          created_between(start_of_day(d), end_of_day(d))
//! ```
//!
//! Scopes can also be delegated across a relationship. `Author` may expose
//! `books_created_after` which runs `Book`'s `created_after` and merges the
//! result into an `Author` query:
//!
//! ```text
//! Author                       Book
//!   books_created_after(t) ───▶  created_after(t)
//!     join(books)                  books.created_at >= t
//!     merge(◀──────────────────────┘)
//! ```
//!

pub use datescope_macros::*;

pub mod builder;
pub mod column;
pub mod config;
pub mod database;
pub mod delegate;
pub mod expr;
pub mod filter;
pub mod predicate;
pub mod prelude;
pub mod query;
pub mod range;
pub mod scope;
pub mod select;
pub mod temporal;

mod logic;

/// A database table that filters can be registered on.
pub trait Table: Send + Sync + 'static {
    /// SQL name of the table.
    const NAME: &'static str;

    /// Pluralized name of the entity, used when inferring the target scope
    /// of a delegated scope (`books_created` => `created` on `Book`).
    const PLURAL: &'static str = Self::NAME;
}

///
/// Opt-in trait for entity types that carry date range scopes.
///
/// The scope set is built once, typically in a `once_cell::sync::Lazy`
/// static, and never mutated afterwards:
///
/// ```ignore
/// impl Scoped for Book {
///     type Query = Select<Book>;
///
///     fn scopes() -> &'static ScopeSet<Select<Book>> {
///         static SCOPES: Lazy<ScopeSet<Select<Book>>> =
///             Lazy::new(|| ScopeSet::new().date_range("created").date_range("updated"));
///         &SCOPES
///     }
/// }
/// ```
///
pub trait Scoped: Table + Sized {
    type Query: query::Queryable<Entity = Self>;

    /// The registered scopes of this entity.
    fn scopes() -> &'static scope::ScopeSet<Self::Query>;

    /// A fresh, unconstrained query over this entity.
    fn query() -> Self::Query {
        <Self::Query as query::Queryable>::all()
    }

    /// Look up a registered scope by its semantic name.
    fn scope(name: &str) -> ScopeResult<&'static scope::DateScope<Self::Query>> {
        Self::scopes()
            .get(name)
            .ok_or_else(|| ScopeError::UnknownScope {
                entity: Self::NAME,
                scope: name.to_string(),
            })
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScopeError {
    #[error("Invalid temporal value: {0}")]
    InvalidTemporalValue(String),

    #[error("No scope `{scope}` registered on `{entity}`")]
    UnknownScope { entity: &'static str, scope: String },

    #[error("Cannot delegate to `{filter}`: not registered on `{entity}`")]
    UnknownDelegateFilter { entity: &'static str, filter: String },

    #[error("`{filter}` is not supported by this scope")]
    UnsupportedOperation { filter: String },

    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),

    #[error("Ambient time zone already configured")]
    AlreadyConfigured,
}

pub type ScopeResult<T> = Result<T, ScopeError>;
