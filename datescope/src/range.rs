//!
//! Range scopes: filters comparing a timestamp column against a bound.
//!

use std::borrow::Cow;
use std::sync::Arc;

use crate::column::{AttributeLocator, Column};
use crate::config;
use crate::query::Queryable;
use crate::scope::{self, BaseRelation, DateScope, FilterFn, IntoScope, ScopeKind};
use crate::temporal::DateOrTime;
use crate::Table;

///
/// Definition of a range scope named `name`.
///
/// By default the filters compare the `{name}_at` column of the entity's own
/// table and do not reshape the query. Both can be overridden, e.g. to filter
/// authors by the creation time of their books:
///
/// ```ignore
/// DateRange::new("with_any_books_created")
///     .attribute(|| Column::of::<Book>("created_at"))
///     .relation(|query: Select<Author>| query.inner_join(Join::foreign::<Author, Book>("id", "author_id")))
/// ```
///
pub struct DateRange<Q> {
    name: String,
    attribute: Option<AttributeLocator>,
    relation: BaseRelation<Q>,
}

impl<Q: Queryable> DateRange<Q> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attribute: None,
            relation: scope::identity(),
        }
    }

    /// Compare against the column returned by `locator`.
    ///
    /// The locator runs on every filter invocation.
    pub fn attribute<F>(mut self, locator: F) -> Self
    where
        F: Fn() -> Column + Send + Sync + 'static,
    {
        self.attribute = Some(Arc::new(locator));
        self
    }

    /// Compare against another column of the entity's own table.
    pub fn column(self, column: impl Into<Cow<'static, str>>) -> Self {
        let column = column.into();
        self.attribute(move || Column::of::<Q::Entity>(column.clone()))
    }

    /// Transform the query before constraining it.
    pub fn relation<F>(mut self, relation: F) -> Self
    where
        F: Fn(Q) -> Q + Send + Sync + 'static,
    {
        self.relation = Arc::new(relation);
        self
    }
}

impl<Q: Queryable> IntoScope<Q> for DateRange<Q> {
    fn into_scope(self) -> DateScope<Q> {
        let attribute = self
            .attribute
            .unwrap_or_else(|| default_attribute::<Q::Entity>(&self.name));

        let after: FilterFn<Q> = {
            let attribute = attribute.clone();
            let relation = self.relation.clone();
            Arc::new(move |query: Q, bound: &DateOrTime| -> crate::ScopeResult<Q> {
                let lower = bound.lower_bound(config::time_zone())?;
                Ok(query
                    .join(|query| relation(query))
                    .apply(attribute().gteq(lower)))
            })
        };

        let before: FilterFn<Q> = {
            let relation = self.relation;
            Arc::new(move |query: Q, bound: &DateOrTime| -> crate::ScopeResult<Q> {
                let upper = bound.upper_bound(config::time_zone())?;
                Ok(query
                    .join(|query| relation(query))
                    .apply(attribute().lteq(upper)))
            })
        };

        DateScope::new(self.name, ScopeKind::Range, after, before)
    }
}

fn default_attribute<E: Table>(name: &str) -> AttributeLocator {
    let column = format!("{}_at", name);
    Arc::new(move || Column::of::<E>(column.clone()))
}
