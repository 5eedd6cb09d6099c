//!
//! Filter naming: a scope `created` generates the filters `created_after`,
//! `created_before`, `created_between` and `created_on`.
//!

/// One of the operations a date scope provides.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum ScopeOp {
    After,
    Before,
    Between,
    On,
}

impl ScopeOp {
    pub const ALL: [ScopeOp; 4] = [Self::After, Self::Before, Self::Between, Self::On];

    pub fn suffix(self) -> &'static str {
        match self {
            Self::After => "after",
            Self::Before => "before",
            Self::Between => "between",
            Self::On => "on",
        }
    }
}

impl std::fmt::Display for ScopeOp {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        fmt.write_str(self.suffix())
    }
}

/// The conventional name of a generated filter: `{scope}_{op}`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct FilterKey<'a> {
    pub scope: &'a str,
    pub op: ScopeOp,
}

impl<'a> FilterKey<'a> {
    pub fn new(scope: &'a str, op: ScopeOp) -> Self {
        Self { scope, op }
    }

    /// Split a filter name like `books_created_between` into its scope and
    /// operation. The operation is always the last `_`-separated word.
    pub fn parse(filter: &'a str) -> Option<Self> {
        let (scope, suffix) = filter.rsplit_once('_')?;
        if scope.is_empty() {
            return None;
        }

        ScopeOp::ALL
            .iter()
            .find(|op| op.suffix() == suffix)
            .map(|op| Self::new(scope, *op))
    }
}

impl std::fmt::Display for FilterKey<'_> {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{}_{}", self.scope, self.op)
    }
}
