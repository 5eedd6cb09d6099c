pub use crate::column::Column;
pub use crate::delegate::delegate;
pub use crate::query::{Join, Queryable};
pub use crate::range::DateRange;
pub use crate::scope::{DateScope, ScopeSet};
pub use crate::select::Select;
pub use crate::temporal::{DateOrTime, IntoBound};
pub use crate::{Scoped, Table};
