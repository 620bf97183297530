#![forbid(unsafe_code)]
//! rowcross-operators: the step dispatcher and the operators it expands into.
//!
//! Design intent:
//! - Everything is a lazy, pull-based `RowStream`; no work happens until the
//!   consumer asks for the next row.
//! - Column blocks and bare datasets are sugar. The dispatcher rewrites them
//!   into `col`/`merge` operators, so `Operator` is the only extension point.
//! - `group` is the one operator that materializes: it drains a nested
//!   generation into a single column value.

pub mod dispatch;
pub mod step;
pub mod traits;

pub mod column;
pub mod filter;
pub mod group;
pub mod join;
pub mod merge;
pub mod project;

pub use column::col;
pub use dispatch::generate;
pub use filter::filter;
pub use group::group;
pub use join::join;
pub use merge::{for_each, merge};
pub use project::{discard, select};
pub use step::{ColumnBlock, Dataset, Step, Steps};
pub use traits::{Operator, RowStream};

/// Build a `Vec<Step>` from anything convertible into a [`Step`].
///
/// ```
/// use rowcross_operators::{filter, steps};
/// use serde_json::json;
///
/// let steps = steps![json!({"a": [1, 2]}), filter(|row| row.get_i64("a") == Some(2))];
/// assert_eq!(steps.len(), 2);
/// ```
#[macro_export]
macro_rules! steps {
    () => { ::std::vec::Vec::<$crate::Step>::new() };
    ($($step:expr),+ $(,)?) => {
        ::std::vec![$($crate::Step::from($step)),+]
    };
}
