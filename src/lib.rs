#![forbid(unsafe_code)]
//! rowcross: enumerate the cartesian product of declarative steps as rows.
//!
//! ```
//! use rowcross::{cartesian, filter, steps};
//! use serde_json::json;
//!
//! let rows = cartesian(steps![
//!     json!({"a": [1, 2, 3]}),
//!     json!({"b": [4, 5, 6]}),
//!     filter(|row| (row.get_i64("a").unwrap_or(0) + row.get_i64("b").unwrap_or(0)) % 3 == 0),
//! ])
//! .unwrap();
//!
//! assert_eq!(rows, vec![
//!     json!({"a": 1, "b": 5}),
//!     json!({"a": 2, "b": 4}),
//!     json!({"a": 3, "b": 6}),
//! ]);
//! ```
//!
//! Steps are column blocks (`{"col": data}`), datasets (arrays of objects),
//! or operators built with [`col`], [`merge`], [`join`], [`filter`],
//! [`group`], [`select`] and [`discard`].

pub use rowcross_core::{Error, GenerateConfig, Record, Result, Row, Scope};
pub use rowcross_exec::{cartesian, cartesian_generator, Generator, RowIter};
pub use rowcross_operators::column::ColumnData;
pub use rowcross_operators::{
    col, discard, filter, for_each, generate, group, join, merge, select, steps, ColumnBlock,
    Dataset, Operator, RowStream, Step, Steps,
};
