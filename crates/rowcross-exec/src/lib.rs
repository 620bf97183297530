#![forbid(unsafe_code)]
//! rowcross-exec: entry points and the generation runtime.
//!
//! `cartesian_generator` exposes the lazy stream; `cartesian` drains it.
//! `Generator` adds a row limit and progress events on top of the same
//! traversal.

pub mod metrics;
pub mod runtime;

pub use runtime::{cartesian, cartesian_generator, Generator, RowIter};
