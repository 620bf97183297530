//! The recursive core: classify the head step, recurse over the tail.
//!
//! Column blocks and datasets are rewritten into `col`/`merge` operator steps
//! and fed back through the dispatcher; operators are invoked directly and
//! their stream becomes this branch's output.

use std::sync::Arc;

use rowcross_core::prelude::*;

use crate::merge::Merge;
use crate::step::{Step, Steps};
use crate::traits::{Operator, RowStream};

/// Lazily enumerate every row produced by `steps` starting from `row`/`scope`.
///
/// Nothing is evaluated until the returned stream is first polled, so a
/// malformed step fails when it is reached, not when this is called. The
/// stream ends right after the first error.
pub fn generate(row: Row, scope: Scope, steps: Steps) -> RowStream {
    let inner: RowStream =
        Box::new(std::iter::once_with(move || dispatch(row, scope, steps)).flatten());
    Box::new(FuseOnError { inner: Some(inner) })
}

/// Drops the inner stream once it yields an error or runs dry.
struct FuseOnError {
    inner: Option<RowStream>,
}

impl Iterator for FuseOnError {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.as_mut()?.next();
        if !matches!(item, Some(Ok(_))) {
            self.inner = None;
        }
        item
    }
}

fn dispatch(row: Row, scope: Scope, steps: Steps) -> RowStream {
    let Some(head) = steps.first() else {
        return Box::new(std::iter::once(Ok(row)));
    };
    let rest = steps.tail();

    #[cfg(feature = "tracing")]
    tracing::trace!(step = head.kind(), remaining = rest.len(), "dispatch");

    match head {
        Step::Columns(block) if block.is_empty() => Box::new(std::iter::once(Err(
            Error::unknown_step(&Value::Object(Map::new())),
        ))),
        Step::Columns(block) => dispatch(row, scope, Steps::prepend(block.to_steps(), &rest)),
        Step::Dataset(data) => {
            let merge: Arc<dyn Operator> = Arc::new(Merge::unconditional(data.entries()));
            dispatch(row, scope, Steps::prepend([Step::Operator(merge)], &rest))
        }
        Step::Operator(op) => op.apply(row, scope, rest),
        Step::Unrecognized(value) => Box::new(std::iter::once(Err(Error::unknown_step(value)))),
    }
}
