//! Nested sub-generation materialized into a single column.

use rowcross_core::prelude::*;

use crate::dispatch::generate;
use crate::step::{Step, Steps};
use crate::traits::{Operator, RowStream};

pub struct Group {
    column: String,
    steps: Steps,
}

impl Operator for Group {
    fn name(&self) -> &'static str {
        "group"
    }

    /// Runs `steps` from an empty row and the outer scope, drains the result
    /// into `column`, then continues with the outer scope unchanged.
    fn apply(&self, row: Row, scope: Scope, rest: Steps) -> RowStream {
        let nested = generate(Row::new(), scope.clone(), self.steps.clone())
            .map(|r| r.map(Row::into_value))
            .collect::<Result<Vec<Value>>>();

        let nested = match nested {
            Ok(rows) => rows,
            Err(e) => return Box::new(std::iter::once(Err(e))),
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(column = %self.column, rows = nested.len(), "group materialized");

        generate(row.with(&self.column, Value::Array(nested)), scope, rest)
    }
}

/// Add `column` holding every row produced by `steps`.
///
/// Nested steps can read outer columns through the scope. The nested rows
/// are not folded back into the scope.
pub fn group<I, S>(column: impl Into<String>, steps: I) -> Step
where
    I: IntoIterator<Item = S>,
    S: Into<Step>,
{
    Step::operator(Group {
        column: column.into(),
        steps: steps.into_iter().map(Into::<Step>::into).collect(),
    })
}
