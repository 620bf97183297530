//! Dataset merge: lay each candidate record over the current branch.

use std::sync::Arc;

use rowcross_core::prelude::*;

use crate::dispatch::generate;
use crate::step::{Dataset, Step, Steps};
use crate::traits::{Operator, RowStream};

/// `(scope, candidate) -> keep?`
pub type MergePredicate = Arc<dyn Fn(&Scope, &Map<String, Value>) -> bool + Send + Sync>;

pub struct Merge {
    data: Arc<[Value]>,
    predicate: Option<MergePredicate>,
}

impl Merge {
    pub fn new(data: Arc<[Value]>, predicate: MergePredicate) -> Self {
        Self {
            data,
            predicate: Some(predicate),
        }
    }

    /// Merge every candidate (always-true predicate).
    pub fn unconditional(data: Arc<[Value]>) -> Self {
        Self {
            data,
            predicate: None,
        }
    }
}

impl Operator for Merge {
    fn name(&self) -> &'static str {
        "merge"
    }

    fn apply(&self, row: Row, scope: Scope, rest: Steps) -> RowStream {
        let data = Arc::clone(&self.data);
        let predicate = self.predicate.clone();

        Box::new((0..data.len()).flat_map(move |index| -> RowStream {
            let Value::Object(candidate) = &data[index] else {
                #[cfg(feature = "tracing")]
                tracing::trace!(index, "rejected non-object dataset entry");
                return Box::new(std::iter::once(Err(Error::invalid_entry(
                    index,
                    &data[index],
                ))));
            };

            if let Some(keep) = &predicate {
                if !keep(&scope, candidate) {
                    return Box::new(std::iter::empty());
                }
            }

            generate(
                row.merged(candidate),
                scope.merged(candidate),
                rest.clone(),
            )
        }))
    }
}

/// Merge each record of `data` whose predicate holds against the scope.
///
/// Candidates win on key collision. A non-object entry fails the traversal
/// when it is reached.
pub fn merge<F>(data: impl Into<Dataset>, predicate: F) -> Step
where
    F: Fn(&Scope, &Map<String, Value>) -> bool + Send + Sync + 'static,
{
    Step::operator(Merge::new(data.into().entries(), Arc::new(predicate)))
}

/// Merge every record of `data` into every branch.
///
/// Same as passing the dataset as a bare step.
pub fn for_each(data: impl Into<Dataset>) -> Step {
    Step::operator(Merge::unconditional(data.into().entries()))
}
