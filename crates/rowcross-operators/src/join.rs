//! Single-column equi-join, built on merge.
//!
//! Inner-join semantics: a branch continues only for candidates whose
//! `column` equals the scope's value. Branches with no match emit nothing.

use std::sync::Arc;

use rowcross_core::prelude::*;

use crate::merge::{Merge, MergePredicate};
use crate::step::{Dataset, Step};

/// Merge the records of `data` whose `column` matches the scope's `column`.
///
/// Both sides must define the column. Values compare with [`loose_eq`]:
/// scalars by value, composites never.
pub fn join(data: impl Into<Dataset>, column: impl Into<String>) -> Step {
    let column = column.into();
    let on: MergePredicate = Arc::new(move |scope: &Scope, candidate: &Map<String, Value>| {
        match (scope.get(&column), candidate.get(&column)) {
            (Some(left), Some(right)) => loose_eq(left, right),
            _ => false,
        }
    });
    Step::operator(Merge::new(data.into().entries(), on))
}
