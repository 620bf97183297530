//! Row filter that prunes the whole subtree below it.

use std::sync::Arc;

use rowcross_core::prelude::*;

use crate::dispatch::generate;
use crate::step::{Step, Steps};
use crate::traits::{Operator, RowStream};

pub struct Filter {
    predicate: Arc<dyn Fn(&Row) -> bool + Send + Sync>,
}

impl Operator for Filter {
    fn name(&self) -> &'static str {
        "filter"
    }

    /// Tests the row built so far (not the scope). On `false` none of the
    /// remaining steps are evaluated.
    fn apply(&self, row: Row, scope: Scope, rest: Steps) -> RowStream {
        if (self.predicate)(&row) {
            generate(row, scope, rest)
        } else {
            Box::new(std::iter::empty())
        }
    }
}

/// Keep only branches whose row satisfies `predicate`.
pub fn filter<F>(predicate: F) -> Step
where
    F: Fn(&Row) -> bool + Send + Sync + 'static,
{
    Step::operator(Filter {
        predicate: Arc::new(predicate),
    })
}
