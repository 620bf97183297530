//! Operator trait + the stream type every step produces.

use rowcross_core::{Result, Row, Scope};

use crate::step::Steps;

/// A lazy sequence of completed rows.
///
/// An `Err` item aborts the traversal; consumers stop at the first one.
pub type RowStream = Box<dyn Iterator<Item = Result<Row>> + Send>;

/// Trait that all operators must implement.
///
/// Invariants:
/// - `apply` must not mutate shared state; `row` and `scope` are owned
///   snapshots for this branch only.
/// - Output is produced lazily. Recursion into the remaining steps goes
///   through [`crate::generate`].
pub trait Operator: Send + Sync + 'static {
    /// Human-readable operator name (stable).
    fn name(&self) -> &'static str;

    /// Expand this operator for one branch, continuing with `rest`.
    fn apply(&self, row: Row, scope: Scope, rest: Steps) -> RowStream;
}
