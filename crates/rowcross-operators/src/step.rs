//! Step shapes accepted by the dispatcher and the persistent step list.
//!
//! A step is one of:
//! - a column block (`{"a": [1, 2], "b": fn}`), expanded one column at a time,
//! - a dataset (array of objects), merged into every branch,
//! - an operator produced by one of the factories in this crate.
//!
//! Raw JSON is classified when it is converted into a `Step`. Values that fit
//! none of the shapes are kept as `Unrecognized` and only fail once the
//! dispatcher actually reaches them.

use std::fmt;
use std::sync::Arc;

use rowcross_core::prelude::*;

use crate::column::{Column, ColumnData};
use crate::traits::Operator;

#[derive(Clone)]
pub enum Step {
    Columns(ColumnBlock),
    Dataset(Dataset),
    Operator(Arc<dyn Operator>),
    Unrecognized(Value),
}

impl Step {
    pub fn operator<O: Operator>(op: O) -> Self {
        Step::Operator(Arc::new(op))
    }

    /// Stable label for logs and debugging.
    pub fn kind(&self) -> &'static str {
        match self {
            Step::Columns(_) => "columns",
            Step::Dataset(_) => "dataset",
            Step::Operator(op) => op.name(),
            Step::Unrecognized(_) => "unrecognized",
        }
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Columns(block) => f.debug_tuple("Columns").field(block).finish(),
            Step::Dataset(data) => f.debug_tuple("Dataset").field(data).finish(),
            Step::Operator(op) => f.debug_tuple("Operator").field(&op.name()).finish(),
            Step::Unrecognized(v) => f.debug_tuple("Unrecognized").field(v).finish(),
        }
    }
}

impl From<Value> for Step {
    fn from(value: Value) -> Self {
        if is_iterable(&value) {
            return Step::Dataset(Dataset::new(make_iterable(value)));
        }
        if !is_column_block(&value) {
            return Step::Unrecognized(value);
        }
        match value {
            Value::Object(fields) => Step::Columns(ColumnBlock::from(fields)),
            other => Step::Unrecognized(other),
        }
    }
}

impl From<ColumnBlock> for Step {
    fn from(block: ColumnBlock) -> Self {
        Step::Columns(block)
    }
}

impl From<Dataset> for Step {
    fn from(data: Dataset) -> Self {
        Step::Dataset(data)
    }
}

impl From<Vec<Value>> for Step {
    fn from(entries: Vec<Value>) -> Self {
        Step::Dataset(Dataset::new(entries))
    }
}

impl From<Vec<Row>> for Step {
    fn from(rows: Vec<Row>) -> Self {
        Step::Dataset(Dataset::from(rows))
    }
}

impl From<Arc<dyn Operator>> for Step {
    fn from(op: Arc<dyn Operator>) -> Self {
        Step::Operator(op)
    }
}

/// An ordered set of column definitions, expanded left to right.
///
/// Later columns iterate faster (inner loop). A block with no columns is
/// rejected by the dispatcher, same as `{}`.
#[derive(Clone, Default)]
pub struct ColumnBlock {
    columns: Arc<Vec<Arc<Column>>>,
}

impl ColumnBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Literal column data. Arrays expand to one branch per element;
    /// anything else is a single value.
    pub fn col(self, key: impl Into<String>, data: impl Into<Value>) -> Self {
        self.push(key.into(), ColumnData::from(data.into()))
    }

    /// Column computed from the current scope.
    pub fn col_fn<F>(self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Scope) -> Value + Send + Sync + 'static,
    {
        self.push(key.into(), ColumnData::func(f))
    }

    /// Column computed from the current scope that may fail.
    pub fn try_col_fn<F, E>(self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Scope) -> std::result::Result<Value, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        self.push(key.into(), ColumnData::try_func(f))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// One `col` operator step per entry, in declaration order.
    pub(crate) fn to_steps(&self) -> impl Iterator<Item = Step> + '_ {
        self.columns
            .iter()
            .map(|c| Step::Operator(Arc::clone(c) as Arc<dyn Operator>))
    }

    fn push(mut self, key: String, data: ColumnData) -> Self {
        Arc::make_mut(&mut self.columns).push(Arc::new(Column::new(key, data)));
        self
    }
}

impl fmt::Debug for ColumnBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.columns.iter().map(|c| c.key()))
            .finish()
    }
}

impl From<Map<String, Value>> for ColumnBlock {
    fn from(fields: Map<String, Value>) -> Self {
        fields
            .into_iter()
            .fold(ColumnBlock::new(), |block, (key, data)| block.col(key, data))
    }
}

/// Candidate records to merge into every branch.
///
/// Entries are checked lazily: a non-object entry only fails when a branch
/// reaches it.
#[derive(Debug, Clone)]
pub struct Dataset {
    entries: Arc<[Value]>,
}

impl Dataset {
    pub fn new(entries: Vec<Value>) -> Self {
        Self {
            entries: Arc::from(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entries(&self) -> Arc<[Value]> {
        Arc::clone(&self.entries)
    }
}

impl From<Vec<Value>> for Dataset {
    fn from(entries: Vec<Value>) -> Self {
        Self::new(entries)
    }
}

impl From<Vec<Row>> for Dataset {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows.into_iter().map(Row::into_value).collect())
    }
}

/// Immutable step list consumed head-first.
///
/// Taking the tail is O(1) and shares storage, so every branch can hold its
/// own view of "remaining steps".
#[derive(Clone)]
pub struct Steps {
    items: Arc<[Step]>,
    start: usize,
}

impl Steps {
    pub fn new(items: Vec<Step>) -> Self {
        Self {
            items: Arc::from(items),
            start: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len() - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn first(&self) -> Option<&Step> {
        self.items.get(self.start)
    }

    /// Everything after the head. Empty stays empty.
    pub fn tail(&self) -> Steps {
        Steps {
            items: Arc::clone(&self.items),
            start: (self.start + 1).min(self.items.len()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.items[self.start..].iter()
    }

    /// A new list made of `head` followed by `rest`.
    pub fn prepend<I>(head: I, rest: &Steps) -> Steps
    where
        I: IntoIterator<Item = Step>,
    {
        let items: Vec<Step> = head.into_iter().chain(rest.iter().cloned()).collect();
        Steps::new(items)
    }
}

impl Default for Steps {
    fn default() -> Self {
        Steps::new(Vec::new())
    }
}

impl From<Vec<Step>> for Steps {
    fn from(items: Vec<Step>) -> Self {
        Steps::new(items)
    }
}

impl FromIterator<Step> for Steps {
    fn from_iter<I: IntoIterator<Item = Step>>(iter: I) -> Self {
        Steps::new(iter.into_iter().collect())
    }
}

impl fmt::Debug for Steps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
