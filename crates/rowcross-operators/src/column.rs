//! Column expansion: one nested loop level per column.

use std::fmt;
use std::sync::Arc;

use rowcross_core::prelude::*;

use crate::dispatch::generate;
use crate::step::{Step, Steps};
use crate::traits::{Operator, RowStream};

type ColumnFn = Arc<dyn Fn(&Scope) -> std::result::Result<Value, String> + Send + Sync>;

/// Where a column's values come from.
#[derive(Clone)]
pub enum ColumnData {
    /// Literal values, already coerced to a sequence.
    Values(Arc<[Value]>),
    /// Computed from the scope each time the column is expanded.
    Func(ColumnFn),
}

impl ColumnData {
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&Scope) -> Value + Send + Sync + 'static,
    {
        ColumnData::Func(Arc::new(move |scope: &Scope| Ok::<Value, String>(f(scope))))
    }

    pub fn try_func<F, E>(f: F) -> Self
    where
        F: Fn(&Scope) -> std::result::Result<Value, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        ColumnData::Func(Arc::new(move |scope: &Scope| {
            f(scope).map_err(|e| e.to_string())
        }))
    }
}

impl From<Value> for ColumnData {
    fn from(value: Value) -> Self {
        ColumnData::Values(Arc::from(make_iterable(value)))
    }
}

impl fmt::Debug for ColumnData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnData::Values(v) => f.debug_tuple("Values").field(v).finish(),
            ColumnData::Func(_) => f.write_str("Func(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Column {
    key: String,
    data: ColumnData,
}

impl Column {
    pub fn new(key: impl Into<String>, data: ColumnData) -> Self {
        Self {
            key: key.into(),
            data,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Functions see the scope, not the row: after a `group` the row is
    /// empty but the scope still holds every outer column.
    fn resolve(&self, scope: &Scope) -> Result<Arc<[Value]>> {
        match &self.data {
            ColumnData::Values(values) => Ok(Arc::clone(values)),
            ColumnData::Func(f) => {
                let value = f(scope).map_err(|reason| Error::ColumnFunction {
                    column: self.key.clone(),
                    reason,
                })?;
                Ok(Arc::from(make_iterable(value)))
            }
        }
    }
}

impl Operator for Column {
    fn name(&self) -> &'static str {
        "col"
    }

    fn apply(&self, row: Row, scope: Scope, rest: Steps) -> RowStream {
        let values = match self.resolve(&scope) {
            Ok(values) => values,
            Err(e) => return Box::new(std::iter::once(Err(e))),
        };

        let key = self.key.clone();
        Box::new((0..values.len()).flat_map(move |i| {
            let value = &values[i];
            generate(
                row.with(&key, value.clone()),
                scope.with(&key, value.clone()),
                rest.clone(),
            )
        }))
    }
}

/// Add column `key`, one branch per value of `data`.
pub fn col(key: impl Into<String>, data: impl Into<ColumnData>) -> Step {
    Step::operator(Column::new(key, data.into()))
}
