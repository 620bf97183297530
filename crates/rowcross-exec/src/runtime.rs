//! Runtime: wrap the dispatcher in a restartable, limit-aware row iterator.
//!
//! Behavior:
//! - Each call starts an independent traversal from an empty row and scope.
//! - An empty step list yields nothing without dispatching.
//! - The stream fuses on the first error; rows already yielded stay valid.
//! - `row_limit` stops pulling once reached, so no further branches run.

use std::fmt;
use std::iter::FusedIterator;

use rowcross_core::config::GenerateConfig;
use rowcross_core::{Result, Row, Scope};
use rowcross_operators::{generate, RowStream, Step, Steps};

use crate::metrics::emit_event;

/// Generation runtime holding the run configuration.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    cfg: GenerateConfig,
}

impl Generator {
    pub fn new(cfg: GenerateConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    /// Runtime configured from `ROWCROSS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(GenerateConfig::from_env())
    }

    pub fn config(&self) -> &GenerateConfig {
        &self.cfg
    }

    /// Lazily enumerate the rows described by `steps`.
    pub fn stream<I, S>(&self, steps: I) -> RowIter
    where
        I: IntoIterator<Item = S>,
        S: Into<Step>,
    {
        let steps: Steps = steps.into_iter().map(Into::<Step>::into).collect();
        if steps.is_empty() {
            return RowIter::empty();
        }

        emit_event("start", &[("steps", steps.len().to_string())]);
        RowIter {
            inner: Some(generate(Row::new(), Scope::new(), steps)),
            emitted: 0,
            limit: self.cfg.row_limit,
            progress_interval: self.cfg.progress_interval,
        }
    }

    /// Drain every row, stopping at the first error.
    pub fn collect<I, S>(&self, steps: I) -> Result<Vec<Row>>
    where
        I: IntoIterator<Item = S>,
        S: Into<Step>,
    {
        self.stream(steps).collect()
    }
}

/// Lazy sequence of rows from one traversal.
pub struct RowIter {
    inner: Option<RowStream>,
    emitted: usize,
    limit: Option<usize>,
    progress_interval: Option<usize>,
}

impl RowIter {
    fn empty() -> Self {
        Self {
            inner: None,
            emitted: 0,
            limit: None,
            progress_interval: None,
        }
    }

    /// Rows yielded so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    fn finish(&mut self, reason: &str) {
        if self.inner.take().is_some() {
            emit_event(
                "finish",
                &[
                    ("reason", reason.to_string()),
                    ("rows", self.emitted.to_string()),
                ],
            );
        }
    }
}

impl Iterator for RowIter {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.limit.is_some_and(|limit| self.emitted >= limit) {
            self.finish("limit");
            return None;
        }

        let inner = self.inner.as_mut()?;
        match inner.next() {
            Some(Ok(row)) => {
                self.emitted += 1;
                if let Some(every) = self.progress_interval {
                    if self.emitted % every == 0 {
                        emit_event("progress", &[("rows", self.emitted.to_string())]);
                    }
                }
                Some(Ok(row))
            }
            Some(Err(e)) => {
                emit_event("error", &[("error", e.to_string())]);
                self.finish("error");
                Some(Err(e))
            }
            None => {
                self.finish("exhausted");
                None
            }
        }
    }
}

impl FusedIterator for RowIter {}

impl fmt::Debug for RowIter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowIter")
            .field("running", &self.inner.is_some())
            .field("emitted", &self.emitted)
            .field("limit", &self.limit)
            .finish()
    }
}

/// Lazily enumerate every combination described by `steps`.
///
/// Calling again starts an independent traversal.
pub fn cartesian_generator<I, S>(steps: I) -> RowIter
where
    I: IntoIterator<Item = S>,
    S: Into<Step>,
{
    Generator::default().stream(steps)
}

/// Eagerly collect every combination described by `steps`.
pub fn cartesian<I, S>(steps: I) -> Result<Vec<Row>>
where
    I: IntoIterator<Item = S>,
    S: Into<Step>,
{
    cartesian_generator(steps).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowcross_core::Error;
    use rowcross_operators::for_each;
    use serde_json::json;

    #[test]
    fn test_empty_steps_yield_nothing() {
        let mut it = cartesian_generator(Vec::<Step>::new());
        assert!(it.next().is_none());
        assert_eq!(it.emitted(), 0);
    }

    #[test]
    fn test_row_limit_stops_early() {
        let generator = Generator::new(GenerateConfig::default().with_row_limit(3)).unwrap();
        let rows = generator.collect(vec![json!({"a": [1, 2, 3], "b": [1, 2, 3]})]).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], json!({"a": 1, "b": 3}));
    }

    #[test]
    fn test_fuses_after_first_error() {
        let mut it = cartesian_generator(vec![for_each(vec![
            json!({"a": 1}),
            json!("bad"),
            json!({"a": 3}),
        ])]);
        assert!(matches!(it.next(), Some(Ok(_))));
        assert!(matches!(it.next(), Some(Err(Error::InvalidDatasetEntry { index: 1, .. }))));
        assert!(it.next().is_none());
        assert!(it.next().is_none());
        assert_eq!(it.emitted(), 1);
    }

    // The only test in this binary that touches ROWCROSS_* variables.
    #[test]
    fn test_from_env_row_limit() {
        std::env::set_var("ROWCROSS_ROW_LIMIT", "2");
        let limited = Generator::from_env().unwrap();
        std::env::set_var("ROWCROSS_ROW_LIMIT", "lots");
        let fallback = Generator::from_env().unwrap();
        std::env::remove_var("ROWCROSS_ROW_LIMIT");

        assert_eq!(limited.config().row_limit, Some(2));
        let rows = limited.collect(vec![json!({"a": [1, 2, 3]})]).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(fallback.config().row_limit, None);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let cfg = GenerateConfig::default().with_progress_interval(0);
        assert!(matches!(Generator::new(cfg), Err(Error::Config(_))));
    }
}
