//! Generation settings that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Stop after this many rows have been yielded. `None` drains everything.
    pub row_limit: Option<usize>,

    /// Emit a progress event every N rows (requires the `tracing` feature
    /// downstream to be visible).
    pub progress_interval: Option<usize>,
}

impl GenerateConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `ROWCROSS_ROW_LIMIT`: maximum rows to yield
    /// - `ROWCROSS_PROGRESS_INTERVAL`: rows between progress events
    ///
    /// Unparsable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(s) = lookup("ROWCROSS_ROW_LIMIT") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.row_limit = Some(v);
            }
        }

        if let Some(s) = lookup("ROWCROSS_PROGRESS_INTERVAL") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.progress_interval = Some(v);
            }
        }

        cfg
    }

    pub fn with_row_limit(mut self, limit: usize) -> Self {
        self.row_limit = Some(limit);
        self
    }

    pub fn with_progress_interval(mut self, every: usize) -> Self {
        self.progress_interval = Some(every);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.progress_interval == Some(0) {
            return Err(Error::Config(
                "progress_interval must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
