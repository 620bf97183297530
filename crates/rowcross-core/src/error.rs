use thiserror::Error;

/// Canonical result for rowcross.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A step was neither a column block, a dataset, nor an operator.
    #[error("Unknown step kind: {0}")]
    UnknownStepKind(String),

    #[error("Dataset entry #{index} is not an object: {value}")]
    InvalidDatasetEntry { index: usize, value: String },

    /// A function-valued column failed while resolving its data.
    #[error("Column '{column}' could not be resolved: {reason}")]
    ColumnFunction { column: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub fn unknown_step(value: &serde_json::Value) -> Self {
        Error::UnknownStepKind(value.to_string())
    }

    pub fn invalid_entry(index: usize, value: &serde_json::Value) -> Self {
        Error::InvalidDatasetEntry {
            index,
            value: value.to_string(),
        }
    }
}
