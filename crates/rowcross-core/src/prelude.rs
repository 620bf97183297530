//! Convenient re-exports for downstream crates.

pub use crate::config::GenerateConfig;
pub use crate::error::{Error, Result};
pub use crate::types::{Record, Row, Scope};
pub use crate::value::{is_column_block, is_iterable, loose_eq, make_iterable};
pub use serde_json::{Map, Value};
