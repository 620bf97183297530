#![forbid(unsafe_code)]
//! rowcross-core: the data half of the row generator.
//!
//! Holds the `Record` map behind rows and scopes, the value classification
//! helpers shared by the dispatcher and the column operator, the error type,
//! and the run configuration. Nothing here iterates or logs.

pub mod config;
pub mod error;
pub mod prelude;
pub mod types;
pub mod value;

pub use config::GenerateConfig;
pub use error::{Error, Result};
pub use types::{Record, Row, Scope};
