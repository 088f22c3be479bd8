use std::result::Result as StdResult;

use thiserror::Error;

/// Error type for configuration and export failures.
///
/// Aggregation itself never fails: missing fields, unparsable dates and
/// zero denominators degrade to `None`/blank values instead.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, ReportError>;
