//! Error types for the stats engine

use thiserror::Error;

/// Errors that can occur while validating records or deriving statistics
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Date parse error: {0}")]
    DateParseError(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}
