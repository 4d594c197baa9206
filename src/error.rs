//! Error types for momentum
//!
//! Failure surface is deliberately small: storage I/O and JSON codec
//! problems, plus argument parsing for the fixed label sets. No store
//! operation is fatal; persistence errors are logged and dropped by the
//! gateway, so most callers only ever see `Ok`.

use thiserror::Error;

/// Main error type for momentum operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No platform data directory available")]
    DataDirUnavailable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for momentum operations
pub type Result<T> = std::result::Result<T, Error>;
