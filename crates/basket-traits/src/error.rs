//! Error types for price loading.

use basket_core::CoreError;
use thiserror::Error;

/// Result type for loader operations.
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Common error type for price loaders.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// Source not available
    #[error("source not available: {0}")]
    SourceNotAvailable(String),

    /// Period token the loader cannot interpret
    #[error("unsupported period: {0}")]
    UnsupportedPeriod(String),

    /// Parse/deserialization error
    #[error("parse error: {0}")]
    ParseError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Loaded data violated a table invariant
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<std::io::Error> for LoaderError {
    fn from(e: std::io::Error) -> Self {
        LoaderError::IoError(e.to_string())
    }
}
