//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Ticker list could not be parsed.
    #[error("Invalid tickers: {0}")]
    InvalidTickers(String),

    /// Weight list could not be parsed.
    #[error("Invalid weights: {0}. Use comma-separated numbers, e.g. 60,40.")]
    InvalidWeights(String),

    /// Missing required argument.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// The loader resolved none of the requested symbols.
    #[error("No price data found for any of: {0}")]
    NoPriceData(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
