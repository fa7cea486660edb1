//! Error types for the Basket core types.
//!
//! Every constructor that validates its input reports failures through
//! [`CoreError`].

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building core domain values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Ticker symbol was empty or contained invalid characters.
    #[error("Invalid symbol '{symbol}': {reason}")]
    InvalidSymbol {
        /// The offending input.
        symbol: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The same symbol appeared twice in one request.
    #[error("Duplicate symbol: {symbol}")]
    DuplicateSymbol {
        /// The repeated symbol.
        symbol: String,
    },

    /// Period token could not be interpreted as a lookback window.
    #[error("Unrecognized period '{token}'. Use forms like 5d, 1wk, 6mo, 3y, ytd or max.")]
    InvalidPeriod {
        /// The offending token.
        token: String,
    },

    /// Price table has an inconsistent shape.
    #[error("Invalid price table: {reason}")]
    InvalidTable {
        /// Description of the inconsistency.
        reason: String,
    },

    /// A price cell was NaN or infinite.
    #[error("Non-finite price for {symbol} on {date}")]
    NonFinitePrice {
        /// Column symbol.
        symbol: String,
        /// Row date.
        date: String,
    },
}

impl CoreError {
    /// Create an invalid symbol error.
    #[must_use]
    pub fn invalid_symbol(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSymbol {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid table error.
    #[must_use]
    pub fn invalid_table(reason: impl Into<String>) -> Self {
        Self::InvalidTable {
            reason: reason.into(),
        }
    }
}
