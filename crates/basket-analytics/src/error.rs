//! Error types for return and risk analytics.
//!
//! Degenerate inputs that would otherwise yield NaN or infinity surface
//! here as named variants.

use thiserror::Error;

use basket_core::CoreError;

/// Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Errors that can occur during analytics computation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// Weight vector length differs from the number of symbols.
    #[error("Expected {expected} weights (one per symbol), got {got}")]
    WeightCountMismatch {
        /// Number of symbols.
        expected: usize,
        /// Number of weights supplied.
        got: usize,
    },

    /// Weights sum to zero, so they cannot be normalized.
    #[error("Weights sum to zero and cannot be normalized")]
    ZeroWeightSum,

    /// A raw weight was negative or not finite.
    #[error("Invalid weight at position {index}: {value}")]
    InvalidWeight {
        /// Zero-based position of the weight.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// No symbols to aggregate.
    #[error("Price table has no symbols")]
    EmptyTable,

    /// Fewer than two price rows, so no return can be formed.
    #[error("At least 2 price observations are required, got {got}")]
    InsufficientPrices {
        /// Number of price rows available.
        got: usize,
    },

    /// Zero return observations: the annualization horizon is zero years.
    #[error("No return observations: annualization over zero years is undefined")]
    NoObservations,

    /// Sample standard deviation needs at least two observations.
    #[error("Volatility needs at least 2 return observations, got {got}")]
    InsufficientObservations {
        /// Number of return observations available.
        got: usize,
    },

    /// Volatility is exactly zero: the Sharpe ratio is undefined.
    #[error("Volatility is zero: Sharpe ratio is undefined")]
    ZeroVolatility,

    /// A price was zero or negative, so the simple return is undefined.
    #[error("Non-positive price {price} for {symbol} on {date}")]
    NonPositivePrice {
        /// Column symbol.
        symbol: String,
        /// Row date.
        date: String,
        /// The offending price.
        price: f64,
    },

    /// A metric overflowed to a non-finite value.
    #[error("{metric} is not finite")]
    NonFinite {
        /// The metric that overflowed.
        metric: String,
    },

    /// A core domain value was malformed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl AnalyticsError {
    /// Create a non-finite result error.
    #[must_use]
    pub fn non_finite(metric: impl Into<String>) -> Self {
        Self::NonFinite {
            metric: metric.into(),
        }
    }
}
