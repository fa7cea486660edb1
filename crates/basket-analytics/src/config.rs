//! Configuration for performance analytics.

use serde::{Deserialize, Serialize};

/// Trading days assumed per calendar year.
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// Configuration for performance analytics computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Return observations per year, used to annualize return and volatility.
    pub trading_days_per_year: u32,

    /// Annual risk-free rate subtracted in the Sharpe ratio numerator.
    ///
    /// Defaults to zero, which gives the simplified
    /// `annualized_return / volatility` ratio.
    pub risk_free_rate: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
            risk_free_rate: 0.0,
        }
    }
}

impl AnalyticsConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of return observations per year.
    #[must_use]
    pub fn with_trading_days(mut self, days: u32) -> Self {
        self.trading_days_per_year = days;
        self
    }

    /// Sets the annual risk-free rate.
    #[must_use]
    pub fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    /// Annualization factor for volatility, `sqrt(trading_days_per_year)`.
    #[must_use]
    pub fn volatility_scale(&self) -> f64 {
        f64::from(self.trading_days_per_year).sqrt()
    }
}
