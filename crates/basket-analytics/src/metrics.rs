//! Metrics aggregator.
//!
//! All values are fractions (0.05 = 5%). Scaling to percentages happens at
//! the presentation boundary.
//!
//! Annualization uses `years = observations / trading_days_per_year` with
//! no special case for windows shorter than a year, so short windows can
//! produce very large annualized figures.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::config::AnalyticsConfig;
use crate::error::{AnalyticsError, AnalyticsResult};

/// Return and risk figures for one return series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnMetrics {
    /// Final value of the cumulative return series.
    pub total_return: f64,
    /// Geometric one-year equivalent of `total_return`.
    pub annualized_return: f64,
    /// Annualized sample standard deviation of returns.
    pub volatility: f64,
    /// Number of return observations.
    pub observations: usize,
}

/// Last value of a cumulative return series.
pub fn total_return(cumulative: &[f64]) -> AnalyticsResult<f64> {
    cumulative
        .last()
        .copied()
        .ok_or(AnalyticsError::NoObservations)
}

/// Length of the series in years.
pub fn years(observations: usize, config: &AnalyticsConfig) -> AnalyticsResult<f64> {
    if observations == 0 || config.trading_days_per_year == 0 {
        return Err(AnalyticsError::NoObservations);
    }
    Ok(observations as f64 / f64::from(config.trading_days_per_year))
}

/// `(1 + total_return) ^ (1 / years) - 1`.
pub fn annualized_return(total_return: f64, years: f64) -> AnalyticsResult<f64> {
    if years <= 0.0 {
        return Err(AnalyticsError::NoObservations);
    }
    let annualized = (1.0 + total_return).powf(1.0 / years) - 1.0;
    if !annualized.is_finite() {
        return Err(AnalyticsError::non_finite("annualized return"));
    }
    Ok(annualized)
}

/// Sample (n - 1) standard deviation.
pub fn sample_std_dev(values: &[f64]) -> AnalyticsResult<f64> {
    let n = values.len();
    if n < 2 {
        return Err(AnalyticsError::InsufficientObservations { got: n });
    }
    let sd = values.std_dev();
    if !sd.is_finite() {
        return Err(AnalyticsError::non_finite("volatility"));
    }
    Ok(sd)
}

/// `sample_std_dev(returns) * sqrt(trading_days_per_year)`.
pub fn annualized_volatility(returns: &[f64], config: &AnalyticsConfig) -> AnalyticsResult<f64> {
    Ok(sample_std_dev(returns)? * config.volatility_scale())
}

/// Simplified Sharpe ratio: `(annualized_return - risk_free_rate) / volatility`.
///
/// With the default zero risk-free rate this is just return over risk, not
/// an excess-return Sharpe ratio. Zero volatility is rejected.
pub fn sharpe_ratio(
    annualized_return: f64,
    volatility: f64,
    config: &AnalyticsConfig,
) -> AnalyticsResult<f64> {
    if volatility == 0.0 {
        return Err(AnalyticsError::ZeroVolatility);
    }
    let sharpe = (annualized_return - config.risk_free_rate) / volatility;
    if !sharpe.is_finite() {
        return Err(AnalyticsError::non_finite("Sharpe ratio"));
    }
    Ok(sharpe)
}

/// Computes [`ReturnMetrics`] from a return series and its cumulative counterpart.
pub fn compute_metrics(
    returns: &[f64],
    cumulative: &[f64],
    config: &AnalyticsConfig,
) -> AnalyticsResult<ReturnMetrics> {
    let total = total_return(cumulative)?;
    let years = years(returns.len(), config)?;
    let annualized = annualized_return(total, years)?;
    let volatility = annualized_volatility(returns, config)?;

    Ok(ReturnMetrics {
        total_return: total,
        annualized_return: annualized,
        volatility,
        observations: returns.len(),
    })
}
