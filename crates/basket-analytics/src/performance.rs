//! End-to-end performance computation for a weighted basket.
//!
//! Data flows one way: prices → returns → cumulative returns → metrics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use basket_core::{PriceTable, Symbol};

use crate::config::AnalyticsConfig;
use crate::error::AnalyticsResult;
use crate::metrics::{compute_metrics, sharpe_ratio, ReturnMetrics};
use crate::returns::{cumulative_returns, portfolio_returns, simple_returns};
use crate::weights::Weights;

/// Metrics for one symbol in the basket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolMetrics {
    /// The symbol.
    pub symbol: Symbol,
    /// Normalized weight (fraction of the basket).
    pub weight: f64,
    /// Return and risk of the symbol on its own.
    pub metrics: ReturnMetrics,
}

/// Metrics for the weighted basket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    /// Return and risk of the weighted return series.
    pub metrics: ReturnMetrics,
    /// Simplified Sharpe ratio, see [`crate::metrics::sharpe_ratio`].
    pub sharpe_ratio: f64,
}

/// Cumulative return curves sharing one date axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeReturns {
    /// Date of each return observation.
    pub dates: Vec<NaiveDate>,
    /// One curve per symbol, in table order.
    pub holdings: Vec<(Symbol, Vec<f64>)>,
    /// The weighted basket's curve.
    pub portfolio: Vec<f64>,
}

/// Everything computed for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    /// Basket-level metrics.
    pub portfolio: PortfolioMetrics,
    /// Per-symbol metrics, in table order.
    pub holdings: Vec<SymbolMetrics>,
    /// Cumulative return curves for charting.
    pub cumulative: CumulativeReturns,
}

impl PerformanceReport {
    /// First and last return dates.
    #[must_use]
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let dates = &self.cumulative.dates;
        Some((*dates.first()?, *dates.last()?))
    }

    /// Metrics for `symbol`, if it is part of the basket.
    #[must_use]
    pub fn holding(&self, symbol: &Symbol) -> Option<&SymbolMetrics> {
        self.holdings.iter().find(|h| &h.symbol == symbol)
    }
}

/// Computes the full performance report for `prices` weighted by `weights`.
///
/// `weights` must line up with the table's columns. Any degenerate input
/// (too few observations, zero portfolio volatility, malformed weights)
/// aborts the whole report.
pub fn analyze(
    prices: &PriceTable,
    weights: &Weights,
    config: &AnalyticsConfig,
) -> AnalyticsResult<PerformanceReport> {
    let normalized = weights.resolve(prices.width())?;
    let returns = simple_returns(prices)?;
    debug!(
        symbols = returns.width(),
        observations = returns.len(),
        "computed simple returns"
    );

    let mut holdings = Vec::with_capacity(returns.width());
    let mut curves = Vec::with_capacity(returns.width());
    for ((symbol, series), weight) in returns.columns().into_iter().zip(&normalized) {
        let cumulative = cumulative_returns(&series);
        let metrics = compute_metrics(&series, &cumulative, config)?;
        debug!(
            %symbol,
            weight,
            total_return = metrics.total_return,
            volatility = metrics.volatility,
            "symbol metrics"
        );
        holdings.push(SymbolMetrics {
            symbol: symbol.clone(),
            weight: *weight,
            metrics,
        });
        curves.push((symbol, cumulative));
    }

    let port_returns = portfolio_returns(&returns, &normalized)?;
    let port_cumulative = cumulative_returns(&port_returns);
    let port_metrics = compute_metrics(&port_returns, &port_cumulative, config)?;
    let sharpe = sharpe_ratio(port_metrics.annualized_return, port_metrics.volatility, config)?;
    debug!(
        total_return = port_metrics.total_return,
        annualized_return = port_metrics.annualized_return,
        volatility = port_metrics.volatility,
        sharpe,
        "portfolio metrics"
    );

    Ok(PerformanceReport {
        portfolio: PortfolioMetrics {
            metrics: port_metrics,
            sharpe_ratio: sharpe,
        },
        holdings,
        cumulative: CumulativeReturns {
            dates: returns.dates().to_vec(),
            holdings: curves,
            portfolio: port_cumulative,
        },
    })
}
