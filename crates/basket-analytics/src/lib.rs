//! # Basket Analytics
//!
//! Historical performance analytics for a weighted basket of securities.
//!
//! Given an aligned [`PriceTable`](basket_core::PriceTable) of adjusted
//! closes and a [`Weights`] choice, this crate computes per-symbol and
//! portfolio return and risk figures plus the cumulative return curves
//! needed for charting.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: All calculations are stateless with explicit inputs
//! - **Fractions internally**: 0.05 means 5%; percentage scaling is left to presenters
//! - **Guarded degeneracies**: Zero observations, zero volatility and bad
//!   weights are named errors, never NaN or infinity
//!
//! ## Quick Start
//!
//! ```rust
//! use basket_analytics::prelude::*;
//! use basket_core::{PriceTable, Symbol};
//! use chrono::NaiveDate;
//!
//! let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
//! let prices = PriceTable::from_columns(
//!     vec![d(2), d(3), d(4), d(5)],
//!     vec![
//!         (Symbol::parse("AAPL").unwrap(), vec![185.0, 184.2, 181.9, 181.2]),
//!         (Symbol::parse("MSFT").unwrap(), vec![370.9, 370.6, 367.9, 367.7]),
//!     ],
//! )
//! .unwrap();
//!
//! let report = analyze(&prices, &Weights::Equal, &AnalyticsConfig::default()).unwrap();
//! assert_eq!(report.holdings.len(), 2);
//!
//! let chart = cumulative_return_chart(&report);
//! assert_eq!(chart.series.len(), 3);
//! ```
//!
//! ## Module Overview
//!
//! - [`weights`] - Equal or explicit weights, normalization
//! - [`returns`] - Simple, portfolio and cumulative returns
//! - [`metrics`] - Total/annualized return, volatility, simplified Sharpe ratio
//! - [`performance`] - The full prices-to-report pipeline
//! - [`chart`] - Cumulative return chart description

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod chart;
pub mod config;
pub mod error;
pub mod metrics;
pub mod performance;
pub mod returns;
pub mod weights;

// Re-export error types at crate root
pub use error::{AnalyticsError, AnalyticsResult};

pub use chart::{cumulative_return_chart, Chart, ChartSeries, LineStyle, PORTFOLIO_LABEL};
pub use config::{AnalyticsConfig, TRADING_DAYS_PER_YEAR};
pub use metrics::{
    annualized_return, annualized_volatility, compute_metrics, sample_std_dev, sharpe_ratio,
    total_return, years, ReturnMetrics,
};
pub use performance::{
    analyze, CumulativeReturns, PerformanceReport, PortfolioMetrics, SymbolMetrics,
};
pub use returns::{cumulative_returns, portfolio_returns, simple_returns, ReturnTable};
pub use weights::{equal_weights, normalize, Weights};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::chart::{cumulative_return_chart, Chart, ChartSeries, LineStyle};
    pub use crate::config::AnalyticsConfig;
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::performance::{analyze, PerformanceReport, PortfolioMetrics, SymbolMetrics};
    pub use crate::weights::Weights;
}
