//! CLI command implementations.

pub mod analyze;
pub mod config;

pub use analyze::AnalyzeArgs;
pub use config::ConfigArgs;

use basket_analytics::Weights;
use basket_core::Symbol;

use crate::error::{CliError, CliResult};

/// Parses a comma-separated ticker list.
pub fn parse_tickers(s: &str) -> CliResult<Vec<Symbol>> {
    Symbol::parse_list(s).map_err(|e| CliError::InvalidTickers(e.to_string()))
}

/// Parses a comma-separated weight list and checks it fits `symbols`.
///
/// Blank means equal weights. Explicit weights must be one per symbol,
/// non-negative, and not all zero.
pub fn parse_weights(s: &str, symbols: &[Symbol]) -> CliResult<Weights> {
    let weights: Weights = s.parse().map_err(CliError::InvalidWeights)?;
    weights
        .resolve(symbols.len())
        .map_err(|e| CliError::InvalidWeights(e.to_string()))?;
    Ok(weights)
}
