//! Return engine.
//!
//! Converts a [`PriceTable`] into simple per-period returns, weighted
//! portfolio returns and compounded cumulative returns.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use basket_core::{PriceTable, Symbol};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Simple returns with the same columns as the source price table and one
/// row fewer.
///
/// Row `t` holds `(price[t+1] - price[t]) / price[t]` and is dated at
/// `price` row `t+1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnTable {
    dates: Vec<NaiveDate>,
    symbols: Vec<Symbol>,
    rows: Vec<Vec<f64>>,
}

impl ReturnTable {
    /// Dates of each return observation.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Column symbols in table order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Returns of every symbol on the `index`-th observation.
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Iterates over rows in date order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Return series of the `index`-th column.
    pub fn column(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.symbols.len() {
            return None;
        }
        Some(self.rows.iter().map(|row| row[index]).collect())
    }

    /// Every column as `(symbol, returns)`, in table order.
    pub fn columns(&self) -> Vec<(Symbol, Vec<f64>)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), self.rows.iter().map(|row| row[i]).collect()))
            .collect()
    }

    /// Number of return observations (rows).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Number of symbols (columns).
    pub fn width(&self) -> usize {
        self.symbols.len()
    }

    /// True when there are no observations.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Per-symbol simple returns.
///
/// Requires at least two price rows and strictly positive prices.
pub fn simple_returns(prices: &PriceTable) -> AnalyticsResult<ReturnTable> {
    if prices.width() == 0 {
        return Err(AnalyticsError::EmptyTable);
    }
    if prices.len() < 2 {
        return Err(AnalyticsError::InsufficientPrices { got: prices.len() });
    }

    let dates = prices.dates();
    let symbols = prices.symbols();
    let price_rows: Vec<&[f64]> = prices.rows().collect();

    for (date, row) in dates.iter().zip(&price_rows) {
        if let Some(col) = row.iter().position(|p| *p <= 0.0) {
            return Err(AnalyticsError::NonPositivePrice {
                symbol: symbols[col].to_string(),
                date: date.to_string(),
                price: row[col],
            });
        }
    }

    let rows = price_rows
        .windows(2)
        .map(|pair| {
            pair[0]
                .iter()
                .zip(pair[1])
                .map(|(prev, curr)| (curr - prev) / prev)
                .collect()
        })
        .collect();

    Ok(ReturnTable {
        dates: dates[1..].to_vec(),
        symbols: symbols.to_vec(),
        rows,
    })
}

/// Weighted sum of each return row.
///
/// `weights` must already be normalized and line up with the table columns.
pub fn portfolio_returns(returns: &ReturnTable, weights: &[f64]) -> AnalyticsResult<Vec<f64>> {
    if weights.len() != returns.width() {
        return Err(AnalyticsError::WeightCountMismatch {
            expected: returns.width(),
            got: weights.len(),
        });
    }

    Ok(returns
        .rows()
        .map(|row| row.iter().zip(weights).map(|(r, w)| r * w).sum())
        .collect())
}

/// Running product of `(1 + r)` minus one.
///
/// The first element equals the first return.
#[must_use]
pub fn cumulative_returns(returns: &[f64]) -> Vec<f64> {
    returns
        .iter()
        .scan(1.0, |growth, r| {
            *growth *= 1.0 + r;
            Some(*growth - 1.0)
        })
        .collect()
}
