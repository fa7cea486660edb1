//! Date-indexed table of adjusted closing prices.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::Symbol;
use crate::error::{CoreError, CoreResult};

/// Adjusted closing prices, one row per trading date and one column per symbol.
///
/// Invariants enforced at construction:
/// - dates are strictly ascending
/// - symbols are unique
/// - every row has exactly one finite price per symbol
///
/// A single-symbol table is still a one-column table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    dates: Vec<NaiveDate>,
    symbols: Vec<Symbol>,
    rows: Vec<Vec<f64>>,
}

impl PriceTable {
    /// Builds a table from row-major data.
    pub fn new(dates: Vec<NaiveDate>, symbols: Vec<Symbol>, rows: Vec<Vec<f64>>) -> CoreResult<Self> {
        if dates.len() != rows.len() {
            return Err(CoreError::invalid_table(format!(
                "{} dates but {} rows",
                dates.len(),
                rows.len()
            )));
        }

        if let Some(pair) = dates.windows(2).find(|w| w[0] >= w[1]) {
            return Err(CoreError::invalid_table(format!(
                "dates not strictly ascending at {}",
                pair[1]
            )));
        }

        let mut seen = HashSet::with_capacity(symbols.len());
        for symbol in &symbols {
            if !seen.insert(symbol) {
                return Err(CoreError::DuplicateSymbol {
                    symbol: symbol.to_string(),
                });
            }
        }

        for (date, row) in dates.iter().zip(&rows) {
            if row.len() != symbols.len() {
                return Err(CoreError::invalid_table(format!(
                    "row {} has {} prices for {} symbols",
                    date,
                    row.len(),
                    symbols.len()
                )));
            }
            if let Some(col) = row.iter().position(|p| !p.is_finite()) {
                return Err(CoreError::NonFinitePrice {
                    symbol: symbols[col].to_string(),
                    date: date.to_string(),
                });
            }
        }

        Ok(Self {
            dates,
            symbols,
            rows,
        })
    }

    /// Builds a table from per-symbol columns sharing one date index.
    pub fn from_columns(dates: Vec<NaiveDate>, columns: Vec<(Symbol, Vec<f64>)>) -> CoreResult<Self> {
        if let Some((symbol, col)) = columns.iter().find(|(_, c)| c.len() != dates.len()) {
            return Err(CoreError::invalid_table(format!(
                "column {} has {} prices for {} dates",
                symbol,
                col.len(),
                dates.len()
            )));
        }

        let rows = (0..dates.len())
            .map(|i| columns.iter().map(|(_, col)| col[i]).collect())
            .collect();
        let symbols = columns.into_iter().map(|(s, _)| s).collect();
        Self::new(dates, symbols, rows)
    }

    /// Trading dates, ascending.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Column symbols in table order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Prices for every symbol on the `index`-th date.
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Iterates over rows in date order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Position of `symbol` among the columns.
    pub fn column_index(&self, symbol: &Symbol) -> Option<usize> {
        self.symbols.iter().position(|s| s == symbol)
    }

    /// Price series for a single symbol.
    pub fn column(&self, symbol: &Symbol) -> Option<Vec<f64>> {
        let col = self.column_index(symbol)?;
        Some(self.rows.iter().map(|row| row[col]).collect())
    }

    /// Number of dates (rows).
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Number of symbols (columns).
    pub fn width(&self) -> usize {
        self.symbols.len()
    }

    /// True when the table has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.symbols.is_empty()
    }

}
