//! Price source traits.
//!
//! A [`PriceLoader`] turns a list of symbols and a period token into an
//! aligned [`PriceTable`]. Alignment across symbols is the loader's job;
//! analytics downstream assume every column covers every row.

use basket_core::{Period, PriceTable, Symbol, SymbolResolution};
use serde::{Deserialize, Serialize};

use crate::error::LoaderResult;

/// Source type for price data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    /// Snapshot/request-response (REST APIs)
    Snapshot,
    /// File-based (CSV)
    File,
    /// Held in memory (tests, demos)
    Memory,
}

/// Output of a [`PriceLoader`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPrices {
    /// Aligned adjusted closes. Columns are exactly `resolution.resolved`.
    pub table: PriceTable,
    /// Which requested symbols made it into the table.
    pub resolution: SymbolResolution,
}

impl LoadedPrices {
    /// True when the loader could not resolve any requested symbol.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resolution.resolved.is_empty()
    }
}

/// Trait for adjusted-close price providers.
pub trait PriceLoader: Send + Sync {
    /// Source type.
    fn source_type(&self) -> SourceType;

    /// Load adjusted closes for `symbols` over `period`.
    ///
    /// Symbols without data are reported in
    /// [`LoadedPrices::resolution`] rather than failing the call.
    fn load(&self, symbols: &[Symbol], period: &Period) -> LoaderResult<LoadedPrices>;
}

impl<T: PriceLoader + ?Sized> PriceLoader for Box<T> {
    fn source_type(&self) -> SourceType {
        (**self).source_type()
    }

    fn load(&self, symbols: &[Symbol], period: &Period) -> LoaderResult<LoadedPrices> {
        (**self).load(symbols, period)
    }
}
