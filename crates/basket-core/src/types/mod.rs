//! Domain types for Basket.

mod period;
mod price_table;
mod resolution;
mod symbol;

pub use period::{Lookback, Period};
pub use price_table::PriceTable;
pub use resolution::SymbolResolution;
pub use symbol::Symbol;
