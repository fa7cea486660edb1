//! # Basket Ext File
//!
//! File-based price loaders for Basket.
//!
//! This crate provides [`PriceLoader`](basket_traits::PriceLoader)
//! implementations for offline and EOD use:
//! - [`CsvDirectoryLoader`]: one `<SYMBOL>.csv` per symbol (Yahoo-style exports)
//! - [`WideCsvLoader`]: one CSV with a column per symbol
//! - [`InMemoryLoader`]: histories supplied in code
//!
//! Every loader windows the history to the requested period and aligns
//! symbols on their common dates before returning.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod alignment;
mod market_data;

pub use alignment::{align, Series};
pub use market_data::*;

use std::path::Path;

use basket_traits::PriceLoader;

/// Create a file-based loader for `path`.
///
/// A directory yields a [`CsvDirectoryLoader`]; anything else is treated as
/// a wide CSV file.
pub fn create_file_loader(path: impl AsRef<Path>) -> Box<dyn PriceLoader> {
    let path = path.as_ref();
    if path.is_dir() {
        Box::new(CsvDirectoryLoader::new(path))
    } else {
        Box::new(WideCsvLoader::new(path))
    }
}
