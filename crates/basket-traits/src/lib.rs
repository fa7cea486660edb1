//! # Basket Traits
//!
//! Trait definitions for the data sources Basket reads from.
//!
//! This crate contains ONLY trait definitions and the types they exchange.
//! Implementations live in extension crates such as `basket-ext-file`.
//!
//! ## Module Structure
//!
//! - [`market_data`]: The [`PriceLoader`] seam and the [`LoadedPrices`] it returns
//! - [`error`]: [`LoaderError`]
//!
//! ## Dependency Injection
//!
//! Callers depend on `&dyn PriceLoader` and pick the implementation at the edge:
//!
//! ```ignore
//! let loader: Box<dyn PriceLoader> = Box::new(CsvDirectoryLoader::new("data"));
//! let loaded = loader.load(&symbols, &period)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod market_data;

// Re-export commonly used types
pub use error::{LoaderError, LoaderResult};
pub use market_data::{LoadedPrices, PriceLoader, SourceType};
