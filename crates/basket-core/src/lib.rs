//! # Basket Core
//!
//! Core types for the Basket portfolio performance library.
//!
//! This crate provides the building blocks shared by every other Basket crate:
//!
//! - **Types**: [`Symbol`], [`Period`], [`PriceTable`], [`SymbolResolution`]
//! - **Errors**: [`CoreError`] for malformed domain values
//!
//! ## Design Philosophy
//!
//! - **Type Safety**: Newtypes keep tickers and period tokens apart from plain strings
//! - **Validated Construction**: A `PriceTable` is rectangular and date-ordered once built
//! - **Explicit Over Implicit**: Unresolved symbols are reported, never inferred
//!
//! ## Example
//!
//! ```rust
//! use basket_core::prelude::*;
//! use chrono::NaiveDate;
//!
//! let symbols = Symbol::parse_list(" aapl, msft ").unwrap();
//! assert_eq!(symbols[0].as_str(), "AAPL");
//!
//! let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
//! let table = PriceTable::new(
//!     vec![d(2), d(3)],
//!     symbols,
//!     vec![vec![100.0, 50.0], vec![101.0, 49.5]],
//! )
//! .unwrap();
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.width(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Lookback, Period, PriceTable, Symbol, SymbolResolution};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Lookback, Period, PriceTable, Symbol, SymbolResolution};
