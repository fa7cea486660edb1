//! Which requested symbols a loader could resolve.

use serde::{Deserialize, Serialize};

use super::Symbol;

/// Split of a request's symbols into resolved and missing.
///
/// Both lists keep the order in which the symbols were requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolResolution {
    /// Symbols with usable price history.
    pub resolved: Vec<Symbol>,
    /// Symbols the loader had no data for.
    pub missing: Vec<Symbol>,
}

impl SymbolResolution {
    /// Partitions `requested` by membership in `available`.
    #[must_use]
    pub fn partition(requested: &[Symbol], available: &[Symbol]) -> Self {
        let (resolved, missing) = requested
            .iter()
            .cloned()
            .partition(|s| available.contains(s));
        Self { resolved, missing }
    }

    /// True when every requested symbol was resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}
