//! Portfolio weight resolution.
//!
//! Raw weights are either left unspecified ([`Weights::Equal`]) or given
//! explicitly, one per symbol. [`Weights::resolve`] turns either form into a
//! vector of non-negative fractions summing to one.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use basket_core::Symbol;

use crate::error::{AnalyticsError, AnalyticsResult};

/// How the basket is weighted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Weights {
    /// `1/N` for each of `N` symbols.
    #[default]
    Equal,

    /// Raw weights, one per symbol, normalized before use.
    Explicit(Vec<f64>),
}

impl Weights {
    /// Resolves to `count` normalized weights.
    pub fn resolve(&self, count: usize) -> AnalyticsResult<Vec<f64>> {
        if count == 0 {
            return Err(AnalyticsError::EmptyTable);
        }
        match self {
            Weights::Equal => Ok(equal_weights(count)),
            Weights::Explicit(raw) => {
                if raw.len() != count {
                    return Err(AnalyticsError::WeightCountMismatch {
                        expected: count,
                        got: raw.len(),
                    });
                }
                normalize(raw)
            }
        }
    }

    /// Restricts explicit weights to the symbols a loader resolved.
    ///
    /// `requested` must line up with the raw weights. The weights of symbols
    /// absent from `resolved` are dropped, leaving the rest to be
    /// renormalized. Equal weighting is unaffected.
    pub fn for_resolved(&self, requested: &[Symbol], resolved: &[Symbol]) -> AnalyticsResult<Self> {
        match self {
            Weights::Equal => Ok(Weights::Equal),
            Weights::Explicit(raw) => {
                if raw.len() != requested.len() {
                    return Err(AnalyticsError::WeightCountMismatch {
                        expected: requested.len(),
                        got: raw.len(),
                    });
                }
                let kept = resolved
                    .iter()
                    .filter_map(|symbol| {
                        requested
                            .iter()
                            .position(|s| s == symbol)
                            .map(|index| raw[index])
                    })
                    .collect();
                Ok(Weights::Explicit(kept))
            }
        }
    }

    /// True for [`Weights::Equal`].
    #[must_use]
    pub fn is_equal(&self) -> bool {
        matches!(self, Weights::Equal)
    }
}

impl FromStr for Weights {
    type Err = String;

    /// Parses a comma-separated list of numbers. A blank string means equal weights.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Weights::Equal);
        }
        s.split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<f64>()
                    .map_err(|_| format!("'{part}' is not a number"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Weights::Explicit)
    }
}

/// `count` weights of `1/count` each.
#[must_use]
pub fn equal_weights(count: usize) -> Vec<f64> {
    vec![1.0 / count as f64; count]
}

/// Divides every weight by the sum of all weights.
///
/// Rejects negative or non-finite entries and a zero sum.
pub fn normalize(raw: &[f64]) -> AnalyticsResult<Vec<f64>> {
    if let Some((index, &value)) = raw
        .iter()
        .enumerate()
        .find(|(_, w)| !w.is_finite() || **w < 0.0)
    {
        return Err(AnalyticsError::InvalidWeight { index, value });
    }

    let total: f64 = raw.iter().sum();
    if total == 0.0 {
        return Err(AnalyticsError::ZeroWeightSum);
    }
    if !total.is_finite() {
        return Err(AnalyticsError::non_finite("weight sum"));
    }

    Ok(raw.iter().map(|w| w / total).collect())
}
