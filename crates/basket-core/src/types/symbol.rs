//! Ticker symbols.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Ticker symbol, stored trimmed and upper-cased.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Parses a single ticker, trimming whitespace and normalizing case.
    ///
    /// Tickers may contain letters, digits, `.`, `-`, `^` and `=`
    /// (e.g. `BRK-B`, `^GSPC`, `EURUSD=X`).
    pub fn parse(raw: &str) -> CoreResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::invalid_symbol(raw, "empty ticker"));
        }
        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=')))
        {
            return Err(CoreError::invalid_symbol(
                raw,
                format!("unexpected character '{bad}'"),
            ));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Parses a comma-separated ticker list.
    ///
    /// Blank entries between commas are skipped. Symbols must be unique
    /// after normalization.
    pub fn parse_list(raw: &str) -> CoreResult<Vec<Self>> {
        let mut seen = HashSet::new();
        let mut symbols = Vec::new();
        for part in raw.split(',').filter(|p| !p.trim().is_empty()) {
            let symbol = Self::parse(part)?;
            if !seen.insert(symbol.clone()) {
                return Err(CoreError::DuplicateSymbol {
                    symbol: symbol.0,
                });
            }
            symbols.push(symbol);
        }
        if symbols.is_empty() {
            return Err(CoreError::invalid_symbol(raw, "no tickers given"));
        }
        Ok(symbols)
    }

    /// Get the symbol as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Symbol {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes() {
        assert_eq!(Symbol::parse("  aapl ").unwrap().as_str(), "AAPL");
        assert_eq!(Symbol::parse("brk-b").unwrap().as_str(), "BRK-B");
        assert_eq!(Symbol::parse("^gspc").unwrap().as_str(), "^GSPC");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Symbol::parse("   ").is_err());
        assert!(Symbol::parse("AA PL").is_err());
        assert!(Symbol::parse("AAPL;").is_err());
    }

    #[test]
    fn test_parse_list() {
        let symbols = Symbol::parse_list("aapl, msft ,GOOG").unwrap();
        let names: Vec<_> = symbols.iter().map(Symbol::as_str).collect();
        assert_eq!(names, vec!["AAPL", "MSFT", "GOOG"]);
    }

    #[test]
    fn test_parse_list_skips_blank_entries() {
        let symbols = Symbol::parse_list("spy,,qqq,").unwrap();
        assert_eq!(symbols.len(), 2);
    }

    #[test]
    fn test_parse_list_rejects_duplicates_after_normalization() {
        let err = Symbol::parse_list("spy, SPY").unwrap_err();
        assert_eq!(
            err,
            CoreError::DuplicateSymbol {
                symbol: "SPY".into()
            }
        );
    }

    #[test]
    fn test_parse_list_rejects_empty() {
        assert!(Symbol::parse_list(" , ").is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let symbol = Symbol::parse("msft").unwrap();
        let json = serde_json::to_string(&symbol).unwrap();
        assert_eq!(json, "\"MSFT\"");
    }
}
