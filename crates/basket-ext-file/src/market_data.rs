//! File-based price loaders.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info};

use basket_core::{Period, Symbol};
use basket_traits::error::{LoaderError, LoaderResult};
use basket_traits::market_data::{LoadedPrices, PriceLoader, SourceType};

use crate::alignment::{align, Series};

/// Accepted date layouts, tried in order.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    // Timestamps like "2024-01-02 00:00:00-05:00" keep the date part only.
    let raw = raw.split([' ', 'T']).next().unwrap_or(raw);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Parses a price cell. Blank, `null` and `NaN` cells are gaps.
fn parse_price(raw: &str, file: &Path, line: u64) -> LoaderResult<Option<f64>> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("null") || raw.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    raw.parse::<f64>().map(Some).map_err(|_| {
        LoaderError::ParseError(format!(
            "{}:{}: '{}' is not a price",
            file.display(),
            line,
            raw
        ))
    })
}

fn header_index(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    names.iter().find_map(|name| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    })
}

fn open_reader(path: &Path) -> LoaderResult<csv::Reader<std::fs::File>> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| LoaderError::IoError(format!("{}: {}", path.display(), e)))
}

// =============================================================================
// CSV DIRECTORY LOADER
// =============================================================================

/// Reads one CSV file per symbol from a directory.
///
/// Each file is named `<SYMBOL>.csv` and has a `Date` column plus an
/// `Adj Close` column (`Close` is used when there is no adjusted column).
/// Symbols without a file are reported as missing.
pub struct CsvDirectoryLoader {
    dir: PathBuf,
}

impl CsvDirectoryLoader {
    /// Create a loader rooted at `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the price file for `symbol`.
    pub fn path_for(&self, symbol: &Symbol) -> PathBuf {
        self.dir.join(format!("{}.csv", symbol.as_str()))
    }

    fn read_series(&self, path: &Path) -> LoaderResult<Series> {
        let mut reader = open_reader(path)?;
        let headers = reader
            .headers()
            .map_err(|e| LoaderError::ParseError(format!("{}: {}", path.display(), e)))?
            .clone();

        let date_col = header_index(&headers, &["Date", "Datetime"]).ok_or_else(|| {
            LoaderError::ParseError(format!("{}: no Date column", path.display()))
        })?;
        let price_col = header_index(&headers, &["Adj Close", "Adj_Close", "adjclose", "Close"])
            .ok_or_else(|| {
                LoaderError::ParseError(format!("{}: no Adj Close or Close column", path.display()))
            })?;

        let mut series = Series::new();
        for (i, record) in reader.records().enumerate() {
            let record = record.map_err(|e| LoaderError::ParseError(e.to_string()))?;
            let line = i as u64 + 2;
            let Some(date) = record.get(date_col).and_then(parse_date) else {
                return Err(LoaderError::ParseError(format!(
                    "{}:{}: unreadable date",
                    path.display(),
                    line
                )));
            };
            if let Some(price) = parse_price(record.get(price_col).unwrap_or(""), path, line)? {
                series.insert(date, price);
            }
        }
        Ok(series)
    }
}

impl PriceLoader for CsvDirectoryLoader {
    fn source_type(&self) -> SourceType {
        SourceType::File
    }

    fn load(&self, symbols: &[Symbol], period: &Period) -> LoaderResult<LoadedPrices> {
        if !self.dir.is_dir() {
            return Err(LoaderError::SourceNotAvailable(format!(
                "{} is not a directory",
                self.dir.display()
            )));
        }

        let mut found = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let path = self.path_for(symbol);
            if !path.exists() {
                debug!(%symbol, path = %path.display(), "no price file");
                continue;
            }
            let series = self.read_series(&path)?;
            info!(%symbol, rows = series.len(), "loaded price history");
            found.push((symbol.clone(), series));
        }

        align(symbols, found, period)
    }
}

// =============================================================================
// WIDE CSV LOADER
// =============================================================================

/// Reads a single CSV with a `Date` column and one price column per symbol.
///
/// Column headers are matched to symbols case-insensitively. Empty cells
/// are gaps in that symbol's history.
pub struct WideCsvLoader {
    file_path: PathBuf,
}

impl WideCsvLoader {
    /// Create a loader for `file_path`.
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }
}

impl PriceLoader for WideCsvLoader {
    fn source_type(&self) -> SourceType {
        SourceType::File
    }

    fn load(&self, symbols: &[Symbol], period: &Period) -> LoaderResult<LoadedPrices> {
        if !self.file_path.exists() {
            return Err(LoaderError::SourceNotAvailable(format!(
                "{} not found",
                self.file_path.display()
            )));
        }

        let path = self.file_path.as_path();
        let mut reader = open_reader(path)?;
        let headers = reader
            .headers()
            .map_err(|e| LoaderError::ParseError(format!("{}: {}", path.display(), e)))?
            .clone();
        let date_col = header_index(&headers, &["Date", "Datetime"]).ok_or_else(|| {
            LoaderError::ParseError(format!("{}: no Date column", path.display()))
        })?;

        let columns: Vec<(Symbol, usize)> = symbols
            .iter()
            .filter_map(|symbol| {
                header_index(&headers, &[symbol.as_str()]).map(|col| (symbol.clone(), col))
            })
            .collect();

        let mut series: HashMap<Symbol, Series> = HashMap::new();
        for (i, record) in reader.records().enumerate() {
            let record = record.map_err(|e| LoaderError::ParseError(e.to_string()))?;
            let line = i as u64 + 2;
            let Some(date) = record.get(date_col).and_then(parse_date) else {
                return Err(LoaderError::ParseError(format!(
                    "{}:{}: unreadable date",
                    path.display(),
                    line
                )));
            };
            for (symbol, col) in &columns {
                if let Some(price) = parse_price(record.get(*col).unwrap_or(""), path, line)? {
                    series.entry(symbol.clone()).or_default().insert(date, price);
                }
            }
        }
        info!(
            path = %path.display(),
            symbols = series.len(),
            "loaded wide price file"
        );

        align(symbols, series.into_iter().collect(), period)
    }
}

// =============================================================================
// IN-MEMORY LOADER
// =============================================================================

/// Price histories held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLoader {
    series: HashMap<Symbol, Series>,
}

impl InMemoryLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the history for `symbol`.
    #[must_use]
    pub fn with_series(mut self, symbol: Symbol, points: impl IntoIterator<Item = (NaiveDate, f64)>) -> Self {
        self.series.insert(symbol, points.into_iter().collect());
        self
    }
}

impl PriceLoader for InMemoryLoader {
    fn source_type(&self) -> SourceType {
        SourceType::Memory
    }

    fn load(&self, symbols: &[Symbol], period: &Period) -> LoaderResult<LoadedPrices> {
        let found = symbols
            .iter()
            .filter_map(|s| self.series.get(s).map(|series| (s.clone(), series.clone())))
            .collect();
        align(symbols, found, period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 2);
        assert_eq!(parse_date("2024-01-02"), expected);
        assert_eq!(parse_date("2024/01/02"), expected);
        assert_eq!(parse_date("01/02/2024"), expected);
        assert_eq!(parse_date("2024-01-02 00:00:00-05:00"), expected);
        assert_eq!(parse_date("2024-01-02T00:00:00Z"), expected);
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn test_parse_price_gaps() {
        let path = Path::new("x.csv");
        assert_eq!(parse_price("", path, 2).unwrap(), None);
        assert_eq!(parse_price("null", path, 2).unwrap(), None);
        assert_eq!(parse_price("NaN", path, 2).unwrap(), None);
        assert_eq!(parse_price(" 101.5 ", path, 2).unwrap(), Some(101.5));
        assert!(parse_price("n/a", path, 2).is_err());
    }

    #[test]
    fn test_in_memory_loader() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        let spy = Symbol::parse("SPY").unwrap();
        let loader = InMemoryLoader::new().with_series(spy.clone(), vec![(d(2), 470.0), (d(3), 468.8)]);

        let loaded = loader
            .load(&[spy.clone(), Symbol::parse("QQQ").unwrap()], &Period::new("max"))
            .unwrap();
        assert_eq!(loader.source_type(), SourceType::Memory);
        assert_eq!(loaded.table.column(&spy), Some(vec![470.0, 468.8]));
        assert_eq!(loaded.resolution.missing.len(), 1);
    }
}
