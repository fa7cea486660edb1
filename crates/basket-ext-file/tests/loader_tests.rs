//! File loader tests against real files on disk.

use std::fs;
use std::path::Path;

use basket_core::{Period, Symbol};
use basket_ext_file::{create_file_loader, CsvDirectoryLoader, InMemoryLoader, WideCsvLoader};
use basket_traits::{LoaderError, PriceLoader, SourceType};
use chrono::NaiveDate;
use tempfile::TempDir;

fn sym(s: &str) -> Symbol {
    Symbol::parse(s).unwrap()
}

fn d(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn yahoo_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "AAPL.csv",
        "Date,Open,High,Low,Close,Adj Close,Volume\n\
         2024-01-02,187.15,188.44,183.89,185.64,184.94,82488700\n\
         2024-01-03,184.22,185.88,183.43,184.25,183.55,58414500\n\
         2024-01-04,182.15,183.09,180.88,181.91,181.22,71983600\n\
         2024-01-05,181.99,182.76,180.17,181.18,180.50,62303300\n",
    );
    write(
        dir.path(),
        "MSFT.csv",
        "Date,Close\n\
         2024-01-02,370.87\n\
         2024-01-03,370.60\n\
         2024-01-05,367.75\n",
    );
    dir
}

#[test]
fn test_directory_loader_aligns_and_prefers_adjusted_close() {
    let dir = yahoo_dir();
    let loader = CsvDirectoryLoader::new(dir.path());
    assert_eq!(loader.source_type(), SourceType::File);

    let loaded = loader
        .load(&[sym("aapl"), sym("MSFT")], &Period::new("max"))
        .unwrap();

    // MSFT has no 2024-01-04 row, so that date is dropped for everyone
    assert_eq!(loaded.table.dates(), &[d(1, 2), d(1, 3), d(1, 5)]);
    assert_eq!(
        loaded.table.column(&sym("AAPL")),
        Some(vec![184.94, 183.55, 180.50])
    );
    assert_eq!(
        loaded.table.column(&sym("MSFT")),
        Some(vec![370.87, 370.60, 367.75])
    );
    assert!(loaded.resolution.is_complete());
}

#[test]
fn test_directory_loader_reports_missing_symbol() {
    let dir = yahoo_dir();
    let loader = CsvDirectoryLoader::new(dir.path());
    let loaded = loader
        .load(&[sym("AAPL"), sym("NOPE")], &Period::new("1y"))
        .unwrap();

    assert_eq!(loaded.resolution.resolved, vec![sym("AAPL")]);
    assert_eq!(loaded.resolution.missing, vec![sym("NOPE")]);
    assert_eq!(loaded.table.width(), 1);
    assert_eq!(loaded.table.len(), 4);
}

#[test]
fn test_directory_loader_period_window() {
    let dir = yahoo_dir();
    let loader = CsvDirectoryLoader::new(dir.path());
    let loaded = loader.load(&[sym("AAPL")], &Period::new("2d")).unwrap();
    assert_eq!(loaded.table.dates(), &[d(1, 3), d(1, 4), d(1, 5)]);
}

#[test]
fn test_directory_loader_skips_null_rows() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "XYZ.csv",
        "Date,Adj Close\n2024-01-02,10.0\n2024-01-03,null\n2024-01-04,11.0\n",
    );
    let loaded = CsvDirectoryLoader::new(dir.path())
        .load(&[sym("XYZ")], &Period::new("max"))
        .unwrap();
    assert_eq!(loaded.table.dates(), &[d(1, 2), d(1, 4)]);
}

#[test]
fn test_directory_loader_rejects_bad_price() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "XYZ.csv", "Date,Close\n2024-01-02,ten\n");
    let err = CsvDirectoryLoader::new(dir.path())
        .load(&[sym("XYZ")], &Period::new("max"))
        .unwrap_err();
    assert!(matches!(err, LoaderError::ParseError(_)));
}

#[test]
fn test_directory_loader_requires_price_column() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "XYZ.csv", "Date,Volume\n2024-01-02,100\n");
    let err = CsvDirectoryLoader::new(dir.path())
        .load(&[sym("XYZ")], &Period::new("max"))
        .unwrap_err();
    assert!(err.to_string().contains("Close"));
}

#[test]
fn test_directory_loader_missing_directory() {
    let err = CsvDirectoryLoader::new("/definitely/not/here")
        .load(&[sym("A")], &Period::new("1y"))
        .unwrap_err();
    assert!(matches!(err, LoaderError::SourceNotAvailable(_)));
}

#[test]
fn test_unsupported_period_is_rejected() {
    let dir = yahoo_dir();
    let err = CsvDirectoryLoader::new(dir.path())
        .load(&[sym("AAPL")], &Period::new("fortnight"))
        .unwrap_err();
    assert!(matches!(err, LoaderError::UnsupportedPeriod(_)));
}

#[test]
fn test_late_listing_is_dropped_instead_of_shrinking_window() {
    let long: Vec<_> = (2..=20).map(|day| (d(1, day), 100.0 + f64::from(day))).collect();
    let ipo: Vec<_> = (18..=20).map(|day| (d(1, day), 10.0 + f64::from(day))).collect();
    let loader = InMemoryLoader::new()
        .with_series(sym("LONG"), long)
        .with_series(sym("IPO"), ipo);

    let loaded = loader
        .load(&[sym("LONG"), sym("IPO")], &Period::new("max"))
        .unwrap();

    assert_eq!(loaded.resolution.resolved, vec![sym("LONG")]);
    assert_eq!(loaded.resolution.missing, vec![sym("IPO")]);
    assert_eq!(loaded.table.len(), 19);
    assert_eq!(loaded.table.dates().first(), Some(&d(1, 2)));
}

#[test]
fn test_late_listing_inside_short_window_is_kept() {
    let long: Vec<_> = (2..=20).map(|day| (d(1, day), 100.0 + f64::from(day))).collect();
    let ipo: Vec<_> = (18..=20).map(|day| (d(1, day), 10.0 + f64::from(day))).collect();
    let loader = InMemoryLoader::new()
        .with_series(sym("LONG"), long)
        .with_series(sym("IPO"), ipo);

    let loaded = loader
        .load(&[sym("LONG"), sym("IPO")], &Period::new("2d"))
        .unwrap();

    assert!(loaded.resolution.is_complete());
    assert_eq!(loaded.table.dates(), &[d(1, 18), d(1, 19), d(1, 20)]);
}

#[test]
fn test_wide_loader() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prices.csv");
    fs::write(
        &path,
        "Date,SPY,tlt,GLD\n\
         2024-01-02,472.65,98.10,190.70\n\
         2024-01-03,468.79,97.50,189.50\n\
         2024-01-04,467.28,,189.65\n\
         2024-01-05,467.92,96.80,189.10\n",
    )
    .unwrap();

    let loader = WideCsvLoader::new(&path);
    let loaded = loader
        .load(&[sym("SPY"), sym("TLT"), sym("IWM")], &Period::new("max"))
        .unwrap();

    assert_eq!(loaded.table.symbols(), &[sym("SPY"), sym("TLT")]);
    assert_eq!(loaded.resolution.missing, vec![sym("IWM")]);
    assert_eq!(loaded.table.dates(), &[d(1, 2), d(1, 3), d(1, 5)]);
    assert_eq!(loaded.table.column(&sym("TLT")), Some(vec![98.10, 97.50, 96.80]));
}

#[test]
fn test_wide_loader_missing_file() {
    let err = WideCsvLoader::new("/no/such/prices.csv")
        .load(&[sym("SPY")], &Period::new("max"))
        .unwrap_err();
    assert!(matches!(err, LoaderError::SourceNotAvailable(_)));
}

#[test]
fn test_create_file_loader_dispatch() {
    let dir = yahoo_dir();
    let loader = create_file_loader(dir.path());
    let loaded = loader.load(&[sym("AAPL")], &Period::new("max")).unwrap();
    assert_eq!(loaded.table.len(), 4);
}
