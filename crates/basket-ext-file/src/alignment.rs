//! Period windowing and date alignment shared by all loaders.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use tracing::{debug, warn};

use basket_core::{CoreError, Period, PriceTable, Symbol, SymbolResolution};
use basket_traits::error::{LoaderError, LoaderResult};
use basket_traits::market_data::LoadedPrices;

/// Raw per-symbol history keyed by date.
pub type Series = BTreeMap<NaiveDate, f64>;

/// Windows each series to `period` and inner-joins them on date.
///
/// `found` holds the histories a loader could read, in any order; requested
/// symbols absent from it, with no observations inside the window, or whose
/// history starts after the earliest windowed date of any other symbol, are
/// reported as missing. The window is anchored at the latest date seen
/// across all found series. Gaps inside the window are inner-joined away.
pub fn align(
    requested: &[Symbol],
    mut found: Vec<(Symbol, Series)>,
    period: &Period,
) -> LoaderResult<LoadedPrices> {
    let lookback = period.lookback().map_err(|e| match e {
        CoreError::InvalidPeriod { token } => LoaderError::UnsupportedPeriod(token),
        other => LoaderError::Core(other),
    })?;

    found.retain(|(symbol, series)| requested.contains(symbol) && !series.is_empty());

    let anchor = found
        .iter()
        .filter_map(|(_, series)| series.keys().next_back().copied())
        .max();
    if let Some(start) = anchor.and_then(|end| lookback.start_from(end)) {
        debug!(%period, %start, "applying period window");
        for (_, series) in &mut found {
            *series = series.split_off(&start);
        }
        found.retain(|(_, series)| !series.is_empty());
    }

    // Every kept series must cover the window start.
    let window_start = found
        .iter()
        .filter_map(|(_, series)| series.keys().next().copied())
        .min();
    if let Some(window_start) = window_start {
        found.retain(|(symbol, series)| match series.keys().next() {
            Some(first) if *first > window_start => {
                warn!(
                    %symbol,
                    %first,
                    %window_start,
                    "history starts after the window; symbol excluded"
                );
                false
            }
            _ => true,
        });
    }

    let available: Vec<Symbol> = found.iter().map(|(s, _)| s.clone()).collect();
    let resolution = SymbolResolution::partition(requested, &available);
    if !resolution.is_complete() {
        warn!(missing = ?resolution.missing, "symbols without price data were excluded");
    }

    let mut common: Option<BTreeSet<NaiveDate>> = None;
    for (_, series) in &found {
        let dates: BTreeSet<NaiveDate> = series.keys().copied().collect();
        common = Some(match common {
            None => dates,
            Some(acc) => acc.intersection(&dates).copied().collect(),
        });
    }
    let dates: Vec<NaiveDate> = common.unwrap_or_default().into_iter().collect();

    let columns = resolution
        .resolved
        .iter()
        .map(|symbol| {
            let series = found
                .iter()
                .find(|(s, _)| s == symbol)
                .map(|(_, series)| series)
                .ok_or_else(|| LoaderError::InvalidInput(format!("lost series for {symbol}")))?;
            let prices = dates.iter().map(|d| series[d]).collect();
            Ok((symbol.clone(), prices))
        })
        .collect::<LoaderResult<Vec<_>>>()?;

    for (symbol, series) in &found {
        if series.len() > dates.len() {
            debug!(
                %symbol,
                dropped = series.len() - dates.len(),
                "dates not shared by every symbol were dropped"
            );
        }
    }

    let table = PriceTable::from_columns(dates, columns)?;
    debug!(
        rows = table.len(),
        symbols = table.width(),
        "aligned price table"
    );
    Ok(LoadedPrices { table, resolution })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn sym(s: &str) -> Symbol {
        Symbol::parse(s).unwrap()
    }

    fn series(points: &[(NaiveDate, f64)]) -> Series {
        points.iter().copied().collect()
    }

    #[test]
    fn test_inner_join_on_common_dates() {
        let found = vec![
            (sym("A"), series(&[(d(1, 2), 1.0), (d(1, 3), 2.0), (d(1, 4), 3.0)])),
            (sym("B"), series(&[(d(1, 2), 10.0), (d(1, 4), 30.0)])),
        ];
        let loaded = align(&[sym("A"), sym("B")], found, &Period::new("max")).unwrap();

        assert_eq!(loaded.table.dates(), &[d(1, 2), d(1, 4)]);
        assert_eq!(loaded.table.column(&sym("A")), Some(vec![1.0, 3.0]));
        assert!(loaded.resolution.is_complete());
    }

    #[test]
    fn test_columns_follow_request_order() {
        let found = vec![
            (sym("A"), series(&[(d(1, 2), 1.0)])),
            (sym("B"), series(&[(d(1, 2), 2.0)])),
        ];
        let loaded = align(&[sym("B"), sym("A")], found, &Period::new("max")).unwrap();
        assert_eq!(loaded.table.symbols(), &[sym("B"), sym("A")]);
    }

    #[test]
    fn test_missing_symbols_reported() {
        let found = vec![(sym("A"), series(&[(d(1, 2), 1.0), (d(1, 3), 1.1)]))];
        let loaded = align(&[sym("A"), sym("ZZZ")], found, &Period::new("max")).unwrap();

        assert_eq!(loaded.resolution.resolved, vec![sym("A")]);
        assert_eq!(loaded.resolution.missing, vec![sym("ZZZ")]);
        assert_eq!(loaded.table.width(), 1);
    }

    #[test]
    fn test_period_window() {
        let found = vec![(
            sym("A"),
            series(&[
                (d(1, 2), 1.0),
                (d(2, 1), 2.0),
                (d(3, 1), 3.0),
                (d(3, 28), 4.0),
            ]),
        )];
        let loaded = align(&[sym("A")], found, &Period::new("1mo")).unwrap();
        assert_eq!(loaded.table.dates(), &[d(3, 1), d(3, 28)]);
    }

    #[test]
    fn test_stale_symbol_outside_window_is_missing() {
        let found = vec![
            (sym("OLD"), series(&[(d(1, 2), 1.0), (d(1, 3), 1.0)])),
            (sym("NEW"), series(&[(d(6, 3), 5.0), (d(6, 4), 5.5)])),
        ];
        let loaded = align(&[sym("OLD"), sym("NEW")], found, &Period::new("1mo")).unwrap();
        assert_eq!(loaded.resolution.resolved, vec![sym("NEW")]);
        assert_eq!(loaded.resolution.missing, vec![sym("OLD")]);
    }

    #[test]
    fn test_short_history_is_missing() {
        let found = vec![
            (sym("LONG"), series(&[(d(1, 2), 1.0), (d(1, 3), 1.1), (d(1, 4), 1.2)])),
            (sym("IPO"), series(&[(d(1, 3), 9.0), (d(1, 4), 9.5)])),
        ];
        let loaded = align(&[sym("LONG"), sym("IPO")], found, &Period::new("max")).unwrap();

        assert_eq!(loaded.resolution.resolved, vec![sym("LONG")]);
        assert_eq!(loaded.resolution.missing, vec![sym("IPO")]);
        assert_eq!(loaded.table.dates(), &[d(1, 2), d(1, 3), d(1, 4)]);
    }

    #[test]
    fn test_unsupported_period() {
        let err = align(&[sym("A")], vec![], &Period::new("forever")).unwrap_err();
        assert!(matches!(err, LoaderError::UnsupportedPeriod(ref t) if t == "forever"));
    }

    #[test]
    fn test_nothing_found() {
        let loaded = align(&[sym("A")], vec![], &Period::new("1y")).unwrap();
        assert!(loaded.is_empty());
        assert!(loaded.table.is_empty());
    }
}
