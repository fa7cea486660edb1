//! Analyze command implementation.
//!
//! Loads prices for a basket, computes return, risk and Sharpe ratio, and
//! writes the cumulative return chart.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;
use tracing::{info, warn};

use basket_analytics::{
    analyze, cumulative_return_chart, AnalyticsConfig, PerformanceReport, ReturnMetrics, Weights,
};
use basket_core::{Period, Symbol};
use basket_ext_file::create_file_loader;
use basket_traits::LoadedPrices;

use crate::chart::render_svg;
use crate::cli::OutputFormat;
use crate::commands::{parse_tickers, parse_weights};
use crate::error::CliError;
use crate::output::{
    format_percent, percent_value, print_header, print_info, print_note, print_warning, KeyValue,
};
use crate::prompt;
use crate::settings::{SettingKey, Settings};

/// Arguments for the analyze command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Comma-separated tickers, e.g. AAPL,MSFT,GOOG. Prompted for when omitted.
    #[arg(short, long)]
    pub tickers: Option<String>,

    /// Comma-separated weights, one per ticker (normalized to sum to 1). Defaults to equal.
    #[arg(short, long, allow_hyphen_values = true)]
    pub weights: Option<String>,

    /// History period: 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max
    #[arg(short, long)]
    pub period: Option<String>,

    /// Directory of <SYMBOL>.csv files, or a single wide CSV file
    #[arg(long = "data-dir", alias = "data", env = "BASKET_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Where to write the cumulative return chart (SVG). Table output falls
    /// back to the chart_path setting; other formats only write a chart when
    /// this is given.
    #[arg(long)]
    pub chart: Option<PathBuf>,

    /// Skip writing the chart
    #[arg(long, conflicts_with = "chart")]
    pub no_chart: bool,
}

/// Basket request after prompts and settings have been applied.
struct Request {
    symbols: Vec<Symbol>,
    weights: String,
    period: Period,
}

/// Execute the analyze command.
pub fn execute(
    args: AnalyzeArgs,
    format: OutputFormat,
    quiet: bool,
    settings: &Settings,
) -> Result<()> {
    let request = build_request(&args, settings)?;
    let weights = parse_weights(&request.weights, &request.symbols)?;

    let data = args
        .data_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(settings.value(SettingKey::DataDir)));
    info!(path = %data.display(), period = %request.period, "loading prices");

    let loader = create_file_loader(&data);
    let loaded = loader.load(&request.symbols, &request.period)?;
    if loaded.is_empty() {
        return Err(CliError::NoPriceData(join(&request.symbols)).into());
    }
    if !loaded.resolution.is_complete() {
        warn!(missing = %join(&loaded.resolution.missing), "dropping symbols without data");
        if !quiet {
            print_warning(&format!(
                "No data for {}; weights renormalized over the rest",
                join(&loaded.resolution.missing)
            ));
        }
    }

    let weights = weights.for_resolved(&request.symbols, &loaded.resolution.resolved)?;
    let report = analyze(&loaded.table, &weights, &AnalyticsConfig::default())?;

    match format {
        OutputFormat::Table => print_table(&report, &loaded, &request.period, &weights)?,
        OutputFormat::Json => print_json(&report, &loaded, &request.period)?,
        OutputFormat::Csv => crate::output::print_output(&metric_rows(&report), format)?,
        OutputFormat::Minimal => {
            let p = &report.portfolio;
            println!(
                "Return: {}, Annualized: {}, Risk: {}, Sharpe: {:.2}",
                format_percent(p.metrics.total_return),
                format_percent(p.metrics.annualized_return),
                format_percent(p.metrics.volatility),
                p.sharpe_ratio
            );
        }
    }

    if let Some(path) = chart_path(&args, format, settings) {
        std::fs::write(&path, render_svg(&cumulative_return_chart(&report)))
            .map_err(CliError::from)?;
        info!(path = %path.display(), "wrote chart");
        if !quiet {
            let message = format!("Chart written to {}", path.display());
            match format {
                OutputFormat::Table => print_info(&message),
                _ => print_note(&message),
            }
        }
    }

    Ok(())
}

/// An explicit `--chart` always wins; the `chart_path` setting only applies
/// to table output.
fn chart_path(args: &AnalyzeArgs, format: OutputFormat, settings: &Settings) -> Option<PathBuf> {
    if args.no_chart {
        return None;
    }
    match (&args.chart, format) {
        (Some(path), _) => Some(path.clone()),
        (None, OutputFormat::Table) => Some(PathBuf::from(settings.value(SettingKey::ChartPath))),
        (None, _) => None,
    }
}

fn build_request(args: &AnalyzeArgs, settings: &Settings) -> Result<Request> {
    let default_period = || settings.value(SettingKey::DefaultPeriod);

    let (tickers, weights, period) = match &args.tickers {
        Some(tickers) => (
            tickers.clone(),
            args.weights.clone().unwrap_or_default(),
            args.period.clone().unwrap_or_else(default_period),
        ),
        None => {
            let answers = prompt::ask_basket()?;
            let period = match args.period.clone() {
                Some(period) => period,
                None if answers.period.is_empty() => default_period(),
                None => answers.period,
            };
            let weights = args.weights.clone().unwrap_or(answers.weights);
            (answers.tickers, weights, period)
        }
    };

    Ok(Request {
        symbols: parse_tickers(&tickers)?,
        weights,
        period: Period::new(period),
    })
}

fn join(symbols: &[Symbol]) -> String {
    symbols
        .iter()
        .map(Symbol::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A holding as shown in the table.
#[derive(Tabled)]
struct HoldingRow {
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Allocation")]
    allocation: String,
    #[tabled(rename = "Total Return")]
    total_return: String,
    #[tabled(rename = "Annualized Return")]
    annualized_return: String,
    #[tabled(rename = "Risk")]
    risk: String,
}

fn print_table(
    report: &PerformanceReport,
    loaded: &LoadedPrices,
    period: &Period,
    weights: &Weights,
) -> Result<()> {
    let p = &report.portfolio;
    let weighting = if weights.is_equal() { "Equal" } else { "Custom" };
    let mut results = vec![
        KeyValue::new("Symbols", join(&loaded.resolution.resolved)),
        KeyValue::new("Weighting", weighting),
        KeyValue::new("Period", period.as_str()),
    ];
    if let Some((start, end)) = report.date_range() {
        results.push(KeyValue::new("Date Range", format!("{} to {}", start, end)));
    }
    results.push(KeyValue::new(
        "Observations",
        p.metrics.observations.to_string(),
    ));
    results.push(KeyValue::from_percent("Total Return", p.metrics.total_return));
    results.push(KeyValue::from_percent(
        "Annualized Return",
        p.metrics.annualized_return,
    ));
    results.push(KeyValue::from_percent("Risk", p.metrics.volatility));
    results.push(KeyValue::from_ratio("Sharpe Ratio", p.sharpe_ratio));

    print_header("Portfolio Performance");
    crate::output::print_output(&results, OutputFormat::Table)?;

    let holdings: Vec<HoldingRow> = report
        .holdings
        .iter()
        .map(|h| HoldingRow {
            symbol: h.symbol.to_string(),
            allocation: format_percent(h.weight),
            total_return: format_percent(h.metrics.total_return),
            annualized_return: format_percent(h.metrics.annualized_return),
            risk: format_percent(h.metrics.volatility),
        })
        .collect();

    print_header("Holdings");
    println!(
        "{}",
        tabled::Table::new(&holdings).with(tabled::settings::Style::rounded())
    );
    Ok(())
}

/// Percent-scaled metrics for machine-readable output.
#[derive(Debug, Serialize)]
struct MetricsJson {
    total_return_pct: f64,
    annualized_return_pct: f64,
    risk_pct: f64,
    observations: usize,
}

impl From<&ReturnMetrics> for MetricsJson {
    fn from(m: &ReturnMetrics) -> Self {
        Self {
            total_return_pct: percent_value(m.total_return),
            annualized_return_pct: percent_value(m.annualized_return),
            risk_pct: percent_value(m.volatility),
            observations: m.observations,
        }
    }
}

#[derive(Debug, Serialize)]
struct PortfolioJson {
    #[serde(flatten)]
    metrics: MetricsJson,
    sharpe_ratio: f64,
}

#[derive(Debug, Serialize)]
struct HoldingJson {
    symbol: String,
    allocation_pct: f64,
    #[serde(flatten)]
    metrics: MetricsJson,
}

#[derive(Debug, Serialize)]
struct ReportJson {
    symbols: Vec<String>,
    missing: Vec<String>,
    period: String,
    start_date: Option<String>,
    end_date: Option<String>,
    portfolio: PortfolioJson,
    holdings: Vec<HoldingJson>,
}

fn print_json(report: &PerformanceReport, loaded: &LoadedPrices, period: &Period) -> Result<()> {
    let range = report.date_range();
    let output = ReportJson {
        symbols: loaded.resolution.resolved.iter().map(Symbol::to_string).collect(),
        missing: loaded.resolution.missing.iter().map(Symbol::to_string).collect(),
        period: period.to_string(),
        start_date: range.map(|(start, _)| start.to_string()),
        end_date: range.map(|(_, end)| end.to_string()),
        portfolio: PortfolioJson {
            metrics: MetricsJson::from(&report.portfolio.metrics),
            sharpe_ratio: (report.portfolio.sharpe_ratio * 100.0).round() / 100.0,
        },
        holdings: report
            .holdings
            .iter()
            .map(|h| HoldingJson {
                symbol: h.symbol.to_string(),
                allocation_pct: percent_value(h.weight),
                metrics: MetricsJson::from(&h.metrics),
            })
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// One CSV row: the portfolio first, then each holding.
#[derive(Debug, Serialize, Tabled)]
struct MetricsRow {
    name: String,
    allocation_pct: f64,
    total_return_pct: f64,
    annualized_return_pct: f64,
    risk_pct: f64,
    sharpe_ratio: String,
}

fn metric_rows(report: &PerformanceReport) -> Vec<MetricsRow> {
    let p = &report.portfolio;
    let mut rows = vec![MetricsRow {
        name: basket_analytics::PORTFOLIO_LABEL.to_string(),
        allocation_pct: 100.0,
        total_return_pct: percent_value(p.metrics.total_return),
        annualized_return_pct: percent_value(p.metrics.annualized_return),
        risk_pct: percent_value(p.metrics.volatility),
        sharpe_ratio: format!("{:.2}", p.sharpe_ratio),
    }];
    rows.extend(report.holdings.iter().map(|h| MetricsRow {
        name: h.symbol.to_string(),
        allocation_pct: percent_value(h.weight),
        total_return_pct: percent_value(h.metrics.total_return),
        annualized_return_pct: percent_value(h.metrics.annualized_return),
        risk_pct: percent_value(h.metrics.volatility),
        sharpe_ratio: String::new(),
    }));
    rows
}
