//! Basket CLI - Command-line interface for portfolio performance analytics.
//!
//! # Usage
//!
//! ```bash
//! # Equal-weighted basket over three years
//! basket analyze --tickers AAPL,MSFT,GOOG --period 3y --data ./prices
//!
//! # Explicit weights, JSON output, no chart
//! basket --format json analyze -t spy,tlt -w 60,40 --no-chart
//!
//! # Prompt for tickers, weights and period
//! basket analyze
//!
//! # Persist defaults
//! basket config set data_dir ~/prices
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod chart;
mod cli;
mod commands;
mod error;
mod output;
mod prompt;
mod settings;

use cli::{Cli, Commands, OutputFormat};
use settings::{SettingKey, Settings};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let settings = Settings::load()?;
    if !settings.use_colors() {
        colored::control::set_override(false);
    }

    // Flag wins over the stored default
    let format = cli
        .format
        .or_else(|| OutputFormat::from_setting(&settings.value(SettingKey::DefaultFormat)))
        .unwrap_or_default();

    // Execute command
    match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args, format, cli.quiet, &settings)?,
        Commands::Config(args) => commands::config::execute(args, format)?,
    }

    Ok(())
}

/// Logs go to stderr so report output on stdout stays machine-readable.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
