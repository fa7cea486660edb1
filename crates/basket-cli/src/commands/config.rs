//! Config command implementation.
//!
//! Manages persisted CLI settings.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::cli::OutputFormat;
use crate::output::{print_header, print_info, print_success, print_warning, KeyValue};
use crate::settings::{settings_path, SettingKey, Settings};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List available configuration keys
    List,

    /// Reset configuration to defaults
    Reset(ResetArgs),

    /// Show configuration file location
    Path,
}

/// Arguments for get subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

/// Arguments for set subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    pub value: String,
}

/// Arguments for reset subcommand.
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Reset all settings (not just one)
    #[arg(long)]
    pub all: bool,

    /// Specific key to reset (optional)
    pub key: Option<String>,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, format: OutputFormat) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(format),
        ConfigCommand::Get(get_args) => execute_get(get_args, format),
        ConfigCommand::Set(set_args) => execute_set(set_args),
        ConfigCommand::List => execute_list(format),
        ConfigCommand::Reset(reset_args) => execute_reset(reset_args),
        ConfigCommand::Path => execute_path(),
    }
}

fn parse_key(key: &str) -> Result<SettingKey> {
    SettingKey::parse(key).ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", key))
}

/// Show current configuration.
fn execute_show(format: OutputFormat) -> Result<()> {
    let settings = Settings::load()?;

    match format {
        OutputFormat::Table | OutputFormat::Csv => {
            let results: Vec<KeyValue> = SettingKey::all()
                .iter()
                .map(|key| KeyValue::new(key.as_str(), settings.value(*key)))
                .collect();
            if format == OutputFormat::Table {
                print_header("Current Configuration");
            }
            crate::output::print_output(&results, format)?;
        }
        OutputFormat::Json => {
            let output: BTreeMap<&str, String> = SettingKey::all()
                .iter()
                .map(|key| (key.as_str(), settings.value(*key)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => {
            for key in SettingKey::all() {
                println!("{}={}", key.as_str(), settings.value(*key));
            }
        }
    }

    Ok(())
}

/// Get a configuration value.
fn execute_get(args: GetArgs, format: OutputFormat) -> Result<()> {
    let settings = Settings::load()?;
    let key = parse_key(&args.key)?;
    let value = settings.value(key);

    match format {
        OutputFormat::Table | OutputFormat::Csv => {
            println!("{}: {}", key.as_str(), value);
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "key": key.as_str(),
                "value": value
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => {
            println!("{}", value);
        }
    }

    Ok(())
}

/// Set a configuration value.
fn execute_set(args: SetArgs) -> Result<()> {
    let key = parse_key(&args.key)?;
    key.validate(&args.value)?;

    let mut settings = Settings::load()?;
    settings.set(key, args.value.clone());
    settings.save()?;

    print_success(&format!("Set {} = {}", key.as_str(), args.value));
    Ok(())
}

#[derive(Serialize)]
struct KeyInfo {
    key: &'static str,
    description: &'static str,
    default: &'static str,
}

/// List available configuration keys.
fn execute_list(format: OutputFormat) -> Result<()> {
    let keys: Vec<KeyInfo> = SettingKey::all()
        .iter()
        .map(|key| KeyInfo {
            key: key.as_str(),
            description: key.description(),
            default: key.default_value(),
        })
        .collect();

    match format {
        OutputFormat::Table => {
            let results: Vec<KeyValue> = keys
                .iter()
                .map(|k| KeyValue::new(k.key, format!("{} (default: {})", k.description, k.default)))
                .collect();
            print_header("Available Configuration Keys");
            crate::output::print_output(&results, format)?;
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&keys)?);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for key in &keys {
                wtr.serialize(key)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Minimal => {
            for key in &keys {
                println!("{}", key.key);
            }
        }
    }

    Ok(())
}

/// Reset configuration.
fn execute_reset(args: ResetArgs) -> Result<()> {
    let mut settings = Settings::load()?;

    if args.all {
        settings.clear();
        settings.save()?;
        print_success("Reset all configuration to defaults");
    } else if let Some(key_str) = args.key {
        let key = parse_key(&key_str)?;
        settings.remove(key);
        settings.save()?;
        print_success(&format!("Reset {} to default ({})", key.as_str(), key.default_value()));
    } else {
        print_warning("Use --all to reset all settings, or specify a key to reset");
    }

    Ok(())
}

/// Show configuration file path.
fn execute_path() -> Result<()> {
    let path = settings_path()?;
    print_info(&format!("Config file: {}", path.display()));
    if path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}
