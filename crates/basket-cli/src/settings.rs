//! Persisted CLI settings.
//!
//! Stored as a flat JSON object in `<config dir>/basket/config.json`, or at
//! the path named by `BASKET_CONFIG`. Unset keys fall back to built-in
//! defaults.

use anyhow::Result;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Environment variable overriding the settings file location.
pub const CONFIG_ENV: &str = "BASKET_CONFIG";

/// CLI configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    /// Default output format
    DefaultFormat,
    /// Default history period
    DefaultPeriod,
    /// Directory (or wide CSV file) holding price data
    DataDir,
    /// Where the cumulative return chart is written
    ChartPath,
    /// Whether to use colors
    UseColors,
}

impl SettingKey {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default_format" | "format" => Some(Self::DefaultFormat),
            "default_period" | "period" => Some(Self::DefaultPeriod),
            "data_dir" | "data" => Some(Self::DataDir),
            "chart_path" | "chart" => Some(Self::ChartPath),
            "use_colors" | "colors" => Some(Self::UseColors),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "default_format",
            Self::DefaultPeriod => "default_period",
            Self::DataDir => "data_dir",
            Self::ChartPath => "chart_path",
            Self::UseColors => "use_colors",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "Default output format (table, json, csv, minimal)",
            Self::DefaultPeriod => "Default history period (e.g. 6mo, 1y, 3y, 5y, ytd, max)",
            Self::DataDir => "Price data: a directory of <SYMBOL>.csv files or one wide CSV",
            Self::ChartPath => "Output path for the cumulative return chart (SVG)",
            Self::UseColors => "Enable colored output (true, false)",
        }
    }

    pub fn default_value(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "table",
            Self::DefaultPeriod => "1y",
            Self::DataDir => "data",
            Self::ChartPath => "portfolio.svg",
            Self::UseColors => "true",
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::DefaultFormat,
            Self::DefaultPeriod,
            Self::DataDir,
            Self::ChartPath,
            Self::UseColors,
        ]
    }

    /// Checks that `value` is acceptable for this key.
    pub fn validate(&self, value: &str) -> Result<()> {
        match self {
            Self::DefaultFormat => {
                if !["table", "json", "csv", "minimal"].contains(&value.to_lowercase().as_str()) {
                    return Err(anyhow::anyhow!(
                        "Invalid format: {}. Use table, json, csv, or minimal.",
                        value
                    ));
                }
            }
            Self::DefaultPeriod => {
                if value.trim().is_empty() {
                    return Err(anyhow::anyhow!("Period must not be empty."));
                }
            }
            Self::DataDir | Self::ChartPath => {
                if value.trim().is_empty() {
                    return Err(anyhow::anyhow!("Path must not be empty."));
                }
            }
            Self::UseColors => {
                if parse_bool(value).is_none() {
                    return Err(anyhow::anyhow!(
                        "Invalid boolean: {}. Use true or false.",
                        value
                    ));
                }
            }
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Simple settings storage.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Settings {
    #[serde(flatten)]
    values: BTreeMap<String, String>,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let path = settings_path()?;
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = settings_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Stored value, if one was set.
    pub fn get(&self, key: SettingKey) -> Option<&str> {
        self.values.get(key.as_str()).map(String::as_str)
    }

    /// Stored value or the key's default.
    pub fn value(&self, key: SettingKey) -> String {
        self.get(key).unwrap_or(key.default_value()).to_string()
    }

    pub fn use_colors(&self) -> bool {
        parse_bool(&self.value(SettingKey::UseColors)).unwrap_or(true)
    }

    pub fn set(&mut self, key: SettingKey, value: String) {
        self.values.insert(key.as_str().to_string(), value);
    }

    pub fn remove(&mut self, key: SettingKey) {
        self.values.remove(key.as_str());
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/// Get the settings file path.
pub fn settings_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    let home = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    Ok(home.join("basket").join("config.json"))
}
