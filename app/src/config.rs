//! FILENAME: app/src/config.rs
// PURPOSE: Application configuration, loaded from JSON.

use std::path::{Path, PathBuf};

use pivot_engine::NumberFormat;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Fact table the application pivots over.
pub const DEFAULT_TABLE: &str = "house_precinct_general";

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

fn default_measures() -> Vec<String> {
    vec!["Votes".to_string()]
}

fn default_number_format() -> NumberFormat {
    NumberFormat::integer()
}

fn default_level() -> String {
    "info".to_string()
}

/// Logging options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level filter ("error", "warn", "info", "debug", "trace").
    #[serde(default = "default_level")]
    pub level: String,

    /// Append log lines to this file instead of stderr.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_level(),
            file: None,
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Table to pivot.
    #[serde(default = "default_table")]
    pub table: String,

    /// JSON catalog file holding the fact tables.
    #[serde(default)]
    pub data_path: Option<PathBuf>,

    /// Measures shown when the initial page request names none.
    #[serde(default = "default_measures")]
    pub default_measures: Vec<String>,

    /// Format for every value cell. Measures are summed, so integers by default.
    #[serde(default = "default_number_format")]
    pub number_format: NumberFormat,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            table: default_table(),
            data_path: None,
            default_measures: default_measures(),
            number_format: default_number_format(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a config file. A relative `data_path` is resolved against the
    /// config file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let mut config = AppConfig::from_json(&json)?;

        if let (Some(data_path), Some(dir)) = (&config.data_path, path.parent()) {
            if data_path.is_relative() {
                config.data_path = Some(dir.join(data_path));
            }
        }
        Ok(config)
    }
}
