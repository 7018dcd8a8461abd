//! # Application Configuration
//!
//! Where the database lives, which prices new profiles start with, and how
//! results are printed.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line flags (highest priority)                               │
//! │     --db ./profiles.db   --output json                                  │
//! │                                                                         │
//! │  2. Environment Variables                                               │
//! │     DRIVECOST_DB_PATH, DRIVECOST_FUEL_PRICE,                            │
//! │     DRIVECOST_ELECTRICITY_PRICE, DRIVECOST_OUTPUT                       │
//! │                                                                         │
//! │  3. TOML Config File                                                    │
//! │     --config <path>, or the platform config dir:                        │
//! │     ~/.config/drivecost/drivecost.toml (Linux)                          │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                    │
//! │     fuel 1.65 / L, electricity 0.35 / kWh, table output                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [database]
//! path = "/home/me/drivecost.db"
//!
//! [defaults]
//! fuel_price = 1.72
//! electricity_price = 0.31
//!
//! [output]
//! format = "table"  # table | json | csv
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::ValueEnum;
use directories::ProjectDirs;
use drivecost_core::settings::{DEFAULT_ELECTRICITY_PRICE, DEFAULT_FUEL_PRICE};
use drivecost_core::Settings;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "drivecost.toml";

/// Database file name inside the platform data directory.
pub const DATABASE_FILE_NAME: &str = "drivecost.db";

// =============================================================================
// Output Format
// =============================================================================

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable tables.
    #[default]
    Table,

    /// Pretty-printed JSON, the raw serialized results.
    Json,

    /// Comma-separated values.
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(AppError::config(format!(
                "Unknown output format: '{other}'. Valid options: table, json, csv"
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// `[database]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Database file. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// `[defaults]` section: prices seeded into new profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceDefaults {
    #[serde(default = "default_fuel_price")]
    pub fuel_price: f64,

    #[serde(default = "default_electricity_price")]
    pub electricity_price: f64,
}

fn default_fuel_price() -> f64 {
    DEFAULT_FUEL_PRICE
}

fn default_electricity_price() -> f64 {
    DEFAULT_ELECTRICITY_PRICE
}

impl Default for PriceDefaults {
    fn default() -> Self {
        PriceDefaults {
            fuel_price: default_fuel_price(),
            electricity_price: default_electricity_price(),
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub defaults: PriceDefaults,

    #[serde(default)]
    pub output: OutputSettings,
}

impl AppConfig {
    /// Loads configuration from file and environment on top of defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, or the platform default)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that doesn't exist is an error; a missing
    /// default file is not.
    pub fn load(config_path: Option<&Path>) -> AppResult<Self> {
        let mut config = match config_path {
            Some(path) if !path.exists() => {
                return Err(AppError::config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn from_file(path: &Path) -> AppResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("Cannot read config file {}: {e}", path.display()))
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration as TOML, creating parent directories.
    ///
    /// Returns the path written.
    pub fn save(&self, config_path: Option<&Path>) -> AppResult<PathBuf> {
        let path = config_path
            .map(Path::to_path_buf)
            .or_else(Self::default_config_path)
            .ok_or_else(|| AppError::config("No config path available"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, self.to_toml()?)?;

        info!(?path, "Config saved");
        Ok(path)
    }

    /// Renders the configuration as a TOML document.
    pub fn to_toml(&self) -> AppResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.defaults.fuel_price.is_nan() || self.defaults.fuel_price < 0.0 {
            return Err(AppError::config(format!(
                "defaults.fuel_price must be >= 0, got {}",
                self.defaults.fuel_price
            )));
        }
        if self.defaults.electricity_price.is_nan() || self.defaults.electricity_price < 0.0 {
            return Err(AppError::config(format!(
                "defaults.electricity_price must be >= 0, got {}",
                self.defaults.electricity_price
            )));
        }
        if let Some(path) = &self.database.path {
            if path.as_os_str().is_empty() {
                return Err(AppError::config("database.path must not be empty"));
            }
        }
        Ok(())
    }

    /// Applies environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup`, which maps a variable name to its
    /// value. Unparseable values are logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("DRIVECOST_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(price) = lookup("DRIVECOST_FUEL_PRICE") {
            match price.trim().parse::<f64>() {
                Ok(p) => self.defaults.fuel_price = p,
                Err(_) => warn!(value = %price, "Ignoring unparseable DRIVECOST_FUEL_PRICE"),
            }
        }

        if let Some(price) = lookup("DRIVECOST_ELECTRICITY_PRICE") {
            match price.trim().parse::<f64>() {
                Ok(p) => self.defaults.electricity_price = p,
                Err(_) => warn!(value = %price, "Ignoring unparseable DRIVECOST_ELECTRICITY_PRICE"),
            }
        }

        if let Some(format) = lookup("DRIVECOST_OUTPUT") {
            match format.parse() {
                Ok(parsed) => self.output.format = parsed,
                Err(_) => warn!(value = %format, "Unknown output format in environment"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Returns the default database file path.
    pub fn default_database_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.data_dir().join(DATABASE_FILE_NAME))
    }

    /// Resolves the database file, creating its directory if needed.
    pub fn database_path(&self) -> AppResult<PathBuf> {
        let path = self
            .database
            .path
            .clone()
            .or_else(Self::default_database_path)
            .ok_or_else(|| AppError::config("Could not determine app data directory"))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        Ok(path)
    }

    /// Price defaults as the core settings value.
    pub fn settings(&self) -> Settings {
        Settings {
            default_fuel_price: self.defaults.fuel_price,
            default_electricity_price: self.defaults.electricity_price,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "drivecost", "drivecost")
}
