//! Configuration management for fleetlog.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::engine::ReminderWindows;
use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "fleetlog";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FLEETLOG_`)
/// 2. TOML config file at `~/.config/fleetlog/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reminder derivation windows.
    pub reminders: ReminderWindows,
    /// Fleet configuration.
    pub fleet: FleetConfig,
}

/// Fleet-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    /// Snapshot file to load when `--input` is not given.
    /// No default; the CLI starts from an empty fleet without one.
    pub snapshot_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `FLEETLOG_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("FLEETLOG_").split("_"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let windows = &self.reminders;

        if windows.date_window_days < 0 || windows.mileage_window_km < 0 {
            return Err(Error::config_validation(format!(
                "reminder windows cannot be negative (date_window_days = {}, mileage_window_km = {})",
                windows.date_window_days, windows.mileage_window_km
            )));
        }

        if windows.date_critical_days > windows.date_window_days {
            return Err(Error::config_validation(format!(
                "date_critical_days ({}) cannot be greater than date_window_days ({})",
                windows.date_critical_days, windows.date_window_days
            )));
        }

        if windows.mileage_critical_km > windows.mileage_window_km {
            return Err(Error::config_validation(format!(
                "mileage_critical_km ({}) cannot be greater than mileage_window_km ({})",
                windows.mileage_critical_km, windows.mileage_window_km
            )));
        }

        Ok(())
    }

    /// Get the reminder windows.
    #[must_use]
    pub fn reminder_windows(&self) -> ReminderWindows {
        self.reminders
    }

    /// Get the default snapshot path, if one is configured.
    #[must_use]
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        self.fleet.snapshot_path.clone()
    }
}
