//! Application configuration file support.
//!
//! This module provides utilities for reading the service configuration from
//! TOML files: the repository backend selection, notification settings, and
//! the expiration sweep cadence.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::db::factory::RepositoryType;
use crate::db::repository::RepositoryError;

/// Application configuration from file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub notifier: NotifierSettings,
    #[serde(default)]
    pub sweep: SweepSettings,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default = "default_repo_type")]
    pub repo_type: String,
}

/// Notification settings for reschedule mails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierSettings {
    /// Display name used as the sender of notifications.
    #[serde(default = "default_sender_name")]
    pub sender_name: String,
    /// Address notified when a semester has no enrolled students.
    #[serde(default = "default_fallback_address")]
    pub fallback_address: String,
}

/// Expiration sweep settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepSettings {
    /// Seconds between sweep ticks. Defaults to one day.
    #[serde(default = "default_sweep_interval_secs")]
    pub interval_secs: u64,
}

fn default_repo_type() -> String {
    "local".to_string()
}

fn default_sender_name() -> String {
    "Routine Management System".to_string()
}

fn default_fallback_address() -> String {
    "registrar@university.example".to_string()
}

fn default_sweep_interval_secs() -> u64 {
    86_400
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: default_repo_type(),
        }
    }
}

impl Default for NotifierSettings {
    fn default() -> Self {
        Self {
            sender_name: default_sender_name(),
            fallback_address: default_fallback_address(),
        }
    }
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(AppConfig)` if successful
    /// * `Err(RepositoryError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!("Failed to read config file: {}", e))
        })?;

        let config: AppConfig = toml::from_str(&content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })?;

        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `rms.toml` in:
    /// 1. Current directory
    /// 2. `config/` directory
    /// 3. Parent directory
    ///
    /// # Returns
    /// * `Ok(AppConfig)` if found and parsed successfully
    /// * `Err(RepositoryError)` if no config file found or parse error
    pub fn from_default_location() -> Result<Self, RepositoryError> {
        let search_paths = vec![
            PathBuf::from("rms.toml"),
            PathBuf::from("config/rms.toml"),
            PathBuf::from("../rms.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(RepositoryError::configuration(
            "No rms.toml found in standard locations",
        ))
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, String> {
        RepositoryType::from_str(&self.repository.repo_type)
    }
}
