//! # Configuration Management Module
//!
//! Recipe box configuration is a small TOML file that says where the recipe
//! document lives and how to log. Every section has defaults, so a file with
//! only the sections you want to change is valid.
//!
//! ## Configuration Structure
//!
//! - [`StorageConfig`] - Data directory and document file name
//! - [`LoggingConfig`] - Log level and optional log file
//! - [`ProfileConfig`] - Nickname used when a new document is created
//!
//! ## Usage
//!
//! ```rust,no_run
//! use recipebox::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     println!("Recipe document: {}", config.database_path().display());
//!
//!     Config::create_default("config.toml").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [storage]
//! data_dir = "./data"
//! database_file = "recipe_box.json"
//!
//! [logging]
//! level = "info"
//! file = "recipebox.log"
//!
//! [profile]
//! nickname = "Chef"
//! ```

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_database_file")]
    pub database_file: String,
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_database_file() -> String {
    "recipe_box.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            database_file: default_database_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// One of error, warn, info, debug, trace. Unknown values fall back to info.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Append log lines to this file as well. An empty string means the terminal only.
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> Option<String> {
    Some("recipebox.log".to_string())
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_nickname")]
    pub nickname: String,
}

fn default_nickname() -> String {
    "Chef".to_string()
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            nickname: default_nickname(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    /// Full path of the recipe box JSON document
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_dir).join(&self.storage.database_file)
    }
}
