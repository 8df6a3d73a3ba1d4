// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{Result, SettingsError};
use config::{Config, Environment, File};
use std::path::PathBuf;

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. CLI arguments (highest, applied by the caller)
    /// 2. Environment variables (`PROMCONF__SECTION__KEY`)
    /// 3. Config file
    /// 4. Defaults (lowest)
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_config_path())
    }

    /// Same as [`AppConfig::load`] with an explicit config file location.
    pub fn load_from(config_path: &str) -> Result<Self> {
        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            // Load from config file if it exists
            .add_source(File::with_name(config_path).required(false))
            // Override with environment variables (prefix: PROMCONF__)
            .add_source(
                Environment::with_prefix("PROMCONF")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .map_err(|e| SettingsError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| SettingsError::Config(e.to_string()))
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".promconf")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}
