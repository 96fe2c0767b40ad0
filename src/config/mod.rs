//! Configuration management.
//!
//! This module handles loading and saving the TOML configuration file.
//! A missing file is not an error: defaults are used instead.

mod settings;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use settings::{Settings, THEMES};

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV: &str = "SYNAPSE_PALETTE_CONFIG";

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No platform configuration directory could be determined.
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    /// Reading the configuration file failed.
    #[error("Failed to read config file: {0}")]
    ReadError(#[source] std::io::Error),

    /// Writing the configuration file failed.
    #[error("Failed to write config file: {0}")]
    WriteError(#[source] std::io::Error),

    /// The configuration file is not valid TOML for this schema.
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Serializing the configuration failed.
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Command palette settings.
    pub palette: Settings,
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a file.
    ///
    /// A missing file yields the default configuration.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content)?;
        config.palette.validate()?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Save configuration to a file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::WriteError)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(ConfigError::WriteError)?;
        debug!(path = %path.display(), "Saved config");
        Ok(())
    }

    /// Path of the configuration file.
    ///
    /// Uses `SYNAPSE_PALETTE_CONFIG` when set, otherwise
    /// `<config_dir>/synapse-palette/config.toml`.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("synapse-palette").join("config.toml"))
    }
}
