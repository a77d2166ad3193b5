//! Configuration module for slidetags
//!
//! Manages application configuration such as the location of the persisted
//! store. Configuration is stored in the user's config directory.

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "slidetags";

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct SlideConfig {
    /// Location of the sled store; the data-local default is used when unset
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,
}

impl SlideConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join(APP_DIR).join("config.toml"))
    }

    /// Default location of the store, under the user's local data directory
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system data directory cannot be determined.
    pub fn default_store_path() -> Result<PathBuf, ConfigError> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))?;

        Ok(data_dir.join(APP_DIR).join("store"))
    }

    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        Self::load_from(config_path)
    }

    /// Load configuration from an explicit TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load_from(path: PathBuf) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        fs::write(&config_path, self.to_toml()?)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Serialize to TOML text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))
    }

    /// Store location to open: the configured path, or the data-local default
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no path is configured and the data directory is unknown.
    pub fn resolved_store_path(&self) -> Result<PathBuf, ConfigError> {
        self.store_path
            .clone()
            .map_or_else(Self::default_store_path, Ok)
    }

    /// Read a setting by name
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "store_path" => Some(
                self.store_path
                    .as_ref()
                    .map_or_else(|| "(default)".to_string(), |p| p.display().to_string()),
            ),
            "quiet" => Some(self.quiet.to_string()),
            _ => None,
        }
    }

    /// Update a setting by name without saving
    ///
    /// An empty `store_path` value resets it to the default location.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unknown key or a malformed value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "store_path" => {
                self.store_path = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "quiet" => {
                self.quiet = value
                    .parse()
                    .map_err(|_| ConfigError::Message(format!("Invalid boolean value: {value}")))?;
            }
            _ => return Err(ConfigError::Message(format!("Unknown config key: {key}"))),
        }
        Ok(())
    }
}
