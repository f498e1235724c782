//! TOML configuration for the UI collaborator.
//!
//! Stored at `~/.config/tickdeck/config.toml` (set TICKDECK_CONFIG_DIR
//! to override the directory). The core never reads this itself; the
//! CLI loads it to resolve the data directory and the category applied
//! to new timers created without one.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::timer::DEFAULT_CATEGORY;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Category applied when a timer is created without one.
    #[serde(default = "default_category")]
    pub default_category: String,
    /// Override for the directory holding `timers.json`/`history.json`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_category: default_category(),
            data_dir: None,
        }
    }
}

impl Config {
    fn path() -> PathBuf {
        if let Ok(dir) = std::env::var("TICKDECK_CONFIG_DIR") {
            return PathBuf::from(dir).join("config.toml");
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tickdeck")
            .join("config.toml")
    }

    /// Load from disk, or defaults when no config file exists.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path();
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::Parse {
                path,
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }

    /// Load from disk, falling back to defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: path.clone(),
                source,
            })?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(&path, content).map_err(|source| ConfigError::Write { path, source })?;
        Ok(())
    }

    /// Set a value by key. Does not save; the caller decides when to
    /// persist.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "default_category" => self.default_category = value.to_string(),
            "data_dir" => self.data_dir = Some(PathBuf::from(value)),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Resolve the data directory: explicit config override, else the
    /// environment/platform default from [`crate::storage::data_dir`].
    pub fn resolve_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(crate::storage::data_dir)
    }
}
