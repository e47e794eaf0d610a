//! Configuration management for indexctl
//!
//! Handles loading and saving configuration from TOML files. A missing
//! config file is not an error: the defaults describe a local backend.

mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use crate::providers;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Indexing backend base URL
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Provider selected at session start
    #[serde(default = "default_provider")]
    pub default_provider: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            timeout_secs: default_timeout_secs(),
            default_provider: default_provider(),
        }
    }
}

impl Config {
    /// Base directory for indexctl files (~/.config/indexctl or platform
    /// equivalent)
    pub fn default_base_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("indexctl")
    }

    /// Default config file path
    pub fn default_config_path() -> PathBuf {
        Self::default_base_dir().join("config.toml")
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config at `path` (or the default path); fall back to
    /// defaults when no file exists.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let config_path = path
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_config_path);

        if config_path.exists() {
            Self::load(&config_path)
        } else {
            debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            Ok(Self::default())
        }
    }

    /// Write configuration to a TOML file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if providers::find_provider(&self.default_provider).is_none() {
            return Err(Error::Config(format!(
                "Unknown default_provider '{}' in config",
                self.default_provider
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }
}
