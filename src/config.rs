//! Global configuration management
//!
//! Backend connection and bulk settings, stored at
//! `~/.assetkeeper/config.toml`. Environment variables override the file:
//!
//! - `ASSETKEEPER_API_URL` - backend base URL
//! - `ASSETKEEPER_API_TOKEN` - bearer token

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::services::ExecutorConfig;
use crate::paths;

/// Environment variable overriding `backend.base_url`
pub const ENV_API_URL: &str = "ASSETKEEPER_API_URL";

/// Environment variable overriding `backend.api_token`
pub const ENV_API_TOKEN: &str = "ASSETKEEPER_API_TOKEN";

/// Errors loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read
    #[error("cannot read {path}: {source}")]
    Read {
        /// The config file
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema
    #[error("invalid config {path}: {source}")]
    Parse {
        /// The config file
        path: PathBuf,
        /// Underlying parse error
        source: toml::de::Error,
    },

    /// The config could not be written
    #[error("cannot write {path}: {source}")]
    Write {
        /// The config file
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The config could not be serialized
    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Global assetkeeper configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Backend connection
    #[serde(default)]
    pub backend: BackendConfig,
    /// Bulk executor settings
    #[serde(default)]
    pub bulk: BulkConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Bearer token sent with every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            api_token: None,
        }
    }
}

/// Bulk executor settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkConfig {
    /// Try the batch endpoint before going per-item
    #[serde(default = "default_prefer_batch")]
    pub prefer_batch: bool,
}

const fn default_prefer_batch() -> bool {
    true
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            prefer_batch: default_prefer_batch(),
        }
    }
}

impl From<BulkConfig> for ExecutorConfig {
    fn from(bulk: BulkConfig) -> Self {
        Self {
            prefer_batch: bulk.prefer_batch,
        }
    }
}

impl Config {
    /// Get the config file path
    #[must_use]
    pub fn config_path() -> PathBuf {
        paths::global_config()
    }

    /// Load config from the default path, then apply environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()).map(Self::with_env_overrides)
    }

    /// Load config from a file
    ///
    /// A missing file yields defaults; an unreadable or malformed one is an
    /// error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `ASSETKEEPER_API_URL` and `ASSETKEEPER_API_TOKEN`
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(ENV_API_URL)
            && !url.trim().is_empty()
        {
            self.backend.base_url = url;
        }
        if let Ok(token) = std::env::var(ENV_API_TOKEN)
            && !token.trim().is_empty()
        {
            self.backend.api_token = Some(token);
        }
        self
    }

    /// Save config to a file, creating its directory
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(write_err)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(write_err)
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }
}
