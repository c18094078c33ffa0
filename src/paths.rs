//! Centralized path definitions for assetkeeper
//!
//! ## Storage Layout
//!
//! ```text
//! ~/.assetkeeper/
//! └── config.toml               # Backend URL, token, bulk settings
//! ```

use std::path::PathBuf;

/// Global config directory name
const GLOBAL_DIR: &str = ".assetkeeper";

/// Global config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Get the global assetkeeper directory.
///
/// Returns `~/.assetkeeper/`.
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("~")).join(GLOBAL_DIR)
}

/// Get the global config file path.
///
/// Returns `~/.assetkeeper/config.toml`.
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}
