//! Configuration loading for tm.
//!
//! An optional `config.toml` in the platform config directory tunes where
//! the store lives and which priority new tasks get by default:
//!
//! ```toml
//! store_dir = "/home/me/tasks"
//! default_priority = "high"
//! ```
//!
//! Every field has a default, and a missing file simply means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::task::Priority;

const APP_NAME: &str = "tm";
const CONFIG_FILE: &str = "config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Store directory override; the platform data directory when absent
    #[serde(default)]
    pub store_dir: Option<PathBuf>,

    /// Priority assigned to new tasks when none is given
    #[serde(default)]
    pub default_priority: Priority,
}

impl Config {
    /// Load configuration from the default location. A missing file yields
    /// defaults; an unreadable file is logged and also yields defaults, so
    /// a broken config never blocks the tool.
    pub fn load() -> Self {
        let Some(path) = default_config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "ignoring unreadable config");
                Self::default()
            }
        }
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the store directory: an explicit override wins, then the
    /// configured directory, then the platform data directory.
    pub fn resolve_store_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        if let Some(dir) = override_dir {
            return dir.to_path_buf();
        }
        if let Some(dir) = &self.store_dir {
            return dir.clone();
        }
        default_store_dir()
    }
}

/// Platform config file location (`~/.config/tm/config.toml` on Linux).
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Platform data directory for the store (`~/.local/share/tm` on Linux).
/// Falls back to a dot directory in the working directory when the platform
/// dirs cannot be determined.
pub fn default_store_dir() -> PathBuf {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".tm"))
}
