//! Configuration for rawkey
//!
//! Only ambient settings live here. The raw-mode attributes and the quit key
//! are fixed.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// rawkey configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Write logs here. Nothing is logged when unset.
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load config from `path`. A missing or malformed file yields defaults.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            if let Ok(content) = fs::read_to_string(path) {
                if let Ok(config) = toml::from_str(&content) {
                    return config;
                }
            }
        }
        Self::default()
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rawkey")
            .join("config.toml")
    }
}
