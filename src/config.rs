//! # Configuration Persistence
//!
//! Manages user configuration stored in `~/.config/startpage/config.json`.
//!
//! ## Overview
//!
//! The [`Config`] struct is serialized to / deserialized from a JSON file in
//! the user's XDG config directory. Every field has a default, so an empty
//! object is a valid config.
//!
//! ```json
//! {
//!   "data_source": "/srv/startpage/data.json",
//!   "state_dir": null,
//!   "frequent_limit": 10,
//!   "link_fallback": "weight",
//!   "search_engine": "bing"
//! }
//! ```
//!
//! The `directories` crate is used to resolve the platform-appropriate config
//! directory.

use crate::ranking::LinkFallback;
use crate::search::SearchEngine;
use crate::usage::MAX_FREQUENT_SITES;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted user configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to the data source JSON.
    #[serde(default = "default_data_source")]
    pub data_source: PathBuf,

    /// Where slot files live. `None` uses the platform data directory.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,

    /// How many entries the frequent-sites view shows.
    #[serde(default = "default_frequent_limit")]
    pub frequent_limit: usize,

    /// Ordering for link lists the user has not arranged.
    #[serde(default)]
    pub link_fallback: LinkFallback,

    /// Engine preselected in the search box.
    #[serde(default)]
    pub search_engine: SearchEngine,
}

fn default_data_source() -> PathBuf {
    PathBuf::from("data.json")
}

fn default_frequent_limit() -> usize {
    MAX_FREQUENT_SITES
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_source: default_data_source(),
            state_dir: None,
            frequent_limit: default_frequent_limit(),
            link_fallback: LinkFallback::default(),
            search_engine: SearchEngine::default(),
        }
    }
}

impl Config {
    /// Load configuration from disk. Returns `Config::default()` if the file
    /// does not exist or cannot be parsed.
    pub fn load() -> Self {
        Self::try_load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default configuration");
            Self::default()
        })
    }

    fn try_load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path. Returns `Config::default()` if
    /// the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save the current configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Return the path to the config file.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "startpage")
            .context("Could not determine config directory")?;
        Ok(dirs.config_dir().join("config.json"))
    }
}
