//! CLI configuration.
//!
//! Settings live in `~/.config/datebook/config.toml` by default (the platform
//! config directory). Every key is optional:
//!
//! ```toml
//! data_file = "/home/me/calendar/events.json"
//! default_color = "#10B981"
//! log_level = "info"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use datebook_engine::event::DEFAULT_COLOR;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON file holding the event collection.
    pub data_file: PathBuf,

    /// Color given to new events when `--color` is not passed.
    pub default_color: String,

    /// Log filter used when neither `RUST_LOG` nor `--debug` is set.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            default_color: DEFAULT_COLOR.to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// `<config_dir>/datebook/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("datebook").join("config.toml"))
    }

    /// Load the configuration.
    ///
    /// An explicitly given file must exist. When falling back to the default
    /// location, a missing file means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

fn default_data_file() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("datebook").join("events.json"))
        .unwrap_or_else(|| PathBuf::from("events.json"))
}
