use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::error::{DataError, DataResult};

/// Runtime settings, read from an optional TOML file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the `resources/`, `recipes/` and `skills/` tables
    pub data_dir: PathBuf,
    /// Where session logs are written
    pub log_dir: PathBuf,
    /// Filter used when `RUST_LOG` is not set
    pub log_filter: String,
    /// Old session logs smaller than this are deleted at start-up
    pub prune_below_bytes: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            log_dir: PathBuf::from("logs"),
            log_filter: "dungeon_data=info".to_string(),
            prune_below_bytes: 100 * 1024,
        }
    }
}

impl Config {
    /// Load settings from `path`, falling back to defaults if it is absent
    pub fn load(path: &Path) -> DataResult<Self> {
        if !path.exists() {
            warn!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&path.display().to_string(), &content)
    }

    pub fn from_toml(origin: &str, content: &str) -> DataResult<Self> {
        toml::from_str(content).map_err(|source| DataError::Parse {
            origin: origin.to_string(),
            source,
        })
    }
}
