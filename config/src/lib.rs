//! Configuration loading for the hoardkeep binary.
//!
//! TOML with serde defaults; a missing file means built-in defaults, a
//! malformed file is a hard error.
//!
//! ```toml
//! [hoard]
//! initial_treasure = 100
//!
//! [oracle]
//! endpoint = "http://localhost:4000/evaluate"
//! timeout_secs = 30
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default hoard size at contract creation.
pub const DEFAULT_INITIAL_TREASURE: u64 = 100;

/// Default per-request oracle timeout, in seconds.
pub const DEFAULT_ORACLE_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HoardConfig {
    pub hoard: HoardSection,
    pub oracle: OracleSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoardSection {
    pub initial_treasure: u64,
}

impl Default for HoardSection {
    fn default() -> Self {
        Self {
            initial_treasure: DEFAULT_INITIAL_TREASURE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleSection {
    /// Oracle endpoint URL. Without one the binary falls back to the
    /// offline demo oracle.
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
}

impl Default for OracleSection {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: DEFAULT_ORACLE_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl HoardConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Load from the default path when present, built-in defaults
    /// otherwise.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// Per-user config location, typically `~/.config/hoardkeep/config.toml`.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hoardkeep").join("config.toml"))
}
