//! Runtime configuration, loadable from TOML.

use crate::analysis::SinkOutflow;
use crate::calibration::fingerprint::DEFAULT_FINGERPRINT_LEN;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_RESULTS_DIR: &str = "results";
pub const DEFAULT_MAX_IN_MEMORY: u64 = 64;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cache: CacheConfig,
    pub flow: FlowConfig,
}

/// Calibration cache settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Root under which `calibs/` and `figures/` are created.
    pub results_dir: PathBuf,
    /// Hex characters of the structure digest kept in cache keys.
    pub fingerprint_len: usize,
    /// Posteriors kept in memory in front of the artifacts on disk.
    pub max_in_memory: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            fingerprint_len: DEFAULT_FINGERPRINT_LEN,
            max_in_memory: DEFAULT_MAX_IN_MEMORY,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    pub sink_outflow: SinkOutflow,
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&text)
    }
}
