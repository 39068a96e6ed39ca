//! Sweep configuration.
//!
//! Example TOML:
//!
//! ```toml
//! samples = 10000
//! loss_probability = 0.85
//! seed = 42
//!
//! [[paramset]]
//! scan_interval = 0.1
//! scan_window = 0.03
//! adv_interval = 0.1
//!
//! [[paramset]]
//! scan_interval = 1.28
//! scan_window = 0.0112
//! adv_interval = 0.1
//! ```

use advscan_core::DEFAULT_LOSS_PROBABILITY;
use advscan_units::Paramset;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading a sweep configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level sweep configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SweepConfig {
    /// Samples per parameter set.
    #[serde(default = "default_samples")]
    pub samples: usize,

    /// Probability that a fully aligned packet is lost.
    #[serde(default = "default_loss_probability")]
    pub loss_probability: f64,

    /// Run seed. Random when omitted.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Per-sample slot budget. When omitted, each parameter set gets
    /// `DiscoveryParams::default_slot_budget`.
    #[serde(default)]
    pub max_slots: Option<u64>,

    /// Run every sample on the calling thread.
    #[serde(default)]
    pub sequential: bool,

    /// Worker threads. Defaults to the rayon global pool.
    #[serde(default)]
    pub threads: Option<usize>,

    /// Parameter sets to evaluate, in seconds.
    #[serde(default, rename = "paramset")]
    pub paramsets: Vec<Paramset>,
}

fn default_samples() -> usize {
    10_000
}

fn default_loss_probability() -> f64 {
    DEFAULT_LOSS_PROBABILITY
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            loss_probability: default_loss_probability(),
            seed: None,
            max_slots: None,
            sequential: false,
            threads: None,
            paramsets: Vec::new(),
        }
    }
}

impl SweepConfig {
    /// Load a sweep configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
