//! Diagnostics settings persisted as TOML.
//!
//! Missing sections and keys fall back to defaults so old config files keep
//! loading as new settings are added.

mod defaults;
mod io;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sensitivity::LowImpactThreshold;
use crate::sensitivity::probe::ProbeOptions;
use defaults::{default_split_ratio, default_split_seed, sanitize_fraction, sanitize_ratio};

pub use io::{CONFIG_FILE_NAME, config_path, load_from, load_or_default, save_to_path};

/// Aggregate settings loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    #[serde(default)]
    pub split: SplitSettings,
    #[serde(default)]
    pub sensitivity: SensitivitySettings,
    #[serde(default)]
    pub probe: ProbeOptions,
}

impl DiagnosticsConfig {
    /// Replace out-of-range values with their defaults.
    pub fn normalized(mut self) -> Self {
        self.split.ratio = sanitize_ratio(self.split.ratio);
        self.sensitivity.low_impact.fraction =
            sanitize_fraction(self.sensitivity.low_impact.fraction);
        self
    }
}

/// Holdout split used by drivers that train and probe a model.
///
/// Config keys: `ratio`, `seed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitSettings {
    /// Fraction of rows sent to the right (holdout) partition.
    #[serde(default = "default_split_ratio")]
    pub ratio: f64,
    #[serde(default = "default_split_seed")]
    pub seed: u64,
}

impl Default for SplitSettings {
    fn default() -> Self {
        Self {
            ratio: default_split_ratio(),
            seed: default_split_seed(),
        }
    }
}

/// Scoring preferences.
///
/// Config keys: `low_impact.fraction`, `low_impact.basis` (`max` or `mean`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensitivitySettings {
    #[serde(default)]
    pub low_impact: LowImpactThreshold,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    #[error("No suitable config directory found")]
    NoConfigDir,
}
