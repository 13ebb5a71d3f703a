//! Sensitivity reports exchanged between probes and the scoring engine.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Perturbation strategy that produced a report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensitivityMethod {
    /// Feature values permuted across rows.
    Shuffled,
    /// Feature values replaced by a missing-value marker.
    Missing,
    /// Any other diagnostic label.
    #[serde(untagged)]
    Other(String),
}

impl fmt::Display for SensitivityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shuffled => f.write_str("shuffled"),
            Self::Missing => f.write_str("missing"),
            Self::Other(label) => f.write_str(label),
        }
    }
}

/// Immutable mapping of feature name to sensitivity for one method.
///
/// Values are non-negative by convention. They only sum to 1 after
/// [`SensitivityReport::normalized`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityReport {
    method: SensitivityMethod,
    sensitivities: BTreeMap<String, f64>,
}

impl SensitivityReport {
    pub fn new<I, K>(method: SensitivityMethod, sensitivities: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self {
            method,
            sensitivities: sensitivities
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }

    pub fn method(&self) -> &SensitivityMethod {
        &self.method
    }

    pub fn sensitivities(&self) -> &BTreeMap<String, f64> {
        &self.sensitivities
    }

    pub fn get(&self, feature: &str) -> Option<f64> {
        self.sensitivities.get(feature).copied()
    }

    pub fn feature_names(&self) -> impl Iterator<Item = &str> {
        self.sensitivities.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sensitivities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensitivities.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.sensitivities.values().sum()
    }

    /// Copy whose values sum to 1. A report with zero total is returned as is.
    pub fn normalized(&self) -> Self {
        let total = self.total();
        if total == 0.0 || !total.is_finite() {
            return self.clone();
        }
        Self {
            method: self.method.clone(),
            sensitivities: self
                .sensitivities
                .iter()
                .map(|(name, value)| (name.clone(), value / total))
                .collect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ReportIoError {
    #[error("Failed to read report {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid report {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Load a JSON report (`{"method": ..., "sensitivities": {...}}`).
pub fn load_report(path: &Path) -> Result<SensitivityReport, ReportIoError> {
    let bytes = std::fs::read(path).map_err(|source| ReportIoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ReportIoError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_report(report: &SensitivityReport, path: &Path) -> Result<(), ReportIoError> {
    let data = serde_json::to_vec_pretty(report).map_err(|source| ReportIoError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, data).map_err(|source| ReportIoError::Write {
        path: path.to_path_buf(),
        source,
    })
}
