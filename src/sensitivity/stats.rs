//! Descriptive statistics over a single sensitivity report.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{SensitivityMethod, SensitivityReport};

/// Reference value the low-impact fraction is applied to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdBasis {
    /// Largest sensitivity in the report.
    #[default]
    Max,
    /// Mean sensitivity of the report.
    Mean,
}

/// Boundary below which a non-zero sensitivity counts as low impact.
///
/// The threshold is `fraction * basis(values)`; by default 15% of the largest
/// sensitivity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LowImpactThreshold {
    #[serde(default = "default_low_impact_fraction")]
    pub fraction: f64,
    #[serde(default)]
    pub basis: ThresholdBasis,
}

impl LowImpactThreshold {
    pub const DEFAULT_FRACTION: f64 = 0.15;

    /// Absolute threshold for the given sensitivities (0 when empty).
    pub fn value_for(&self, values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        let reference = match self.basis {
            ThresholdBasis::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            ThresholdBasis::Mean => values.iter().sum::<f64>() / values.len() as f64,
        };
        self.fraction * reference
    }
}

impl Default for LowImpactThreshold {
    fn default() -> Self {
        Self {
            fraction: Self::DEFAULT_FRACTION,
            basis: ThresholdBasis::default(),
        }
    }
}

fn default_low_impact_fraction() -> f64 {
    LowImpactThreshold::DEFAULT_FRACTION
}

/// Snapshot of feature counts derived from one report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitivityStats {
    /// Method of the report the counts were taken from.
    pub method: SensitivityMethod,
    pub n_features: usize,
    /// Entries exactly equal to zero.
    pub n_zero: usize,
    /// Entries above zero but below the low-impact threshold.
    pub n_low: usize,
}

/// Count features, zero-impact features and low-impact features.
pub fn sensitivity_stats(
    report: &SensitivityReport,
    threshold: &LowImpactThreshold,
) -> SensitivityStats {
    let values: Vec<f64> = report.sensitivities().values().copied().collect();
    let cutoff = threshold.value_for(&values);
    let n_zero = values.iter().filter(|&&value| value == 0.0).count();
    let n_low = values
        .iter()
        .filter(|&&value| value > 0.0 && value < cutoff)
        .count();
    debug!(
        method = %report.method(),
        n_features = values.len(),
        n_zero,
        n_low,
        cutoff,
        "sensitivity stats"
    );
    SensitivityStats {
        method: report.method().clone(),
        n_features: values.len(),
        n_zero,
        n_low,
    }
}
