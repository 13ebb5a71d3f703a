//! Combines the counts and scores for a pair of sensitivity reports.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::scoring::{ScoringError, imputation_score, leakage, too_many_features};
use super::stats::{SensitivityStats, sensitivity_stats};
use super::SensitivityReport;
use crate::config::SensitivitySettings;

/// Scores bundled for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilityReport {
    /// Counts taken from the shuffled report.
    pub stats: SensitivityStats,
    pub leakage: f64,
    pub too_many_features: f64,
    pub imputation: f64,
}

/// Applies the configured threshold to reports and derives the scores.
#[derive(Debug, Clone, Default)]
pub struct SensitivityAnalysis {
    settings: SensitivitySettings,
}

impl SensitivityAnalysis {
    pub fn new(settings: SensitivitySettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SensitivitySettings {
        &self.settings
    }

    pub fn stats(&self, report: &SensitivityReport) -> SensitivityStats {
        sensitivity_stats(report, &self.settings.low_impact)
    }

    /// Leakage and bloat come from the shuffled report; the imputation score
    /// compares the normalized shuffled and missing reports.
    pub fn vulnerability(
        &self,
        shuffled: &SensitivityReport,
        missing: &SensitivityReport,
    ) -> Result<VulnerabilityReport, ScoringError> {
        let stats = self.stats(shuffled);
        let imputation = imputation_score(&shuffled.normalized(), &missing.normalized())?;
        let report = VulnerabilityReport {
            leakage: leakage(stats.n_features, stats.n_zero),
            too_many_features: too_many_features(stats.n_features, stats.n_low, stats.n_zero),
            imputation,
            stats,
        };
        debug!(
            leakage = report.leakage,
            too_many_features = report.too_many_features,
            imputation = report.imputation,
            "vulnerability scores"
        );
        Ok(report)
    }
}
