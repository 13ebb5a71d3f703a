//! Risk scores derived from sensitivity counts and reports.
//!
//! Every score lies in `[0, 1]`; degenerate inputs (no features, a single
//! feature, all-zero sensitivities) score `0` instead of failing. Reports
//! holding NaN or infinite sensitivities are rejected.

use thiserror::Error;
use tracing::debug;

use super::SensitivityReport;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    /// The two reports are keyed by different feature names.
    #[error(
        "reports cover different features (only in shuffled: {only_in_shuffled:?}, only in missing: {only_in_missing:?})"
    )]
    FeatureSetMismatch {
        only_in_shuffled: Vec<String>,
        only_in_missing: Vec<String>,
    },
    /// A sensitivity is NaN or infinite.
    #[error("{method} report has non-finite sensitivity for feature {feature:?}")]
    NonFiniteSensitivity { method: String, feature: String },
}

/// Suspicion that a handful of features carry all of the signal.
///
/// `n_zero / (n_features - 1)`: at most `n_features - 1` features can have no
/// impact while one still explains the target, so that case scores 1.
pub fn leakage(n_features: usize, n_zero: usize) -> f64 {
    if n_features <= 1 {
        return 0.0;
    }
    (n_zero as f64 / (n_features - 1) as f64).clamp(0.0, 1.0)
}

/// Share of declared features with low impact.
///
/// `n_zero` is accepted for a future refinement of the policy and does not
/// affect the result.
pub fn too_many_features(n_features: usize, n_low: usize, _n_zero: usize) -> f64 {
    if n_features == 0 {
        return 0.0;
    }
    (n_low as f64 / n_features as f64).clamp(0.0, 1.0)
}

/// Total-variation distance between the shuffled and missing sensitivities.
///
/// Both reports are expected to be normalized. 0 means both perturbations
/// weigh features identically; 1 means disjoint support.
pub fn imputation_score(
    shuffled: &SensitivityReport,
    missing: &SensitivityReport,
) -> Result<f64, ScoringError> {
    let only_in_shuffled: Vec<String> = shuffled
        .feature_names()
        .filter(|name| missing.get(name).is_none())
        .map(str::to_string)
        .collect();
    let only_in_missing: Vec<String> = missing
        .feature_names()
        .filter(|name| shuffled.get(name).is_none())
        .map(str::to_string)
        .collect();
    if !only_in_shuffled.is_empty() || !only_in_missing.is_empty() {
        return Err(ScoringError::FeatureSetMismatch {
            only_in_shuffled,
            only_in_missing,
        });
    }

    for report in [shuffled, missing] {
        if let Some((feature, _)) = report
            .sensitivities()
            .iter()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(ScoringError::NonFiniteSensitivity {
                method: report.method().to_string(),
                feature: feature.clone(),
            });
        }
    }

    // Both maps are sorted by the same key set, so zipping pairs features up.
    let distance: f64 = shuffled
        .sensitivities()
        .values()
        .zip(missing.sensitivities().values())
        .map(|(s, m)| (s - m).abs())
        .sum();
    let score = (0.5 * distance).clamp(0.0, 1.0);
    debug!(features = shuffled.len(), score, "imputation score");
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensitivity::SensitivityMethod;

    #[test]
    fn leakage_scales_with_zero_features() {
        assert_eq!(leakage(10, 0), 0.0);
        assert_eq!(leakage(10, 9), 1.0);
        assert!(leakage(10, 8) >= 0.8);
        let curve: Vec<f64> = (0..10).map(|k| leakage(10, k)).collect();
        assert!(curve.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn leakage_is_zero_for_tiny_feature_sets() {
        assert_eq!(leakage(0, 0), 0.0);
        assert_eq!(leakage(1, 1), 0.0);
        assert_eq!(leakage(2, 5), 1.0);
    }

    #[test]
    fn too_many_features_is_low_share() {
        assert_eq!(too_many_features(10, 0, 0), 0.0);
        assert_eq!(too_many_features(10, 5, 0), 0.5);
        assert!(too_many_features(10, 9, 9) >= 0.9);
        assert_eq!(too_many_features(0, 0, 0), 0.0);
    }

    #[test]
    fn n_zero_does_not_change_bloat_score() {
        assert_eq!(too_many_features(10, 3, 0), too_many_features(10, 3, 7));
    }

    #[test]
    fn identical_reports_score_zero() {
        let values = [("a", 0.3), ("b", 0.5), ("c", 0.2)];
        let shuffled = SensitivityReport::new(SensitivityMethod::Shuffled, values);
        let missing = SensitivityReport::new(SensitivityMethod::Missing, values);
        assert_eq!(imputation_score(&shuffled, &missing).unwrap(), 0.0);
    }

    #[test]
    fn disjoint_reports_score_one() {
        let shuffled =
            SensitivityReport::new(SensitivityMethod::Shuffled, [("a", 1.0), ("b", 0.0), ("c", 0.0)]);
        let missing =
            SensitivityReport::new(SensitivityMethod::Missing, [("a", 0.0), ("b", 1.0), ("c", 0.0)]);
        assert_eq!(imputation_score(&shuffled, &missing).unwrap(), 1.0);
    }

    #[test]
    fn nan_sensitivity_is_rejected() {
        let shuffled =
            SensitivityReport::new(SensitivityMethod::Shuffled, [("a", f64::NAN), ("b", 1.0)]);
        let missing = SensitivityReport::new(SensitivityMethod::Missing, [("a", 0.0), ("b", 1.0)]);
        assert_eq!(
            imputation_score(&shuffled, &missing).unwrap_err(),
            ScoringError::NonFiniteSensitivity {
                method: "shuffled".to_string(),
                feature: "a".to_string(),
            }
        );
    }

    #[test]
    fn infinite_sensitivity_is_rejected() {
        let shuffled = SensitivityReport::new(SensitivityMethod::Shuffled, [("a", 1.0)]);
        let missing = SensitivityReport::new(SensitivityMethod::Missing, [("a", f64::INFINITY)]);
        assert!(matches!(
            imputation_score(&shuffled, &missing),
            Err(ScoringError::NonFiniteSensitivity { .. })
        ));
    }

    #[test]
    fn mismatched_feature_sets_are_rejected() {
        let shuffled = SensitivityReport::new(SensitivityMethod::Shuffled, [("a", 0.5), ("b", 0.5)]);
        let missing = SensitivityReport::new(SensitivityMethod::Missing, [("a", 0.5), ("c", 0.5)]);
        assert_eq!(
            imputation_score(&shuffled, &missing).unwrap_err(),
            ScoringError::FeatureSetMismatch {
                only_in_shuffled: vec!["b".to_string()],
                only_in_missing: vec!["c".to_string()],
            }
        );
    }
}
