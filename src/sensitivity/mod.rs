//! Sensitivity reports and the diagnostic scores derived from them.
//!
//! Reports map feature names to how strongly a model reacts when that
//! feature is perturbed. The scoring functions turn one or two reports into
//! leakage, feature-bloat and imputation-robustness scores in `[0, 1]`.

mod analysis;
pub mod probe;
mod report;
mod scoring;
mod stats;

pub use analysis::{SensitivityAnalysis, VulnerabilityReport};
pub use report::{ReportIoError, SensitivityMethod, SensitivityReport, load_report, save_report};
pub use scoring::{ScoringError, imputation_score, leakage, too_many_features};
pub use stats::{LowImpactThreshold, SensitivityStats, ThresholdBasis, sensitivity_stats};
