//! Model diagnostics built on per-feature sensitivity scores.
/// Config and log directory resolution.
pub mod app_dirs;
/// TOML settings for splitting, scoring and probing.
pub mod config;
/// Row-aligned dataset container and splitters.
pub mod dataset;
/// Tracing subscriber setup.
pub mod logging;
/// Sensitivity reports, probes and diagnostic scores.
pub mod sensitivity;

pub use dataset::{Dataset, DatasetError};
pub use sensitivity::{SensitivityAnalysis, SensitivityReport, VulnerabilityReport};
