use std::path::{Path, PathBuf};

use serde::de::Error as SerdeDeError;

use super::{ConfigError, DiagnosticsConfig};
use crate::app_dirs;

/// Default filename used to store the diagnostics configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load the configuration from the app directory, returning defaults if missing.
pub fn load_or_default() -> Result<DiagnosticsConfig, ConfigError> {
    load_from(&config_path()?)
}

/// Load the configuration from `path`, returning defaults if the file does not exist.
pub fn load_from(path: &Path) -> Result<DiagnosticsConfig, ConfigError> {
    if !path.exists() {
        return Ok(DiagnosticsConfig::default());
    }
    let bytes = std::fs::read(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source: SerdeDeError::custom(source),
    })?;
    toml::from_str(&text)
        .map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
        .map(DiagnosticsConfig::normalized)
}

/// Save the configuration to `path`, creating parent directories as needed.
pub fn save_to_path(config: &DiagnosticsConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let data = toml::to_string_pretty(config).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, data).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => {
            ConfigError::CreateDir { path, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensitivity::{LowImpactThreshold, ThresholdBasis};
    use tempfile::tempdir;

    #[test]
    fn saves_and_loads_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("cfg.toml");
        let mut cfg = DiagnosticsConfig::default();
        cfg.split.ratio = 0.25;
        cfg.split.seed = 7;
        cfg.sensitivity.low_impact = LowImpactThreshold {
            fraction: 0.3,
            basis: ThresholdBasis::Mean,
        };
        cfg.probe.missing_value = Some(-1.0);
        save_to_path(&cfg, &path).unwrap();
        assert_eq!(load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let loaded = load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, DiagnosticsConfig::default());
    }

    #[test]
    fn partial_file_fills_defaults_and_normalizes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cfg.toml");
        std::fs::write(&path, "[split]\nratio = 3.0\n\n[sensitivity.low_impact]\nbasis = \"mean\"\n")
            .unwrap();
        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.split.ratio, 0.1);
        assert_eq!(loaded.split.seed, 0);
        assert_eq!(loaded.sensitivity.low_impact.basis, ThresholdBasis::Mean);
        assert_eq!(
            loaded.sensitivity.low_impact.fraction,
            LowImpactThreshold::DEFAULT_FRACTION
        );
        assert_eq!(loaded.probe.missing_value, None);
    }

    #[test]
    fn invalid_toml_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cfg.toml");
        std::fs::write(&path, "split = [").unwrap();
        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
    }

    #[test]
    fn config_path_lives_under_app_root() {
        let dir = tempdir().unwrap();
        let _guard = app_dirs::ConfigBaseGuard::set(dir.path().to_path_buf());
        let path = config_path().unwrap();
        assert_eq!(
            path,
            dir.path().join(app_dirs::APP_DIR_NAME).join(CONFIG_FILE_NAME)
        );
        assert_eq!(load_or_default().unwrap(), DiagnosticsConfig::default());
    }
}
