//! Threshold configuration for src-slim
//!
//! Thresholds default to the contractual values (10% / 2048 bytes) and
//! can be overridden through a `.src-slim.toml` file in the scanned
//! directory, or per invocation on the command line.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::SrcSlimError;
use crate::estimator::EstimatorConfig;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = ".src-slim.toml";

/// On-disk configuration; every field optional, defaults applied on merge
///
/// # Examples
///
/// ```
/// use src_slim::config::ConfigFile;
///
/// let config: ConfigFile =
///     toml_edit::de::from_str("ignore-threshold-percent = 15.0").unwrap();
/// assert_eq!(config.ignore_threshold_percent, Some(15.0));
/// assert_eq!(config.ignore_threshold_bytes, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    /// Minimum length reduction (percent) for a resource to count as
    /// unminified
    pub ignore_threshold_percent: Option<f64>,
    /// Minimum estimated savings (bytes) for a finding to be reported
    pub ignore_threshold_bytes: Option<u64>,
}

impl ConfigFile {
    /// Validate threshold values
    pub fn validate(&self) -> Result<(), SrcSlimError> {
        if let Some(percent) = self.ignore_threshold_percent {
            if !(percent > 0.0 && percent <= 100.0) {
                return Err(SrcSlimError::InvalidConfig {
                    reason: format!(
                        "ignore-threshold-percent must be in (0, 100], got {}",
                        percent
                    ),
                });
            }
        }
        Ok(())
    }

    /// Merge file values over the contractual defaults
    pub fn resolve(&self) -> EstimatorConfig {
        let defaults = EstimatorConfig::default();
        EstimatorConfig {
            ignore_threshold_percent: self
                .ignore_threshold_percent
                .unwrap_or(defaults.ignore_threshold_percent),
            ignore_threshold_bytes: self
                .ignore_threshold_bytes
                .unwrap_or(defaults.ignore_threshold_bytes),
        }
    }
}

/// Loads `.src-slim.toml` from a directory
pub struct ConfigLoader {
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for the given directory
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            config_path: dir.as_ref().join(CONFIG_FILE_NAME),
        }
    }

    /// Load and validate thresholds, falling back to the defaults when no
    /// config file exists
    pub fn load(&self) -> Result<EstimatorConfig, SrcSlimError> {
        if !self.config_path.exists() {
            return Ok(EstimatorConfig::default());
        }

        let contents =
            std::fs::read_to_string(&self.config_path).map_err(|source| SrcSlimError::Io {
                context: format!("reading {}", self.config_path.display()),
                source,
            })?;
        let config: ConfigFile =
            toml_edit::de::from_str(&contents).map_err(|e| SrcSlimError::InvalidConfig {
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config.resolve())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_without_config_file_uses_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let config = ConfigLoader::new(dir.path()).load().expect("loads");
        assert_eq!(config, EstimatorConfig::default());
    }

    #[test]
    fn test_load_merges_partial_config_over_defaults() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "ignore-threshold-percent = 20.0\n",
        )
        .expect("write config");

        let config = ConfigLoader::new(dir.path()).load().expect("loads");
        assert_eq!(config.ignore_threshold_percent, 20.0);
        assert_eq!(config.ignore_threshold_bytes, 2048);
    }

    #[test]
    fn test_load_rejects_out_of_range_percent() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "ignore-threshold-percent = 150.0\n",
        )
        .expect("write config");

        let result = ConfigLoader::new(dir.path()).load();
        assert!(matches!(result, Err(SrcSlimError::InvalidConfig { .. })));
    }

    #[test]
    fn test_load_rejects_unknown_fields() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join(CONFIG_FILE_NAME), "not-a-field = 1\n").expect("write config");

        let result = ConfigLoader::new(dir.path()).load();
        assert!(matches!(result, Err(SrcSlimError::InvalidConfig { .. })));
    }

    #[test]
    fn test_config_roundtrips_through_toml() {
        let config = ConfigFile {
            ignore_threshold_percent: Some(12.5),
            ignore_threshold_bytes: Some(4096),
        };
        let serialized = toml_edit::ser::to_string(&config).expect("serializes");
        let deserialized: ConfigFile = toml_edit::de::from_str(&serialized).expect("parses back");
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_config_file_name_constant_is_correct() {
        assert_eq!(CONFIG_FILE_NAME, ".src-slim.toml");
    }
}
