//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No dataset location is configured.
    NoDatasetConfigured,
    /// None of the configured dataset candidates exist.
    DatasetMissing {
        /// The preferred (first) candidate path.
        path: String,
    },
    /// A dataset candidate exists but is not a regular file.
    DatasetNotFile {
        /// Path that is not a file.
        path: String,
    },
    /// The search limit is zero, so every search returns nothing.
    ZeroLimit,
    /// The backfill factor is zero, so full-text backfill never contributes.
    ZeroBackfillFactor,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDatasetConfigured => write!(f, "no dataset path is configured"),
            Self::DatasetMissing { path } => write!(f, "dataset file does not exist: {path}"),
            Self::DatasetNotFile { path } => write!(f, "dataset path is not a file: {path}"),
            Self::ZeroLimit => write!(f, "search limit is 0; searches will return nothing"),
            Self::ZeroBackfillFactor => {
                write!(f, "backfill_factor is 0; full-text matches will never be used")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.dataset.candidates.is_empty() {
        warnings.push(ConfigWarning::NoDatasetConfigured);
    } else {
        for candidate in &config.dataset.candidates {
            if candidate.exists() && !candidate.is_file() {
                warnings.push(ConfigWarning::DatasetNotFile {
                    path: candidate.display().to_string(),
                });
            }
        }
        if !config.dataset.candidates.iter().any(|p| p.is_file())
            && let Some(first) = config.dataset.candidates.first()
            && !first.exists()
        {
            warnings.push(ConfigWarning::DatasetMissing {
                path: first.display().to_string(),
            });
        }
    }

    if config.search.limit == 0 {
        warnings.push(ConfigWarning::ZeroLimit);
    }
    if config.search.backfill_factor == 0 {
        warnings.push(ConfigWarning::ZeroBackfillFactor);
    }

    warnings
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::{DatasetSettings, SearchSettings, test_support::TestDir};

    fn config_with(candidates: Vec<PathBuf>) -> Config {
        Config {
            dataset: DatasetSettings { candidates },
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config_warns_no_dataset() {
        let warnings = validate_config(&Config::default());
        assert_eq!(warnings, vec![ConfigWarning::NoDatasetConfigured]);
    }

    #[test]
    fn test_existing_dataset_has_no_warnings() {
        let test_dir = TestDir::new();
        let dataset = test_dir.create_file("base.sqlite");

        assert!(validate_config(&config_with(vec![dataset])).is_empty());
    }

    #[test]
    fn test_missing_dataset_warns() {
        let test_dir = TestDir::new();
        let missing = test_dir.path().join("missing.sqlite");

        let warnings = validate_config(&config_with(vec![missing.clone()]));
        assert_eq!(
            warnings,
            vec![ConfigWarning::DatasetMissing {
                path: missing.display().to_string()
            }]
        );
    }

    #[test]
    fn test_directory_dataset_warns_not_file() {
        let test_dir = TestDir::new();
        let dir = test_dir.create_dir("base.sqlite");

        let warnings = validate_config(&config_with(vec![dir.clone()]));
        assert_eq!(
            warnings,
            vec![ConfigWarning::DatasetNotFile {
                path: dir.display().to_string()
            }]
        );
    }

    #[test]
    fn test_zero_settings_warn() {
        let test_dir = TestDir::new();
        let dataset = test_dir.create_file("base.sqlite");
        let config = Config {
            dataset: DatasetSettings {
                candidates: vec![dataset],
            },
            search: SearchSettings {
                limit: 0,
                backfill_factor: 0,
            },
            config_root: None,
        };

        let warnings = validate_config(&config);
        assert!(warnings.contains(&ConfigWarning::ZeroLimit));
        assert!(warnings.contains(&ConfigWarning::ZeroBackfillFactor));
    }
}
