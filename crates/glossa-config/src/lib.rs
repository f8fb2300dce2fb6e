//! Configuration system for glossa.
//!
//! glossa uses TOML configuration files named `.glossa.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.glossa.toml` files found, then loading `~/.glossa.toml` as the global config with lowest
//! precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawDatasetSettings, RawSearchSettings, parse_config_file, parse_config_str,
};
pub use resolve::{format_path_for_display, resolve_dataset_path};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Default number of entries returned by a search.
pub const DEFAULT_SEARCH_LIMIT: usize = 25;

/// Default over-fetch multiplier for the full-text backfill query.
pub const DEFAULT_BACKFILL_FACTOR: usize = 2;

/// Top-level merged configuration for glossa.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.glossa.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Dataset location settings.
    pub dataset: DatasetSettings,
    /// Search-related settings.
    pub search: SearchSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.glossa.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Returns the dataset file to open.
    ///
    /// The first candidate that exists on disk wins. When none exist the first candidate is
    /// returned so that callers can report a meaningful "not found" path. Returns `None` if
    /// no dataset is configured at all.
    pub fn dataset_path(&self) -> Option<PathBuf> {
        self.dataset
            .candidates
            .iter()
            .find(|p| p.is_file())
            .or_else(|| self.dataset.candidates.first())
            .cloned()
    }

    /// Replaces the configured dataset candidates with a single explicit path.
    pub fn override_dataset(&mut self, path: PathBuf) {
        self.dataset.candidates = vec![path];
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            dataset: SerializableDataset {
                path: self
                    .dataset
                    .candidates
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect(),
            },
            search: self.search.clone(),
        };
        toml::to_string_pretty(&serializable).expect("settings serialization should not fail")
    }
}

/// Where to find the dictionary dataset.
#[derive(Debug, Clone, Default)]
pub struct DatasetSettings {
    /// Resolved candidate locations, in preference order.
    pub candidates: Vec<PathBuf>,
}

/// Search-related settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Maximum entries returned per search.
    pub limit: usize,
    /// Multiplier applied to the remaining slots when backfilling from the full-text index.
    pub backfill_factor: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SEARCH_LIMIT,
            backfill_factor: DEFAULT_BACKFILL_FACTOR,
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// Dataset section.
    dataset: SerializableDataset,
    /// Search section.
    search: SearchSettings,
}

/// Dataset section with display paths.
#[derive(Serialize)]
struct SerializableDataset {
    /// Candidate paths.
    path: Vec<String>,
}
