//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules and resolving dataset paths.

use std::path::{Path, PathBuf};

use crate::{
    Config, ConfigError, DatasetSettings, SearchSettings,
    parse::{RawConfig, RawSearchSettings},
    resolve::resolve_dataset_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to
/// CWD), lowest precedence last (global config).
///
/// Merge rules:
/// - Scalar settings: first defined value wins (highest precedence)
/// - Dataset paths: the first config that defines `[dataset] path` wins completely, with
///   relative paths resolved against that config file's directory
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let search = merge_search_settings(configs);
    let dataset = merge_dataset(configs)?;
    let config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(Path::to_path_buf);

    Ok(Config {
        dataset,
        search,
        config_root,
    })
}

/// Merges search settings.
fn merge_search_settings(configs: &[ParsedConfig]) -> SearchSettings {
    let mut result = SearchSettings::default();

    // Lowest precedence first so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref search) = parsed.config.search {
            apply_raw_search(&mut result, search);
        }
    }

    result
}

/// Applies raw search settings to result, overwriting any present values.
fn apply_raw_search(result: &mut SearchSettings, raw: &RawSearchSettings) {
    if let Some(v) = raw.limit {
        result.limit = v;
    }
    if let Some(v) = raw.backfill_factor {
        result.backfill_factor = v;
    }
}

/// Picks the dataset candidates from the highest-precedence config that defines them.
fn merge_dataset(configs: &[ParsedConfig]) -> Result<DatasetSettings, ConfigError> {
    for parsed in configs {
        let Some(paths) = parsed
            .config
            .dataset
            .as_ref()
            .and_then(|d| d.paths.as_ref())
        else {
            continue;
        };

        let config_dir = parsed.path.parent().unwrap_or(Path::new("."));
        let candidates = paths
            .iter()
            .map(|p| resolve_dataset_path(p, config_dir))
            .collect::<Result<Vec<_>, _>>()?;

        return Ok(DatasetSettings { candidates });
    }

    Ok(DatasetSettings::default())
}
