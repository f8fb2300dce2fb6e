//! Configuration file parsing.
//!
//! Parses individual `.glossa.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Dataset section.
    pub dataset: Option<RawDatasetSettings>,
    /// Search section.
    pub search: Option<RawSearchSettings>,
}

/// Raw dataset settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawDatasetSettings {
    /// Dataset file location(s). Accepts a single string or an array of candidates.
    #[serde(rename = "path")]
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub paths: Option<Vec<String>>,
}

/// Raw search settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawSearchSettings {
    /// Maximum entries returned per search.
    pub limit: Option<usize>,
    /// Full-text over-fetch multiplier.
    pub backfill_factor: Option<usize>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> RawConfig {
        parse_config_str(toml, Path::new("test.toml")).unwrap()
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse("");
        assert!(config.root.is_none());
        assert!(config.dataset.is_none());
        assert!(config.search.is_none());
    }

    #[test]
    fn test_parse_single_dataset_path() {
        let config = parse(
            r#"
[dataset]
path = "./assets/base.sqlite"
"#,
        );
        let paths = config.dataset.unwrap().paths.unwrap();
        assert_eq!(paths, vec!["./assets/base.sqlite"]);
    }

    #[test]
    fn test_parse_dataset_path_list() {
        let config = parse(
            r#"
[dataset]
path = ["./a.sqlite", "~/b.sqlite"]
"#,
        );
        let paths = config.dataset.unwrap().paths.unwrap();
        assert_eq!(paths, vec!["./a.sqlite", "~/b.sqlite"]);
    }

    #[test]
    fn test_parse_search_settings() {
        let config = parse(
            r#"
[search]
limit = 10
backfill_factor = 3
"#,
        );
        let search = config.search.unwrap();
        assert_eq!(search.limit, Some(10));
        assert_eq!(search.backfill_factor, Some(3));
    }

    #[test]
    fn test_parse_partial_search_settings() {
        let config = parse("[search]\nlimit = 7\n");
        let search = config.search.unwrap();
        assert_eq!(search.limit, Some(7));
        assert!(search.backfill_factor.is_none());
    }

    #[test]
    fn test_parse_root_flag() {
        assert_eq!(parse("root = true\n").root, Some(true));
    }

    #[test]
    fn test_parse_invalid_toml_reports_path() {
        let err = parse_config_str("[search\nlimit = ", Path::new("broken.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        let result = parse_config_str("[search]\nlimt = 3\n", Path::new("typo.toml"));
        assert!(result.is_err());
    }
}
