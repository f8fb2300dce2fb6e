//! Path resolution for dataset locations.
//!
//! Resolves relative and tilde-prefixed dataset paths to absolute paths.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves a dataset path to an absolute path.
///
/// Handles three cases:
/// - Tilde paths (`~/data/base.sqlite`) - expanded to the home directory
/// - Relative paths (`./assets/base.sqlite`) - resolved relative to `config_dir`
/// - Absolute paths - returned as-is
///
/// The file is not required to exist; a missing dataset is reported as a validation
/// warning rather than a load error so that `glossa status` can still run.
pub fn resolve_dataset_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;

    if expanded.is_absolute() {
        return Ok(expanded);
    }

    let joined = config_dir.join(&expanded);
    Ok(joined.canonicalize().unwrap_or(joined))
}

/// Formats a path for display, relative to `base` when it lives underneath it.
pub fn format_path_for_display(path: &Path, base: Option<&Path>) -> String {
    if let Some(base) = base
        && let Ok(relative) = path.strip_prefix(base)
    {
        if relative.as_os_str().is_empty() {
            return ".".to_string();
        }
        return format!("./{}", relative.display());
    }

    if let Some(home) = BaseDirs::new().map(|d| d.home_dir().to_path_buf())
        && let Ok(relative) = path.strip_prefix(&home)
    {
        return format!("~/{}", relative.display());
    }

    path.display().to_string()
}

/// Expands a tilde prefix to the home directory.
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        let home = home_dir()?;
        return Ok(home.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Returns the home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}
