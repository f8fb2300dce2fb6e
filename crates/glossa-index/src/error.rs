//! Error types for the glossa-index crate.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when working with the dictionary dataset.
#[derive(Debug, Error)]
pub enum IndexError {
    /// No dataset file exists at the configured location.
    #[error("dictionary dataset not found at {path}")]
    DatasetNotFound {
        /// Path that was probed.
        path: PathBuf,
    },

    /// No dataset location is configured at all.
    #[error("no dictionary dataset configured; set [dataset] path in .glossa.toml or pass --dataset")]
    NoDataset,

    /// SQLite refused to open the dataset file.
    #[error("failed to open dictionary dataset at {path}: {source}")]
    Open {
        /// Path to the dataset file.
        path: PathBuf,
        /// Underlying SQLite error.
        source: rusqlite::Error,
    },

    /// The dataset lacks one or more of the tables the engine queries.
    #[error(
        "dictionary dataset at {path} is missing expected tables: {}. Regenerate the dataset by re-running its build with --force.",
        missing.join(", ")
    )]
    SchemaMismatch {
        /// Path to the dataset file.
        path: PathBuf,
        /// Names of the missing tables.
        missing: Vec<String>,
    },

    /// A query against an open dataset failed.
    #[error("dictionary query failed: {0}")]
    Storage(#[from] rusqlite::Error),

    /// The background search worker thread could not be started.
    #[error("failed to start search worker: {0}")]
    Worker(#[source] io::Error),
}

impl IndexError {
    /// Returns true if the error means the dataset must be rebuilt or supplied.
    ///
    /// These are setup problems rather than transient query failures.
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            Self::DatasetNotFound { .. } | Self::NoDataset | Self::SchemaMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_mismatch_lists_missing_tables() {
        let err = IndexError::SchemaMismatch {
            path: PathBuf::from("/data/base.sqlite"),
            missing: vec!["entries".into(), "entries_fts".into()],
        };
        let message = err.to_string();
        assert!(message.contains("entries, entries_fts"));
        assert!(message.contains("--force"));
        assert!(err.is_setup_error());
    }

    #[test]
    fn storage_errors_are_not_setup_errors() {
        let err = IndexError::Storage(rusqlite::Error::InvalidQuery);
        assert!(!err.is_setup_error());
    }
}
