//! Dataset health detection.

use std::path::Path;

use crate::{error::IndexError, sqlite::SqliteStore};

/// Health of the configured dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetStatus {
    /// Dataset opened and validated.
    Ready {
        /// Number of entries in the dataset.
        entries: u64,
    },
    /// No file exists at the dataset path.
    Missing,
    /// The file exists but lacks required tables.
    SchemaMismatch {
        /// Missing table names.
        missing: Vec<String>,
    },
    /// The file could not be opened or read.
    Unreadable {
        /// Error description.
        message: String,
    },
}

impl DatasetStatus {
    /// Returns a short description for display.
    pub fn description(&self) -> String {
        match self {
            Self::Ready { entries } => format!("ready ({entries} entries)"),
            Self::Missing => "missing".to_string(),
            Self::SchemaMismatch { missing } => {
                format!("schema mismatch (missing {})", missing.join(", "))
            }
            Self::Unreadable { message } => format!("unreadable ({message})"),
        }
    }

    /// Returns true if searches can run against the dataset.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    /// Returns a remediation hint, if one applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Ready { .. } => None,
            Self::Missing => {
                Some("set [dataset] path in .glossa.toml or pass --dataset to point at a dataset")
            }
            Self::SchemaMismatch { .. } => {
                Some("regenerate the dataset by re-running its build with --force")
            }
            Self::Unreadable { .. } => Some("check that the file is a SQLite database"),
        }
    }
}

/// Opens the dataset at `path` and reports its health without failing.
pub fn inspect_dataset(path: &Path) -> DatasetStatus {
    let store = match SqliteStore::open(path) {
        Ok(store) => store,
        Err(IndexError::DatasetNotFound { .. }) => return DatasetStatus::Missing,
        Err(IndexError::SchemaMismatch { missing, .. }) => {
            return DatasetStatus::SchemaMismatch { missing };
        }
        Err(e) => {
            return DatasetStatus::Unreadable {
                message: e.to_string(),
            };
        }
    };

    match store.entry_count() {
        Ok(entries) => DatasetStatus::Ready { entries },
        Err(e) => DatasetStatus::Unreadable {
            message: e.to_string(),
        },
    }
}
