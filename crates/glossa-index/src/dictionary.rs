//! Lazily opened dictionary handle.

use std::path::{Path, PathBuf};

use glossa_config::Config;

use crate::{
    details::resolve_details,
    entry::{DictionaryEntry, DictionaryWordDetails},
    error::IndexError,
    normalize::normalize,
    search::{SearchParams, search_normalized},
    sqlite::SqliteStore,
    store::EntryStore,
};

/// The dictionary service: a dataset location plus a connection opened on first use.
///
/// The connection is opened, validated and then reused for the life of the handle.
pub struct Dictionary {
    /// Dataset file location.
    path: PathBuf,
    /// Default search parameters.
    params: SearchParams,
    /// Open store, once initialized.
    store: Option<SqliteStore>,
}

impl Dictionary {
    /// Creates a handle for the dataset at `path` without touching the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            params: SearchParams::default(),
            store: None,
        }
    }

    /// Creates a handle from resolved configuration.
    pub fn from_config(config: &Config) -> Result<Self, IndexError> {
        let path = config.dataset_path().ok_or(IndexError::NoDataset)?;
        Ok(Self::new(path).with_params(SearchParams::from(&config.search)))
    }

    /// Replaces the default search parameters.
    pub fn with_params(mut self, params: SearchParams) -> Self {
        self.params = params;
        self
    }

    /// Dataset file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Default search parameters.
    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Returns true once the dataset has been opened.
    pub fn is_open(&self) -> bool {
        self.store.is_some()
    }

    /// Opens and validates the dataset if that has not happened yet.
    pub fn open(&mut self) -> Result<&SqliteStore, IndexError> {
        let store = match self.store.take() {
            Some(store) => store,
            None => SqliteStore::open(&self.path)?,
        };
        Ok(self.store.insert(store))
    }

    /// Searches with the default parameters but an explicit limit.
    ///
    /// An empty term returns immediately without opening the dataset.
    pub fn search(&mut self, term: &str, limit: usize) -> Result<Vec<DictionaryEntry>, IndexError> {
        let normalized = normalize(term);
        if normalized.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }
        let params = self.params.with_limit(limit);
        let store = self.open()?;
        search_normalized(store, &normalized, &params)
    }

    /// Loads the full headword view for an entry id.
    pub fn resolve_details(
        &mut self,
        id: i64,
    ) -> Result<Option<DictionaryWordDetails>, IndexError> {
        resolve_details(self.open()?, id)
    }

    /// Runs only the prefix matcher.
    pub fn match_prefix(
        &mut self,
        term: &str,
        limit: usize,
    ) -> Result<Vec<DictionaryEntry>, IndexError> {
        let normalized = normalize(term);
        if normalized.is_empty() {
            return Ok(Vec::new());
        }
        self.open()?.match_prefix(&normalized, limit)
    }

    /// Runs only the full-text matcher.
    pub fn match_full_text(
        &mut self,
        term: &str,
        limit: usize,
    ) -> Result<Vec<DictionaryEntry>, IndexError> {
        let normalized = normalize(term);
        if normalized.is_empty() {
            return Ok(Vec::new());
        }
        self.open()?.match_full_text(&normalized, limit)
    }
}

#[cfg(test)]
mod tests {
    use glossa_config::{DatasetSettings, SearchSettings};

    use super::*;
    use crate::test_support::{TestDataset, sample_rows};

    fn sample() -> (TestDataset, Dictionary) {
        let dataset = TestDataset::with_rows(&sample_rows());
        let dictionary = Dictionary::new(dataset.path());
        (dataset, dictionary)
    }

    #[test]
    fn empty_search_does_not_open_dataset() {
        let mut dictionary = Dictionary::new("/definitely/not/here.sqlite");
        assert!(dictionary.search("  ", 10).unwrap().is_empty());
        assert!(!dictionary.is_open());
    }

    #[test]
    fn missing_dataset_surfaces_on_first_use() {
        let mut dictionary = Dictionary::new("/definitely/not/here.sqlite");
        let err = dictionary.search("bank", 10).unwrap_err();
        assert!(matches!(err, IndexError::DatasetNotFound { .. }));
    }

    #[test]
    fn schema_mismatch_surfaces_before_query() {
        let dataset = TestDataset::entries_only();
        let mut dictionary = Dictionary::new(dataset.path());
        let err = dictionary.search("bank", 10).unwrap_err();
        assert!(matches!(err, IndexError::SchemaMismatch { .. }));
        assert!(!dictionary.is_open());
    }

    #[test]
    fn search_merges_prefix_and_full_text() {
        let (_dataset, mut dictionary) = sample();

        let result = dictionary.search("Bank", 10).unwrap();
        let ids: Vec<i64> = result.iter().map(|e| e.id).collect();

        // Case variants of the headword, then its senses; full-text adds nothing new.
        assert_eq!(ids, vec![3, 1, 2]);
        assert!(dictionary.is_open());
    }

    #[test]
    fn search_backfills_from_definitions() {
        let (_dataset, mut dictionary) = sample();
        let result = dictionary.search("river", 10).unwrap();
        let ids: Vec<i64> = result.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn search_normalizes_compatibility_forms() {
        let (_dataset, mut dictionary) = sample();
        let result = dictionary.search("  ＡＰＰＬＥ ", 10).unwrap();
        assert_eq!(result[0].word, "apple");
    }

    #[test]
    fn resolve_details_groups_senses() {
        let (_dataset, mut dictionary) = sample();

        let details = dictionary.resolve_details(2).unwrap().unwrap();

        assert_eq!(details.word, "bank");
        let ids: Vec<i64> = details.senses.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(details.parts_of_speech(), vec!["noun"]);
        assert!(dictionary.resolve_details(12345).unwrap().is_none());
    }

    #[test]
    fn from_config_uses_dataset_and_search_settings() {
        let dataset = TestDataset::with_rows(&sample_rows());
        let config = Config {
            dataset: DatasetSettings {
                candidates: vec![dataset.path()],
            },
            search: SearchSettings {
                limit: 3,
                backfill_factor: 5,
            },
            config_root: None,
        };

        let dictionary = Dictionary::from_config(&config).unwrap();

        assert_eq!(dictionary.path(), dataset.path().as_path());
        assert_eq!(dictionary.params().limit, 3);
        assert_eq!(dictionary.params().backfill_factor, 5);
    }

    #[test]
    fn from_config_without_dataset_fails() {
        let result = Dictionary::from_config(&Config::default());
        assert!(matches!(result, Err(IndexError::NoDataset)));
    }
}
