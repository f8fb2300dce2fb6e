//! Storage seam between the search engine and the dataset.

use crate::{entry::DictionaryEntry, error::IndexError};

/// Read access to dictionary entries.
///
/// All term arguments are already normalized. Implementations must return at most `limit`
/// rows from the matchers.
pub trait EntryStore {
    /// Entries whose case-folded headword starts with `normalized`, ordered by headword,
    /// then sense, then id.
    fn match_prefix(&self, normalized: &str, limit: usize)
    -> Result<Vec<DictionaryEntry>, IndexError>;

    /// Entries whose headword, definition or examples match `normalized` as a full-text
    /// query, best relevance first.
    fn match_full_text(
        &self,
        normalized: &str,
        limit: usize,
    ) -> Result<Vec<DictionaryEntry>, IndexError>;

    /// The entry with the given id, if any.
    fn entry_by_id(&self, id: i64) -> Result<Option<DictionaryEntry>, IndexError>;

    /// All entries whose headword equals `word` exactly, ordered by sense then id.
    fn entries_by_word(&self, word: &str) -> Result<Vec<DictionaryEntry>, IndexError>;
}
