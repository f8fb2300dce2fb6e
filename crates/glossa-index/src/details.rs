//! Entry detail resolution.

use std::iter;

use tracing::debug;

use crate::{
    entry::{DictionarySense, DictionaryWordDetails},
    error::IndexError,
    store::EntryStore,
};

/// Parses a caller-supplied entry id.
///
/// Returns `None` for anything that is not a plain decimal integer, which callers report as
/// "cannot determine which entry", distinct from an id that does not exist.
pub fn parse_entry_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Loads the full headword view for the entry with `id`.
///
/// Every sense sharing the entry's exact headword is included, the requested entry exactly
/// once, ordered by `(sense, id)`. Returns `Ok(None)` when no entry has that id.
pub fn resolve_details<S: EntryStore + ?Sized>(
    store: &S,
    id: i64,
) -> Result<Option<DictionaryWordDetails>, IndexError> {
    let Some(entry) = store.entry_by_id(id)? else {
        debug!(id, "entry not found");
        return Ok(None);
    };

    let related = store.entries_by_word(&entry.word)?;
    let word = entry.word.clone();
    let senses = iter::once(entry)
        .chain(related)
        .map(DictionarySense::from);

    Ok(Some(DictionaryWordDetails::new(word, senses)))
}
