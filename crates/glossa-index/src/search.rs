//! Merge and deduplication of prefix and full-text matches.

use std::collections::HashSet;

use glossa_config::{DEFAULT_BACKFILL_FACTOR, DEFAULT_SEARCH_LIMIT, SearchSettings};
use tracing::{debug, debug_span};

use crate::{entry::DictionaryEntry, error::IndexError, normalize::normalize, store::EntryStore};

/// Parameters for a single search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    /// Maximum number of entries returned.
    pub limit: usize,
    /// Multiplier applied to the open slots when querying the full-text matcher, so that
    /// duplicates of prefix rows do not starve the backfill.
    pub backfill_factor: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SEARCH_LIMIT,
            backfill_factor: DEFAULT_BACKFILL_FACTOR,
        }
    }
}

impl From<&SearchSettings> for SearchParams {
    fn from(settings: &SearchSettings) -> Self {
        Self {
            limit: settings.limit,
            backfill_factor: settings.backfill_factor,
        }
    }
}

impl SearchParams {
    /// Returns a copy with a different limit.
    pub fn with_limit(self, limit: usize) -> Self {
        Self { limit, ..self }
    }
}

/// Searches for `term`, normalizing it first.
///
/// An empty normalized term returns no entries without touching the store.
pub fn search<S: EntryStore + ?Sized>(
    store: &S,
    term: &str,
    params: &SearchParams,
) -> Result<Vec<DictionaryEntry>, IndexError> {
    search_normalized(store, &normalize(term), params)
}

/// Searches for an already-normalized term.
///
/// Prefix matches come first in their matcher order. When they do not fill the limit, the
/// full-text matcher is asked for `remaining * backfill_factor` rows and those not already
/// present are appended in relevance order. The result never exceeds `params.limit` and
/// never repeats an id.
pub fn search_normalized<S: EntryStore + ?Sized>(
    store: &S,
    normalized: &str,
    params: &SearchParams,
) -> Result<Vec<DictionaryEntry>, IndexError> {
    let limit = params.limit;
    if normalized.is_empty() || limit == 0 {
        return Ok(Vec::new());
    }

    let _span = debug_span!("search", term = normalized, limit).entered();

    let prefix = store.match_prefix(normalized, limit)?;
    debug!(count = prefix.len(), "prefix matches");
    if prefix.len() >= limit {
        return Ok(merge_matches(prefix, Vec::new(), limit));
    }

    let remaining = limit - prefix.len();
    let backfill = remaining.saturating_mul(params.backfill_factor);
    let full_text = if backfill == 0 {
        Vec::new()
    } else {
        store.match_full_text(normalized, backfill)?
    };
    debug!(count = full_text.len(), requested = backfill, "full-text matches");

    Ok(merge_matches(prefix, full_text, limit))
}

/// Combines two ranked lists into one bounded, duplicate-free list.
///
/// Primary rows keep their order and precede secondary rows; secondary rows whose id was
/// already taken are skipped. Stops once `limit` entries are collected.
pub fn merge_matches(
    primary: Vec<DictionaryEntry>,
    secondary: Vec<DictionaryEntry>,
    limit: usize,
) -> Vec<DictionaryEntry> {
    let mut seen = HashSet::with_capacity(limit);
    let mut merged = Vec::with_capacity(limit.min(primary.len() + secondary.len()));

    for entry in primary.into_iter().chain(secondary) {
        if merged.len() >= limit {
            break;
        }
        if seen.insert(entry.id) {
            merged.push(entry);
        }
    }

    merged
}
