//! Dictionary entry types.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

/// One sense of one headword, as stored in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DictionaryEntry {
    /// Unique row identifier.
    pub id: i64,
    /// Headword as stored; casing is preserved.
    pub word: String,
    /// Part-of-speech tag, if the source provided one.
    pub pos: Option<String>,
    /// Ordinal of this sense within the headword.
    pub sense: i64,
    /// Definition text.
    pub definition: String,
    /// Usage examples; empty when the stored value is absent or malformed.
    pub examples: Vec<String>,
}

/// A single sense of a headword, detached from the headword itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DictionarySense {
    /// Row identifier of the originating entry.
    pub id: i64,
    /// Part-of-speech tag.
    pub pos: Option<String>,
    /// Sense ordinal.
    pub sense: i64,
    /// Definition text.
    pub definition: String,
    /// Usage examples.
    pub examples: Vec<String>,
}

impl From<DictionaryEntry> for DictionarySense {
    fn from(entry: DictionaryEntry) -> Self {
        Self {
            id: entry.id,
            pos: entry.pos,
            sense: entry.sense,
            definition: entry.definition,
            examples: entry.examples,
        }
    }
}

/// A headword with all of its senses, ordered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DictionaryWordDetails {
    /// The headword.
    pub word: String,
    /// Senses sorted by ascending `(sense, id)`.
    pub senses: Vec<DictionarySense>,
}

impl DictionaryWordDetails {
    /// Builds details for a headword, ordering senses by `(sense, id)` and dropping repeated
    /// ids.
    pub fn new(word: impl Into<String>, senses: impl IntoIterator<Item = DictionarySense>) -> Self {
        let mut seen = HashSet::new();
        let mut senses: Vec<DictionarySense> =
            senses.into_iter().filter(|s| seen.insert(s.id)).collect();
        senses.sort_by_key(|s| (s.sense, s.id));
        Self {
            word: word.into(),
            senses,
        }
    }

    /// Distinct non-empty part-of-speech tags, in sense order.
    pub fn parts_of_speech(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.senses
            .iter()
            .filter_map(|s| s.pos.as_deref())
            .map(str::trim)
            .filter(|pos| !pos.is_empty() && seen.insert(*pos))
            .collect()
    }
}

/// Decodes the stored examples column.
///
/// The column holds a JSON array of strings. Non-string items are skipped and each kept
/// item is trimmed. Anything unparseable, or any JSON value that is not an array, decodes to
/// no examples.
pub fn parse_examples(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Array(items)) => items
            .iter()
            .filter_map(serde_json::Value::as_str)
            .map(|s| s.trim().to_string())
            .collect(),
        Ok(_) => Vec::new(),
        Err(e) => {
            debug!(error = %e, "ignoring malformed examples column");
            Vec::new()
        }
    }
}
