//! Grouping flat sense rows into headwords.

use std::collections::HashMap;

use crate::entry::{DictionaryEntry, DictionarySense, DictionaryWordDetails};

/// Groups entries by exact headword.
///
/// Groups appear in the order their headword is first seen, so a ranked search result
/// keeps its ranking at the headword level. Keys are case-sensitive: `Bank` and `bank` form
/// separate groups. Within a group senses are ordered by `(sense, id)` and repeated ids are
/// kept once.
pub fn group_by_word(
    entries: impl IntoIterator<Item = DictionaryEntry>,
) -> Vec<DictionaryWordDetails> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<DictionarySense>> = HashMap::new();

    for entry in entries {
        let senses = groups.entry(entry.word.clone()).or_insert_with(|| {
            order.push(entry.word.clone());
            Vec::new()
        });
        senses.push(DictionarySense::from(entry));
    }

    order
        .into_iter()
        .filter_map(|word| {
            let senses = groups.remove(&word)?;
            Some(DictionaryWordDetails::new(word, senses))
        })
        .collect()
}
