//! SQLite-backed lexical search for glossa.
//!
//! This crate answers dictionary lookups against a read-only SQLite dataset holding an
//! `entries` table and an `entries_fts` FTS5 index over it. It provides:
//! - Term normalization shared by every matcher
//! - A prefix matcher over headwords and a ranked full-text matcher
//! - A merge engine that combines both into one bounded, duplicate-free result
//! - Grouping of flat sense rows into headwords, and entry detail resolution
//! - Request sequencing and a background worker that discard stale results
//!
//! # Example
//!
//! ```no_run
//! use glossa_index::{Dictionary, group_by_word};
//!
//! let mut dictionary = Dictionary::new("assets/base.sqlite");
//! let entries = dictionary.search("bank", 25).unwrap();
//! for word in group_by_word(entries) {
//!     println!("{} ({} senses)", word.word, word.senses.len());
//! }
//! ```

#![warn(missing_docs)]

mod details;
mod dictionary;
mod entry;
mod error;
mod group;
mod normalize;
mod query;
mod search;
mod sequence;
mod sqlite;
mod status;
mod store;
#[cfg(test)]
mod test_support;
mod worker;

pub use details::{parse_entry_id, resolve_details};
pub use dictionary::Dictionary;
pub use entry::{DictionaryEntry, DictionarySense, DictionaryWordDetails, parse_examples};
pub use error::IndexError;
pub use group::group_by_word;
pub use normalize::normalize;
pub use query::{full_text_query, prefix_pattern};
pub use search::{SearchParams, merge_matches, search, search_normalized};
pub use sequence::{RequestSequencer, RequestToken};
pub use sqlite::{REQUIRED_TABLES, SqliteStore};
pub use status::{DatasetStatus, inspect_dataset};
pub use store::EntryStore;
pub use worker::{SearchOutcome, SearchWorker};
