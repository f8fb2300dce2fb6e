//! Test helpers shared across glossa-index unit tests.

use std::{cell::RefCell, path::PathBuf};

use rusqlite::{Connection, params};
use tempfile::TempDir;

use crate::{entry::DictionaryEntry, error::IndexError, store::EntryStore};

/// Schema of a generated dictionary dataset.
pub const SCHEMA_SQL: &str = "
CREATE TABLE entries (
    id INTEGER PRIMARY KEY,
    word TEXT NOT NULL,
    pos TEXT,
    sense INTEGER NOT NULL,
    definition TEXT NOT NULL,
    examples TEXT
);
CREATE VIRTUAL TABLE entries_fts USING fts5(
    word, definition, examples,
    content='entries', content_rowid='id'
);";

/// One row to insert into a test dataset.
#[derive(Debug, Clone, Copy)]
pub struct Row {
    /// Row id.
    pub id: i64,
    /// Headword.
    pub word: &'static str,
    /// Part of speech.
    pub pos: Option<&'static str>,
    /// Sense ordinal.
    pub sense: i64,
    /// Definition.
    pub definition: &'static str,
    /// Raw examples column.
    pub examples: Option<&'static str>,
}

/// A small dataset covering case variants, non-ASCII headwords and malformed examples.
pub fn sample_rows() -> Vec<Row> {
    vec![
        Row {
            id: 1,
            word: "bank",
            pos: Some("noun"),
            sense: 1,
            definition: "a financial institution that keeps money",
            examples: Some(r#"["she went to the bank"]"#),
        },
        Row {
            id: 2,
            word: "bank",
            pos: Some("noun"),
            sense: 2,
            definition: "the land alongside a river",
            examples: Some(r#"["we sat on the river bank"]"#),
        },
        Row {
            id: 3,
            word: "Bank",
            pos: Some("proper noun"),
            sense: 1,
            definition: "a surname",
            examples: None,
        },
        Row {
            id: 4,
            word: "bark",
            pos: Some("noun"),
            sense: 1,
            definition: "the sound a dog makes",
            examples: Some(r#"["the bark was loud"]"#),
        },
        Row {
            id: 5,
            word: "broken",
            pos: Some("adjective"),
            sense: 1,
            definition: "damaged and no longer working",
            examples: Some("not valid json"),
        },
        Row {
            id: 6,
            word: "apple",
            pos: Some("noun"),
            sense: 1,
            definition: "a round fruit",
            examples: Some(r#"["an apple a day"]"#),
        },
        Row {
            id: 7,
            word: "éclair",
            pos: Some("noun"),
            sense: 1,
            definition: "a pastry filled with cream",
            examples: None,
        },
        Row {
            id: 8,
            word: "run",
            pos: Some("verb"),
            sense: 1,
            definition: "to move swiftly on foot",
            examples: Some(r#"["run home"]"#),
        },
        Row {
            id: 9,
            word: "run",
            pos: Some("noun"),
            sense: 2,
            definition: "an act of running",
            examples: None,
        },
    ]
}

/// A dataset file in a temporary directory.
pub struct TestDataset {
    /// Backing directory, removed on drop.
    dir: TempDir,
}

impl TestDataset {
    /// Creates a complete dataset with the given rows.
    pub fn with_rows(rows: &[Row]) -> Self {
        let dataset = Self::blank();
        let conn = Connection::open(dataset.path()).unwrap();
        conn.execute_batch(SCHEMA_SQL).unwrap();
        for row in rows {
            conn.execute(
                "INSERT INTO entries (id, word, pos, sense, definition, examples)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    row.id,
                    row.word,
                    row.pos,
                    row.sense,
                    row.definition,
                    row.examples
                ],
            )
            .unwrap();
        }
        conn.execute_batch(
            "INSERT INTO entries_fts (rowid, word, definition, examples)
             SELECT id, word, definition, examples FROM entries;",
        )
        .unwrap();
        dataset
    }

    /// Creates a dataset that has the entries table but no full-text index.
    pub fn entries_only() -> Self {
        let dataset = Self::blank();
        let conn = Connection::open(dataset.path()).unwrap();
        conn.execute_batch(
            "CREATE TABLE entries (id INTEGER PRIMARY KEY, word TEXT NOT NULL, pos TEXT,
             sense INTEGER NOT NULL, definition TEXT NOT NULL, examples TEXT);",
        )
        .unwrap();
        dataset
    }

    /// Creates a valid SQLite file with none of the dictionary tables.
    pub fn empty_database() -> Self {
        let dataset = Self::blank();
        let conn = Connection::open(dataset.path()).unwrap();
        conn.execute_batch("CREATE TABLE meta (key TEXT, value TEXT);")
            .unwrap();
        dataset
    }

    /// Runs raw SQL against the dataset, e.g. to plant a corrupt value.
    pub fn execute(&self, sql: &str) {
        let conn = Connection::open(self.path()).unwrap();
        conn.execute_batch(sql).unwrap();
    }

    /// Reserves a temporary directory without creating the dataset file.
    fn blank() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Path of the dataset file.
    pub fn path(&self) -> PathBuf {
        self.dir.path().join("base.sqlite")
    }
}

/// Builds an entry with placeholder text.
pub fn entry(id: i64, word: &str, sense: i64) -> DictionaryEntry {
    DictionaryEntry {
        id,
        word: word.to_string(),
        pos: Some("noun".to_string()),
        sense,
        definition: format!("definition of {word} #{sense}"),
        examples: Vec::new(),
    }
}

/// A storage call recorded by [`MockStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// `match_prefix(term, limit)`.
    Prefix(String, usize),
    /// `match_full_text(term, limit)`.
    FullText(String, usize),
    /// `entry_by_id(id)`.
    ById(i64),
    /// `entries_by_word(word)`.
    ByWord(String),
}

/// An in-memory store with canned matcher output that records every call.
#[derive(Default)]
pub struct MockStore {
    /// Returned (truncated to the limit) by `match_prefix`.
    pub prefix: Vec<DictionaryEntry>,
    /// Returned (truncated to the limit) by `match_full_text`.
    pub full_text: Vec<DictionaryEntry>,
    /// Backing rows for id and word lookups.
    pub rows: Vec<DictionaryEntry>,
    /// When set, every call fails with a storage error.
    pub fail: bool,
    /// Calls in the order they were made.
    pub calls: RefCell<Vec<Call>>,
}

impl MockStore {
    /// Creates a store whose matchers return the given rows.
    pub fn with_matches(prefix: Vec<DictionaryEntry>, full_text: Vec<DictionaryEntry>) -> Self {
        Self {
            prefix,
            full_text,
            ..Self::default()
        }
    }

    /// Creates a store backed by rows for id and word lookups.
    pub fn with_rows(rows: Vec<DictionaryEntry>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    /// Returns a snapshot of the recorded calls.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Records a call and returns the configured failure, if any.
    fn record(&self, call: Call) -> Result<(), IndexError> {
        self.calls.borrow_mut().push(call);
        if self.fail {
            return Err(IndexError::Storage(rusqlite::Error::InvalidQuery));
        }
        Ok(())
    }
}

impl EntryStore for MockStore {
    fn match_prefix(
        &self,
        normalized: &str,
        limit: usize,
    ) -> Result<Vec<DictionaryEntry>, IndexError> {
        self.record(Call::Prefix(normalized.to_string(), limit))?;
        Ok(self.prefix.iter().take(limit).cloned().collect())
    }

    fn match_full_text(
        &self,
        normalized: &str,
        limit: usize,
    ) -> Result<Vec<DictionaryEntry>, IndexError> {
        self.record(Call::FullText(normalized.to_string(), limit))?;
        Ok(self.full_text.iter().take(limit).cloned().collect())
    }

    fn entry_by_id(&self, id: i64) -> Result<Option<DictionaryEntry>, IndexError> {
        self.record(Call::ById(id))?;
        Ok(self.rows.iter().find(|e| e.id == id).cloned())
    }

    fn entries_by_word(&self, word: &str) -> Result<Vec<DictionaryEntry>, IndexError> {
        self.record(Call::ByWord(word.to_string()))?;
        Ok(self.rows.iter().filter(|e| e.word == word).cloned().collect())
    }
}
