//! SQLite-backed entry store.

use std::path::{Path, PathBuf};

use rusqlite::{
    Connection, OpenFlags, OptionalExtension, Row, functions::FunctionFlags, params,
    types::ValueRef,
};
use tracing::{debug, info};
use unicode_normalization::UnicodeNormalization;

use crate::{
    entry::{DictionaryEntry, parse_examples},
    error::IndexError,
    query::{full_text_query, prefix_pattern},
    store::EntryStore,
};

/// Tables the dataset must contain.
pub const REQUIRED_TABLES: [&str; 2] = ["entries", "entries_fts"];

/// SQL function used to case-fold headwords for prefix matching.
const FOLD_FUNCTION: &str = "glossa_fold";

/// SQLite's default `SQLITE_MAX_LIKE_PATTERN_LENGTH`, in bytes.
const MAX_LIKE_PATTERN_BYTES: usize = 50_000;

/// Prefix match over case-folded headwords.
const PREFIX_SQL: &str = r"
SELECT id, word, pos, sense, definition, examples
FROM entries
WHERE glossa_fold(word) LIKE ?1 ESCAPE '\'
ORDER BY glossa_fold(word), word, sense, id
LIMIT ?2";

/// Full-text match joined back to the entries table, best rank first.
const FULL_TEXT_SQL: &str = "
SELECT e.id, e.word, e.pos, e.sense, e.definition, e.examples
FROM entries_fts
JOIN entries e ON e.id = entries_fts.rowid
WHERE entries_fts MATCH ?1
ORDER BY bm25(entries_fts), e.id
LIMIT ?2";

/// Single entry lookup.
const BY_ID_SQL: &str = "
SELECT id, word, pos, sense, definition, examples
FROM entries
WHERE id = ?1";

/// All senses of one exact headword.
const BY_WORD_SQL: &str = "
SELECT id, word, pos, sense, definition, examples
FROM entries
WHERE word = ?1
ORDER BY sense, id";

/// A read-only connection to a validated dictionary dataset.
pub struct SqliteStore {
    /// Open connection.
    conn: Connection,
}

impl SqliteStore {
    /// Opens the dataset at `path` read-only and validates its schema.
    ///
    /// Fails with [`IndexError::DatasetNotFound`] if the file does not exist and with
    /// [`IndexError::SchemaMismatch`] if required tables are absent. No query runs against
    /// an invalid dataset.
    pub fn open(path: &Path) -> Result<Self, IndexError> {
        if !path.is_file() {
            return Err(IndexError::DatasetNotFound {
                path: path.to_path_buf(),
            });
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags).map_err(|source| IndexError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let store = Self::from_connection(conn, path.to_path_buf())?;
        info!(path = %path.display(), "opened dictionary dataset");
        Ok(store)
    }

    /// Wraps an existing connection after validating its schema.
    ///
    /// `path` only names the dataset in a [`IndexError::SchemaMismatch`].
    pub fn from_connection(conn: Connection, path: PathBuf) -> Result<Self, IndexError> {
        let missing = missing_tables(&conn)?;
        if !missing.is_empty() {
            return Err(IndexError::SchemaMismatch { path, missing });
        }
        register_fold_function(&conn)?;
        Ok(Self { conn })
    }

    /// Total number of entries in the dataset.
    pub fn entry_count(&self) -> Result<u64, IndexError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    /// Runs a row-returning statement and collects entries.
    fn query_entries(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<DictionaryEntry>, IndexError> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        let rows = stmt.query_map(params, entry_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

impl EntryStore for SqliteStore {
    fn match_prefix(
        &self,
        normalized: &str,
        limit: usize,
    ) -> Result<Vec<DictionaryEntry>, IndexError> {
        if normalized.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }
        let pattern = prefix_pattern(normalized);
        if pattern.len() > MAX_LIKE_PATTERN_BYTES {
            // SQLite rejects longer LIKE patterns.
            debug!(bytes = pattern.len(), "prefix pattern too long; no matches");
            return Ok(Vec::new());
        }
        self.query_entries(PREFIX_SQL, params![pattern, sql_limit(limit)])
    }

    fn match_full_text(
        &self,
        normalized: &str,
        limit: usize,
    ) -> Result<Vec<DictionaryEntry>, IndexError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let Some(query) = full_text_query(normalized) else {
            return Ok(Vec::new());
        };
        debug!(%query, "full-text query");
        self.query_entries(FULL_TEXT_SQL, params![query, sql_limit(limit)])
    }

    fn entry_by_id(&self, id: i64) -> Result<Option<DictionaryEntry>, IndexError> {
        let mut stmt = self.conn.prepare_cached(BY_ID_SQL)?;
        Ok(stmt.query_row([id], entry_from_row).optional()?)
    }

    fn entries_by_word(&self, word: &str) -> Result<Vec<DictionaryEntry>, IndexError> {
        self.query_entries(BY_WORD_SQL, [word])
    }
}

/// Maps a result row in `id, word, pos, sense, definition, examples` order.
fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<DictionaryEntry> {
    Ok(DictionaryEntry {
        id: row.get(0)?,
        word: row.get(1)?,
        pos: row.get(2)?,
        sense: row.get(3)?,
        definition: row.get(4)?,
        examples: parse_examples(examples_text(row.get_ref(5)?)),
    })
}

/// Borrows the examples column as text.
///
/// Values that are not valid UTF-8 text decode as absent, so one bad row never fails the
/// query it belongs to.
fn examples_text(value: ValueRef<'_>) -> Option<&str> {
    match value {
        ValueRef::Null => None,
        ValueRef::Text(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) => Some(text),
            Err(e) => {
                debug!(error = %e, "ignoring examples column that is not valid UTF-8");
                None
            }
        },
        other => {
            debug!(kind = ?other.data_type(), "ignoring examples column that is not text");
            None
        }
    }
}

/// Returns the required tables that are not present, in declaration order.
fn missing_tables(conn: &Connection) -> Result<Vec<String>, IndexError> {
    let mut stmt =
        conn.prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1")?;
    let mut missing = Vec::new();
    for table in REQUIRED_TABLES {
        if !stmt.exists([table])? {
            missing.push(table.to_string());
        }
    }
    Ok(missing)
}

/// Registers the Unicode-aware case-folding function used by the prefix matcher.
///
/// Headwords get the same NFKC and lowercase treatment as query terms. SQLite's built-in
/// `lower()` only folds ASCII.
fn register_fold_function(conn: &Connection) -> Result<(), IndexError> {
    conn.create_scalar_function(
        FOLD_FUNCTION,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let word: Option<String> = ctx.get(0)?;
            Ok(word.map(|w| w.nfkc().collect::<String>().to_lowercase()))
        },
    )?;
    Ok(())
}

/// Converts a result limit into a SQL integer.
fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}
