//! Query text construction for the two matchers.
//!
//! Both builders take an already-normalized term and produce the parameter bound into the
//! corresponding SQL statement. Neither ever splices user text into SQL itself.

/// Characters that separate full-text tokens in addition to whitespace.
const FULL_TEXT_SEPARATORS: [char; 3] = ['\'', '"', '-'];

/// Escape character used in the prefix `LIKE` clause.
const LIKE_ESCAPE: char = '\\';

/// Builds the `LIKE` pattern for a headword prefix match.
///
/// `%` and `_` in the term match literally; the pattern ends with a single `%` wildcard.
pub fn prefix_pattern(normalized: &str) -> String {
    let mut pattern = String::with_capacity(normalized.len() + 2);
    for c in normalized.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Builds an FTS5 `MATCH` expression for a full-text search.
///
/// Apostrophes, double quotes and hyphens become token separators. Each remaining token is
/// quoted so FTS5 operators in user input are inert, tokens are implicitly AND-ed, and the
/// final token matches as a prefix. Returns `None` when no searchable token remains.
pub fn full_text_query(normalized: &str) -> Option<String> {
    let cleaned = normalized.replace(FULL_TEXT_SEPARATORS, " ");
    let tokens: Vec<&str> = cleaned
        .split_whitespace()
        .filter(|t| t.chars().any(char::is_alphanumeric))
        .collect();
    let (last, rest) = tokens.split_last()?;

    let mut query = String::new();
    for token in rest {
        query.push_str(&quote(token));
        query.push(' ');
    }
    query.push_str(&quote(last));
    query.push('*');
    Some(query)
}

/// Wraps a token in FTS5 string quotes.
fn quote(token: &str) -> String {
    format!("\"{}\"", token.replace('"', "\"\""))
}
