//! Query term normalization.

use unicode_normalization::UnicodeNormalization;

/// Canonicalizes user input before any matching happens.
///
/// Applies NFKC compatibility composition, trims surrounding whitespace, then lowercases.
/// Interior whitespace is left untouched. The function is idempotent.
pub fn normalize(term: &str) -> String {
    let composed: String = term.nfkc().collect();
    composed.trim().to_lowercase()
}
