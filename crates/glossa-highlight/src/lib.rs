//! Terminal styling for glossa.
//!
//! Provides ANSI styling for dictionary output (headwords, part-of-speech tags, numbered
//! senses, usage examples) and syntax highlighting for the TOML shown by `glossa config`
//! and `glossa init`.

#![warn(missing_docs)]

use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::{SyntaxReference, SyntaxSet},
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

/// ANSI escape sequences used by the styling helpers.
pub mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Italic text.
    pub const ITALIC: &str = "\x1b[3m";
    /// Dim text.
    pub const DIM: &str = "\x1b[2m";
    /// Green foreground.
    pub const GREEN: &str = "\x1b[32m";
    /// Magenta foreground.
    pub const MAGENTA: &str = "\x1b[35m";
    /// Yellow foreground.
    pub const YELLOW: &str = "\x1b[33m";
    /// Reset all attributes.
    pub const RESET: &str = "\x1b[0m";
}

/// Wraps `text` in the given escape sequences and a trailing reset.
fn paint(codes: &[&str], text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    for code in codes {
        out.push_str(code);
    }
    out.push_str(text);
    out.push_str(colors::RESET);
    out
}

/// Subheader: bold.
pub fn subheader(text: &str) -> String {
    paint(&[colors::BOLD], text)
}

/// De-emphasized text.
pub fn dim(text: &str) -> String {
    paint(&[colors::DIM], text)
}

/// Warning message: yellow.
pub fn warning(text: &str) -> String {
    paint(&[colors::YELLOW], text)
}

/// A dictionary headword: bold green.
pub fn headword(word: &str) -> String {
    paint(&[colors::BOLD, colors::GREEN], word)
}

/// A part-of-speech tag, bracketed and italic magenta.
pub fn pos_tag(pos: &str) -> String {
    paint(&[colors::ITALIC, colors::MAGENTA], &format!("[{pos}]"))
}

/// A sense ordinal such as `2.`, right-aligned to `width` digits.
pub fn sense_number(sense: i64, width: usize) -> String {
    paint(&[colors::BOLD], &format!("{sense:>width$}."))
}

/// A usage example, quoted and dimmed.
pub fn example(text: &str) -> String {
    paint(&[colors::DIM, colors::ITALIC], &format!("\u{201c}{text}\u{201d}"))
}

/// An entry id marker such as `#42`.
pub fn entry_id(id: i64) -> String {
    dim(&format!("#{id}"))
}

/// Syntax highlighter for configuration files.
pub struct Highlighter {
    /// Language definitions, including TOML from the two-face extras.
    syntax_set: SyntaxSet,
    /// Embedded color themes.
    theme_set: EmbeddedLazyThemeSet,
    /// Active theme.
    theme: EmbeddedThemeName,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a highlighter using the Dracula theme.
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Highlights TOML.
    pub fn highlight_toml(&self, content: &str) -> String {
        self.highlight(content, "toml")
    }

    /// Highlights `content` using the syntax matching `syntax` by extension or name.
    ///
    /// Unknown syntaxes fall back to plain text.
    fn highlight(&self, content: &str, syntax: &str) -> String {
        let syntax = self.find_syntax(syntax);
        let mut lines = HighlightLines::new(syntax, self.theme_set.get(self.theme));

        let mut output = String::with_capacity(content.len() * 2);
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = lines
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&ranges, false));
        }
        output.push_str(colors::RESET);
        output
    }

    /// Looks up a syntax by extension, then by name, then falls back to plain text.
    fn find_syntax(&self, syntax: &str) -> &SyntaxReference {
        self.syntax_set
            .find_syntax_by_extension(syntax)
            .or_else(|| self.syntax_set.find_syntax_by_name(syntax))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }
}
