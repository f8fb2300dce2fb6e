//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
pub use glossa_highlight::{dim, subheader, warning};
use glossa_highlight::{entry_id, example, headword, pos_tag, sense_number};
use glossa_index::{DictionaryEntry, DictionaryWordDetails, group_by_word};
use serde::Serialize;

/// JSON output for `glossa search`.
#[derive(Serialize)]
struct JsonSearchOutput<'a> {
    /// The search term as typed.
    query: &'a str,
    /// Number of entries returned.
    total_matches: usize,
    /// Entries grouped by headword (default mode).
    #[serde(skip_serializing_if = "Option::is_none")]
    words: Option<Vec<DictionaryWordDetails>>,
    /// Flat entries (`--flat` mode).
    #[serde(skip_serializing_if = "Option::is_none")]
    entries: Option<&'a [DictionaryEntry]>,
}

/// JSON output for `glossa show`.
#[derive(Serialize)]
struct JsonDetailsOutput<'a> {
    /// The requested entry id.
    id: i64,
    /// Distinct parts of speech across all senses.
    parts_of_speech: Vec<&'a str>,
    /// Headword and senses.
    #[serde(flatten)]
    details: &'a DictionaryWordDetails,
}

/// Serializes `value` as pretty JSON to stdout.
fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints search results in the requested format.
pub fn output_search_results(
    query: &str,
    entries: Vec<DictionaryEntry>,
    flat: bool,
    json: bool,
) -> ExitCode {
    if json {
        let total_matches = entries.len();
        return if flat {
            print_json(&JsonSearchOutput {
                query,
                total_matches,
                words: None,
                entries: Some(&entries),
            })
        } else {
            print_json(&JsonSearchOutput {
                query,
                total_matches,
                words: Some(group_by_word(entries)),
                entries: None,
            })
        };
    }

    if entries.is_empty() {
        println!("{}", dim("No results found."));
        return ExitCode::SUCCESS;
    }

    if flat {
        println!("{}", format_flat_table(&entries));
    } else {
        for details in group_by_word(entries) {
            print!("{}", format_word(&details));
        }
    }
    ExitCode::SUCCESS
}

/// Prints the detail view for one headword.
pub fn output_details(requested_id: i64, details: &DictionaryWordDetails, json: bool) -> ExitCode {
    if json {
        return print_json(&JsonDetailsOutput {
            id: requested_id,
            parts_of_speech: details.parts_of_speech(),
            details,
        });
    }

    print!("{}", format_word(details));
    ExitCode::SUCCESS
}

/// Renders one headword with numbered senses, tags and examples.
pub fn format_word(details: &DictionaryWordDetails) -> String {
    let mut out = String::new();

    let tags: Vec<String> = details
        .parts_of_speech()
        .into_iter()
        .map(pos_tag)
        .collect();
    if tags.is_empty() {
        out.push_str(&format!("{}\n", headword(&details.word)));
    } else {
        out.push_str(&format!("{} {}\n", headword(&details.word), tags.join(" ")));
    }

    let width = details
        .senses
        .iter()
        .map(|s| s.sense.to_string().len())
        .max()
        .unwrap_or(1);

    for sense in &details.senses {
        out.push_str(&format!(
            "  {} {} {}\n",
            sense_number(sense.sense, width),
            sense.definition,
            entry_id(sense.id)
        ));
        for text in &sense.examples {
            out.push_str(&format!("  {:width$}  {}\n", "", example(text)));
        }
    }
    out.push('\n');
    out
}

/// Renders flat entries as a table.
pub fn format_flat_table(entries: &[DictionaryEntry]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Id", "Word", "POS", "Sense", "Definition"]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(entry.id),
            Cell::new(&entry.word),
            Cell::new(entry.pos.as_deref().unwrap_or("")),
            Cell::new(entry.sense),
            Cell::new(&entry.definition),
        ]);
    }
    table
}

/// Indents every line of `content` by three spaces.
pub fn indent_content(content: &str) -> String {
    content
        .lines()
        .map(|line| format!("   {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
