//! Implementation of `glossa search`.

use std::process::ExitCode;

use tracing::error;

use crate::cli::{args::SearchCommand, context::CommandContext, output::output_search_results};

/// Searches the dictionary and prints matching words.
pub fn run(ctx: &mut CommandContext, cmd: &SearchCommand) -> ExitCode {
    let term = cmd.term();
    let limit = cmd.limit.unwrap_or(ctx.config.search.limit);

    let dictionary = match ctx.dictionary() {
        Ok(d) => d,
        Err(code) => return code,
    };

    let entries = match dictionary.search(&term, limit) {
        Ok(entries) => entries,
        Err(e) => {
            error!(error = %e, term = %term, "search failed");
            eprintln!("error: search failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    output_search_results(&term, entries, cmd.flat, cmd.json)
}
