//! Implementation of `glossa show`.

use std::process::ExitCode;

use glossa_index::parse_entry_id;
use tracing::error;

use crate::cli::{args::ShowCommand, context::CommandContext, output::output_details};

/// Shows every sense of the headword an entry belongs to.
pub fn run(ctx: &mut CommandContext, cmd: &ShowCommand) -> ExitCode {
    let Some(id) = parse_entry_id(&cmd.id) else {
        eprintln!("error: unable to determine which entry to display: {}", cmd.id);
        eprintln!("Entry ids are the numbers printed after each sense by 'glossa search'.");
        return ExitCode::FAILURE;
    };

    let dictionary = match ctx.dictionary() {
        Ok(d) => d,
        Err(code) => return code,
    };

    match dictionary.resolve_details(id) {
        Ok(Some(details)) => output_details(id, &details, cmd.json),
        Ok(None) => {
            eprintln!("error: entry not found: {id}");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(error = %e, id, "failed to load entry");
            eprintln!("error: failed to load the dictionary entry: {e}");
            ExitCode::FAILURE
        }
    }
}
