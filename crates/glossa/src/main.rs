//! Command-line interface for the `glossa` offline dictionary.

#![warn(missing_docs)]

mod cli;

use std::process::ExitCode;

use cli::{CommandContext, args::parse_cli, commands, logging::init_tracing};

fn main() -> ExitCode {
    let cli = parse_cli();
    init_tracing(cli.verbose);

    let ctx = if cli.command.needs_config() {
        CommandContext::load(cli.dataset)
    } else {
        CommandContext::load_cwd_only()
    };
    let mut ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &mut ctx)
}
