//! Clap argument definitions for the `glossa` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "glossa")]
#[command(about = "Offline dictionary lookup")]
pub struct Cli {
    /// Dataset file to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub dataset: Option<PathBuf>,

    /// Log verbosity (-v for debug, -vv for trace); overrides GLOSSA_LOG
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `glossa search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Search term; multiple words are joined with spaces
    #[arg(required = true)]
    pub terms: Vec<String>,

    /// Maximum entries to return [default: 25]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Print one row per sense instead of grouping by word
    #[arg(long)]
    pub flat: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

impl SearchCommand {
    /// The search term as typed.
    pub fn term(&self) -> String {
        self.terms.join(" ")
    }
}

/// Arguments for `glossa show`.
#[derive(Args, Debug, Clone)]
pub struct ShowCommand {
    /// Entry id, as printed by `glossa search`
    pub id: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `glossa interactive`.
#[derive(Args, Debug, Clone)]
pub struct InteractiveCommand {
    /// Maximum entries per query [default: 25]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Arguments for `glossa init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.glossa.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `glossa` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Look up words by prefix and full-text match
    #[command(after_help = "\
MATCHING:
  Headwords starting with the term are listed first, in alphabetical order.
  Remaining slots are filled with entries whose headword, definition or
  examples contain the term, best match first. The last word of the term
  matches as a prefix.

EXAMPLES:
  glossa search bank
  glossa search ice cream -n 10
  glossa search --flat run
  glossa search --json bank")]
    Search(SearchCommand),

    /// Show every sense of the word an entry belongs to
    Show(ShowCommand),

    /// Read queries from stdin, one per line, printing only the latest results
    Interactive(InteractiveCommand),

    /// Show configuration and dataset health
    Status,

    /// Show effective configuration settings
    Config,

    /// Initialize glossa configuration in current directory
    Init(InitCommand),
}

impl Commands {
    /// Returns true if the command needs the merged configuration.
    ///
    /// `init` must work even when an existing config file is invalid.
    pub fn needs_config(&self) -> bool {
        !matches!(self, Self::Init(_))
    }
}

/// Parses CLI arguments, exiting with usage information on error.
pub fn parse_cli() -> Cli {
    Cli::parse()
}
