//! Diagnostic logging setup.

use std::io;

use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "GLOSSA_LOG";

/// Filter used when neither `-v` nor `GLOSSA_LOG` is given.
const DEFAULT_FILTER: &str = "warn";

/// Returns the filter directive for a `-v` count, if the flag was given.
fn verbose_directive(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("warn,glossa=debug,glossa_index=debug,glossa_config=debug"),
        _ => Some("warn,glossa=trace,glossa_index=trace,glossa_config=trace"),
    }
}

/// Builds the event filter: `-v` wins over `GLOSSA_LOG`, which wins over the default.
fn build_filter(verbose: u8) -> EnvFilter {
    if let Some(directive) = verbose_directive(verbose) {
        return EnvFilter::new(directive);
    }
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber writing human-readable events to stderr.
pub fn init_tracing(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose))
        .with_writer(io::stderr)
        .with_target(verbose > 0)
        .init();
}
