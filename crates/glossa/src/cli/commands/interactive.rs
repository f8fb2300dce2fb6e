//! Implementation of `glossa interactive`.
//!
//! Queries are read from stdin on a separate thread and handed to a [`SearchWorker`]. A new
//! line supersedes every earlier query, so on fast input only the latest results print.

use std::{
    io::{self, BufRead},
    process::ExitCode,
    sync::mpsc::{self, RecvTimeoutError},
    thread,
    time::Duration,
};

use glossa_index::{RequestToken, SearchOutcome, SearchWorker};
use tracing::{debug, error};

use crate::cli::{
    args::InteractiveCommand,
    context::CommandContext,
    output::{dim, output_search_results},
};

/// How long to wait for new input before checking for results.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// How long to wait for the last query after stdin closes.
const FINAL_WAIT: Duration = Duration::from_secs(30);

/// Runs the read-search-print loop until stdin closes.
pub fn run(ctx: &mut CommandContext, cmd: &InteractiveCommand) -> ExitCode {
    let limit = cmd.limit.unwrap_or(ctx.config.search.limit);
    let dictionary = match ctx.take_dictionary() {
        Ok(d) => d,
        Err(code) => return code,
    };

    let worker = match SearchWorker::spawn(dictionary) {
        Ok(worker) => worker,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let lines = match spawn_line_reader() {
        Ok(rx) => rx,
        Err(e) => {
            eprintln!("error: failed to read stdin: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut pending: Option<RequestToken> = None;
    let mut failed = false;
    loop {
        match lines.recv_timeout(POLL_INTERVAL) {
            Ok(line) => {
                let term = line.trim();
                if term.is_empty() {
                    worker.invalidate();
                    pending = None;
                } else {
                    pending = Some(worker.submit(term, limit));
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        while let Some(outcome) = worker.try_recv() {
            if pending == Some(outcome.token) {
                pending = None;
            }
            failed |= !print_outcome(outcome, limit);
        }
    }

    if pending.is_some() {
        match worker.recv_timeout(FINAL_WAIT) {
            Some(outcome) => failed |= !print_outcome(outcome, limit),
            None => debug!("no result for final query"),
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Forwards stdin lines over a channel from a background thread.
fn spawn_line_reader() -> io::Result<mpsc::Receiver<String>> {
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("glossa-stdin".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        })?;
    Ok(rx)
}

/// Prints one search outcome. Returns false if the search failed.
fn print_outcome(outcome: SearchOutcome, limit: usize) -> bool {
    println!("{}", dim(&format!("> {} (limit {limit})", outcome.term)));
    match outcome.result {
        Ok(entries) => {
            output_search_results(&outcome.term, entries, false, false);
            true
        }
        Err(e) => {
            error!(error = %e, term = %outcome.term, "search failed");
            eprintln!("error: search failed: {e}");
            false
        }
    }
}
