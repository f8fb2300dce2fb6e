//! Implementation of `glossa status`.

use std::process::ExitCode;

use glossa_config::{ConfigWarning, discover_config_files, format_path_for_display};
use glossa_index::inspect_dataset;

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, warning},
};

/// Shows configuration files, dataset health, and validation warnings.
///
/// Exits non-zero when the dataset is unusable or the configuration has warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let cwd = &ctx.cwd;
    let config = &ctx.config;

    let config_files = discover_config_files(cwd);
    if config_files.is_empty() && config.dataset.candidates.is_empty() {
        println!("{}", dim("No configuration files found."));
        println!();
        println!(
            "Run {} to create a configuration file.",
            subheader("glossa init")
        );
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader("Config files:"));
    if config_files.is_empty() {
        println!("   {}", dim("(none)"));
    }
    for path in &config_files {
        println!("   {}", format_path_for_display(path, Some(cwd)));
    }
    println!();

    let mut healthy = true;
    println!("{}", subheader("Dataset:"));
    match config.dataset_path() {
        None => {
            healthy = false;
            println!("   {}", dim("(not configured)"));
        }
        Some(path) => {
            let status = inspect_dataset(&path);
            let display_path = format_path_for_display(&path, config.config_root.as_deref());
            let description = status.description();
            let description = if status.is_ready() {
                description
            } else {
                healthy = false;
                warning(&description)
            };
            println!("   {display_path}");
            println!("   {description}");
            if let Some(hint) = status.hint() {
                println!("   {}", dim(&format!("Hint: {hint}")));
            }
            if config.dataset.candidates.len() > 1 {
                print_candidates(ctx);
            }
        }
    }
    println!();

    println!("{}", subheader("Search:"));
    println!("   limit = {}", config.search.limit);
    println!("   backfill_factor = {}", config.search.backfill_factor);
    println!();

    let warnings: Vec<ConfigWarning> = config
        .validate()
        .into_iter()
        .filter(|w| !is_reported_above(w))
        .collect();
    if warnings.is_empty() {
        if healthy {
            println!("No issues found.");
            return ExitCode::SUCCESS;
        }
        return ExitCode::FAILURE;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();

    ExitCode::FAILURE
}

/// Lists every configured dataset candidate with its existence.
fn print_candidates(ctx: &CommandContext) {
    println!("   {}", dim("Candidates:"));
    for candidate in &ctx.config.dataset.candidates {
        let display = format_path_for_display(candidate, ctx.config.config_root.as_deref());
        if candidate.is_file() {
            println!("      {display}");
        } else {
            println!("      {display} {}", warning("[missing]"));
        }
    }
}

/// Warnings already covered by the dataset section.
fn is_reported_above(w: &ConfigWarning) -> bool {
    matches!(
        w,
        ConfigWarning::NoDatasetConfigured | ConfigWarning::DatasetMissing { .. }
    )
}
