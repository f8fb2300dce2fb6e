//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use glossa_config::Config;
use glossa_index::{Dictionary, IndexError};

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (default if no config files were found).
    pub config: Config,
    /// Dictionary opened for this invocation.
    dictionary: Option<Dictionary>,
}

impl CommandContext {
    /// Loads the current directory and configuration, applying a `--dataset` override.
    pub fn load(dataset_override: Option<PathBuf>) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let mut config = load_config_or_failure(&cwd)?;
        if let Some(path) = dataset_override {
            config.override_dataset(cwd.join(path));
        }
        Ok(Self {
            cwd,
            config,
            dictionary: None,
        })
    }

    /// Loads only the current directory, skipping configuration parsing.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
            dictionary: None,
        })
    }

    /// Returns the dictionary, opening and validating the dataset on first use.
    pub fn dictionary(&mut self) -> Result<&mut Dictionary, ExitCode> {
        let dictionary = match self.dictionary.take() {
            Some(dictionary) => dictionary,
            None => open_dictionary_or_failure(&self.config)?,
        };
        Ok(self.dictionary.insert(dictionary))
    }

    /// Takes ownership of the opened dictionary, e.g. to move it onto a worker thread.
    pub fn take_dictionary(&mut self) -> Result<Dictionary, ExitCode> {
        self.dictionary()?;
        self.dictionary.take().ok_or(ExitCode::FAILURE)
    }
}

/// Builds and opens the configured dictionary, reporting setup problems with hints.
fn open_dictionary_or_failure(config: &Config) -> Result<Dictionary, ExitCode> {
    let mut dictionary = Dictionary::from_config(config).map_err(|e| report_open_error(&e))?;
    dictionary.open().map_err(|e| report_open_error(&e))?;
    Ok(dictionary)
}

/// Prints an open failure and returns the failure exit code.
fn report_open_error(e: &IndexError) -> ExitCode {
    eprintln!("error: {e}");
    if let Some(hint) = open_error_hint(e) {
        eprintln!("{hint}");
    }
    ExitCode::FAILURE
}

/// Follow-up advice for dataset setup problems; transient failures get none.
fn open_error_hint(e: &IndexError) -> Option<&'static str> {
    if !e.is_setup_error() {
        return None;
    }
    Some(if matches!(e, IndexError::NoDataset) {
        "Run 'glossa init' to create a configuration file."
    } else {
        "Run 'glossa status' for details."
    })
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
