/// Command module for the `amdbench` CLI.
///
/// Each submodule implements one subcommand. The `run` function in each
/// module takes the parsed arguments and returns `Ok(())` on success or
/// a [`crate::error::CliError`] on failure.
pub mod bench;
pub mod generate;
pub mod show;
pub mod suite;
pub mod table;

use std::path::Path;

use amdbench_core::BenchConfig;

use crate::Cli;
use crate::error::CliError;

/// Builds the effective config: the `--config` file (or defaults), then the
/// global directory flags.
///
/// # Errors
///
/// Returns [`CliError`] if the config file cannot be loaded.
pub fn load_config(cli: &Cli) -> Result<BenchConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => BenchConfig::from_json_file(path)?,
        None => BenchConfig::default(),
    };
    if let Some(dir) = &cli.test_dir {
        config.test_dir.clone_from(dir);
    }
    if let Some(dir) = &cli.results_dir {
        config.results_csv = rebase(dir, &config.results_csv);
        config.table_path = rebase(dir, &config.table_path);
    }
    Ok(config)
}

/// Moves the file name of `file` into `dir`.
fn rebase(dir: &Path, file: &Path) -> std::path::PathBuf {
    match file.file_name() {
        Some(name) => dir.join(name),
        None => dir.to_path_buf(),
    }
}

/// Splits a command line on whitespace into program and arguments.
///
/// # Errors
///
/// Returns [`CliError::InvalidArgument`] for a blank command.
pub fn split_command(flag: &str, raw: &str) -> Result<Vec<String>, CliError> {
    let parts: Vec<String> = raw.split_whitespace().map(str::to_owned).collect();
    if parts.is_empty() {
        return Err(CliError::InvalidArgument {
            detail: format!("--{flag} must name an executable"),
        });
    }
    Ok(parts)
}

/// Prints a status line to stderr unless `quiet`.
pub fn status(quiet: bool, line: &str) {
    if !quiet {
        eprintln!("{line}");
    }
}
