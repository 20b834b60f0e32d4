//! Implementation of `amdbench table [CSV]`.
//!
//! Reads the per-repetition results CSV, aggregates it and prints the
//! summary table to stdout. The same text is written to the configured
//! table file.
//!
//! Exit codes: 0 = success, 2 = CSV missing or unreadable.
use std::io::Write as _;
use std::path::Path;

use amdbench_core::{AggregateRecord, SpeedupPolicy, aggregate, read_results, render_table};

use crate::cmd::status;
use crate::error::CliError;
use crate::io::{read_text, stdout_error, write_text};

/// Runs the `table` command.
///
/// # Errors
///
/// Returns [`CliError::FileNotFound`] if `csv` is missing,
/// [`CliError::ResultsParse`] if it is malformed, or an I/O variant if the
/// table cannot be written.
pub fn run(
    csv: &Path,
    table_path: &Path,
    policy: SpeedupPolicy,
    quiet: bool,
) -> Result<(), CliError> {
    let content = read_text(csv)?;
    let records =
        read_results(&content).map_err(|e| CliError::results_parse(csv.to_path_buf(), &e))?;
    tracing::debug!(csv = %csv.display(), rows = records.len(), %policy, "results loaded");
    publish(&aggregate(&records, policy), table_path, quiet)
}

/// Prints `aggregates` as the summary table and persists it at
/// `table_path`.
///
/// # Errors
///
/// Returns [`CliError`] if stdout or the table file cannot be written.
pub fn publish(
    aggregates: &[AggregateRecord],
    table_path: &Path,
    quiet: bool,
) -> Result<(), CliError> {
    let mut buf = Vec::new();
    render_table(&mut buf, aggregates).map_err(|e| stdout_error(&e))?;
    let text = String::from_utf8_lossy(&buf);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| stdout_error(&e))?;

    write_text(table_path, &text)?;
    status(quiet, &format!("Table saved to '{}'", table_path.display()));
    Ok(())
}
