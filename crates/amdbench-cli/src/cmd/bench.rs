//! Implementation of `amdbench bench`.
//!
//! Discovers the test graphs, runs the sequential executable and the
//! concurrent one at every thread count, writes the per-repetition CSV and
//! finally prints and persists the summary table. Progress goes to stdout
//! unless `--quiet` is given.
//!
//! Exit codes: 0 = success (even if some repetitions failed), 1 = no test
//! files, 2 = bad config or I/O failure.
use std::io::Write;

use amdbench_core::{
    BenchConfig, BenchmarkRunner, CaseResult, ProcessExecutor, RunRecord, SpeedupPolicy,
    aggregate, discover, write_results,
};

use crate::cmd::{split_command, status, table};
use crate::error::CliError;
use crate::io::{io_error_to_cli, stdout_error, write_text};

/// Flag overrides for one `bench` invocation.
#[derive(Default)]
pub struct BenchArgs {
    /// Replaces `repetitions`.
    pub repetitions: Option<u32>,
    /// Replaces `thread_counts`.
    pub threads: Option<Vec<u32>>,
    /// Replaces `test_suffix`.
    pub suffix: Option<String>,
    /// Replaces `sequential_command`.
    pub sequential: Option<String>,
    /// Replaces `concurrent_command`.
    pub concurrent: Option<String>,
    /// Replaces `speedup_policy`.
    pub speedup: Option<SpeedupPolicy>,
}

impl BenchArgs {
    /// Applies the overrides to `config` and re-validates it.
    ///
    /// # Errors
    ///
    /// Returns [`CliError`] for a blank command or an invalid result.
    pub fn apply(&self, config: &mut BenchConfig) -> Result<(), CliError> {
        if let Some(n) = self.repetitions {
            config.repetitions = n;
        }
        if let Some(threads) = &self.threads {
            config.thread_counts.clone_from(threads);
        }
        if let Some(suffix) = &self.suffix {
            config.test_suffix.clone_from(suffix);
        }
        if let Some(raw) = &self.sequential {
            config.sequential_command = split_command("sequential", raw)?;
        }
        if let Some(raw) = &self.concurrent {
            config.concurrent_command = split_command("concurrent", raw)?;
        }
        if let Some(policy) = self.speedup {
            config.speedup_policy = policy;
        }
        config.validate()?;
        Ok(())
    }
}

/// Runs the `bench` command.
///
/// # Errors
///
/// Returns [`CliError::NoTestFiles`] if nothing matches, or another
/// [`CliError`] if the test directory, CSV or table cannot be accessed.
pub fn run(args: &BenchArgs, mut config: BenchConfig, quiet: bool) -> Result<(), CliError> {
    args.apply(&mut config)?;

    let cases = discover(&config.test_dir, &config.test_suffix)
        .map_err(|e| io_error_to_cli(&e.source, &e.path))?;
    if cases.is_empty() {
        return Err(CliError::NoTestFiles {
            dir: config.test_dir.clone(),
            suffix: config.test_suffix.clone(),
        });
    }
    tracing::info!(
        cases = cases.len(),
        threads = ?config.thread_counts,
        repetitions = config.repetitions,
        "starting sweep"
    );

    let mut runner = BenchmarkRunner::new(ProcessExecutor::from_config(&config), &config);
    let results = if quiet {
        runner.run_all(&cases, &mut std::io::sink())
    } else {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        runner.run_all(&cases, &mut out)
    }
    .map_err(|e| stdout_error(&e))?;

    let records = collect_records(&results);
    let mut csv = Vec::new();
    write_results(&mut csv, &records).map_err(|e| stdout_error(&e))?;
    write_text(&config.results_csv, &String::from_utf8_lossy(&csv))?;
    status(
        quiet,
        &format!("Results saved to '{}'", config.results_csv.display()),
    );

    let missing = records.iter().filter(|r| r.measurement.is_missing()).count();
    if missing > 0 {
        tracing::warn!(missing, "some repetitions produced no timing");
    }

    table::publish(
        &aggregate(&records, config.speedup_policy),
        &config.table_path,
        quiet,
    )?;
    std::io::stdout().flush().map_err(|e| stdout_error(&e))
}

fn collect_records(results: &[CaseResult]) -> Vec<RunRecord> {
    results.iter().flat_map(CaseResult::run_records).collect()
}
