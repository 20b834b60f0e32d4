//! Benchmark sweep over external AMD executables.
//!
//! For every test case the sequential baseline runs first, then each
//! concurrent thread count in ascending order. Every (case, thread count)
//! pair runs `repetitions` times; a repetition that cannot be executed or
//! whose output has no usable timing becomes a [`Measurement::Missing`] and
//! the sweep carries on.
//!
//! Execution goes through the [`Executor`] trait so tests can script the
//! external program's output.
use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::BenchConfig;
use crate::discovery::TestCase;
use crate::stats::{
    BASELINE_THREADS, Measurement, MissingReason, RunRecord, ThreadSeries, run_records,
};
use crate::timing::parse_timing;

/// Width of the rule printed under each case heading.
const RULE_WIDTH: usize = 70;

/// Which executable a repetition runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    /// The sequential baseline, run without arguments.
    Sequential,
    /// The concurrent executable, run with `threads` as its last argument.
    Concurrent {
        /// Worker thread count.
        threads: u32,
    },
}

impl Invocation {
    /// Invocation for a thread count; 1 maps to the sequential baseline.
    pub fn for_threads(threads: u32) -> Self {
        if threads <= BASELINE_THREADS {
            Self::Sequential
        } else {
            Self::Concurrent { threads }
        }
    }

    /// Thread count this invocation measures.
    pub fn thread_count(self) -> u32 {
        match self {
            Self::Sequential => BASELINE_THREADS,
            Self::Concurrent { threads } => threads,
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => f.write_str("Sequential"),
            Self::Concurrent { threads } => write!(f, "Concurrent ({threads} threads)"),
        }
    }
}

/// Failure to obtain output from the external program.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// No command is configured for the invocation.
    #[error("no command configured for the {0} run")]
    NoCommand(String),
    /// The graph file could not be opened as standard input.
    #[error("cannot open input {path}: {source}")]
    Input {
        /// Graph file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The process could not be started or awaited.
    #[error("cannot run {program}: {source}")]
    Spawn {
        /// Program name.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Runs one repetition and returns the program's standard output.
pub trait Executor {
    /// Executes `invocation` with the graph at `input` as standard input.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError`] when no output could be collected.
    fn execute(&mut self, invocation: &Invocation, input: &Path) -> Result<String, ExecError>;
}

/// [`Executor`] backed by real child processes.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    sequential: Vec<String>,
    concurrent: Vec<String>,
}

impl ProcessExecutor {
    /// Creates an executor from two command lines (program then leading
    /// arguments).
    pub fn new(sequential: Vec<String>, concurrent: Vec<String>) -> Self {
        Self {
            sequential,
            concurrent,
        }
    }

    /// Creates an executor from the commands in `config`.
    pub fn from_config(config: &BenchConfig) -> Self {
        Self::new(
            config.sequential_command.clone(),
            config.concurrent_command.clone(),
        )
    }
}

impl Executor for ProcessExecutor {
    fn execute(&mut self, invocation: &Invocation, input: &Path) -> Result<String, ExecError> {
        let command_line = match invocation {
            Invocation::Sequential => &self.sequential,
            Invocation::Concurrent { .. } => &self.concurrent,
        };
        let Some((program, leading)) = command_line.split_first() else {
            return Err(ExecError::NoCommand(invocation.to_string()));
        };

        let stdin = File::open(input).map_err(|source| ExecError::Input {
            path: input.to_path_buf(),
            source,
        })?;

        let mut command = Command::new(program);
        command.args(leading);
        if let Invocation::Concurrent { threads } = invocation {
            command.arg(threads.to_string());
        }
        let output = command
            .stdin(Stdio::from(stdin))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| ExecError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            tracing::warn!(
                program = %program,
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "external program exited unsuccessfully"
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Every measurement taken for one test case.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseResult {
    /// The case that was measured.
    pub case: TestCase,
    /// One series per thread count, baseline first.
    pub series: Vec<ThreadSeries>,
}

impl CaseResult {
    /// Per-repetition rows for this case.
    pub fn run_records(&self) -> Vec<RunRecord> {
        run_records(&self.case.name, &self.case.description, &self.series)
    }
}

/// Drives an [`Executor`] across test cases, thread counts and repetitions.
pub struct BenchmarkRunner<E> {
    executor: E,
    thread_counts: Vec<u32>,
    repetitions: u32,
    timing_label: String,
}

impl<E: Executor> BenchmarkRunner<E> {
    /// Creates a runner using the sweep parameters in `config`.
    pub fn new(executor: E, config: &BenchConfig) -> Self {
        let mut thread_counts = vec![BASELINE_THREADS];
        thread_counts.extend(config.concurrent_thread_counts());
        Self {
            executor,
            thread_counts,
            repetitions: config.repetitions,
            timing_label: config.timing_label.clone(),
        }
    }

    /// Thread counts in run order; the baseline is always first.
    pub fn thread_counts(&self) -> &[u32] {
        &self.thread_counts
    }

    /// Consumes the runner, returning its executor.
    pub fn into_executor(self) -> E {
        self.executor
    }

    /// Runs a single repetition.
    pub fn measure(&mut self, invocation: Invocation, input: &Path) -> Measurement {
        match self.executor.execute(&invocation, input) {
            Ok(output) => match parse_timing(&output, &self.timing_label) {
                Ok(seconds) => Measurement::Valid(seconds),
                Err(e) => {
                    tracing::warn!(input = %input.display(), %invocation, error = %e, "no timing in output");
                    Measurement::Missing(MissingReason::Timing(e))
                }
            },
            Err(e) => {
                tracing::warn!(input = %input.display(), %invocation, error = %e, "execution failed");
                Measurement::Missing(MissingReason::Exec(e.to_string()))
            }
        }
    }

    /// Measures every thread count for `case`, writing progress to
    /// `progress`.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing to `progress` fails.
    pub fn run_case<W: Write>(&mut self, case: &TestCase, progress: &mut W) -> io::Result<CaseResult> {
        writeln!(progress, "Test: {} - {}", case.name, case.description)?;
        writeln!(progress, "{}", "-".repeat(RULE_WIDTH))?;

        let thread_counts = self.thread_counts.clone();
        let mut series = Vec::with_capacity(thread_counts.len());
        let mut baseline_mean = 0.0;

        for threads in thread_counts {
            let invocation = Invocation::for_threads(threads);
            write!(progress, "  {invocation}: ")?;
            progress.flush()?;

            let mut measurements = Vec::new();
            for repetition in 1..=self.repetitions {
                tracing::debug!(file = %case.name, threads, repetition, "running");
                let m = self.measure(invocation, &case.path);
                if m.is_missing() {
                    write!(progress, "Error! ")?;
                } else {
                    write!(progress, ".")?;
                }
                progress.flush()?;
                measurements.push(m);
            }

            let s = ThreadSeries {
                thread_count: threads,
                measurements,
            };
            let mean_time = s.mean_time();
            if threads == BASELINE_THREADS {
                baseline_mean = mean_time;
                writeln!(progress, " Mean: {mean_time:.6}s")?;
            } else {
                let speedup = if mean_time > 0.0 {
                    baseline_mean / mean_time
                } else {
                    0.0
                };
                let efficiency = speedup / f64::from(threads);
                writeln!(
                    progress,
                    " Mean: {mean_time:.6}s (Speedup: {speedup:.4}x, Efficiency: {efficiency:.4})"
                )?;
            }
            series.push(s);
        }
        writeln!(progress)?;

        tracing::info!(
            file = %case.name,
            baseline_mean,
            missing = series
                .iter()
                .flat_map(|s| &s.measurements)
                .filter(|m| m.is_missing())
                .count(),
            "case finished"
        );
        Ok(CaseResult {
            case: case.clone(),
            series,
        })
    }

    /// Runs every case in order.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing to `progress` fails.
    pub fn run_all<W: Write>(
        &mut self,
        cases: &[TestCase],
        progress: &mut W,
    ) -> io::Result<Vec<CaseResult>> {
        cases.iter().map(|case| self.run_case(case, progress)).collect()
    }
}
