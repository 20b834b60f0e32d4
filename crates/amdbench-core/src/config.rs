//! Benchmark configuration.
//!
//! Every knob the runner needs lives in [`BenchConfig`]. Defaults mirror the
//! layout the AMD project uses on disk; a JSON file can override any subset
//! of fields (missing fields keep their defaults).
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::stats::SpeedupPolicy;
use crate::timing::DEFAULT_TIMING_LABEL;

/// Configuration for a benchmark sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    /// Thread counts to measure. `1` is the sequential baseline and always
    /// runs, whether or not it is listed.
    pub thread_counts: Vec<u32>,
    /// Repetitions per (file, thread count).
    pub repetitions: u32,
    /// Directory scanned for graph files.
    pub test_dir: PathBuf,
    /// File-name suffix a graph file must end with.
    pub test_suffix: String,
    /// Sequential executable and its leading arguments.
    pub sequential_command: Vec<String>,
    /// Concurrent executable and its leading arguments; the thread count is
    /// appended as the final argument.
    pub concurrent_command: Vec<String>,
    /// Label preceding the elapsed seconds in the executables' output.
    pub timing_label: String,
    /// Per-repetition results CSV.
    pub results_csv: PathBuf,
    /// Summary table text file.
    pub table_path: PathBuf,
    /// How aggregate speedup is computed.
    pub speedup_policy: SpeedupPolicy,
}

impl Default for BenchConfig {
    fn default() -> Self {
        let results_dir = PathBuf::from("resultados_desempenho");
        Self {
            thread_counts: vec![1, 2, 4, 8],
            repetitions: 5,
            test_dir: PathBuf::from("Testes"),
            test_suffix: ".txt".to_owned(),
            sequential_command: vec!["./Sequencial/amd".to_owned()],
            concurrent_command: vec!["./Concorrente/amdc".to_owned()],
            timing_label: DEFAULT_TIMING_LABEL.to_owned(),
            results_csv: results_dir.join("resultados.csv"),
            table_path: results_dir.join("tabela_resumo.txt"),
            speedup_policy: SpeedupPolicy::default(),
        }
    }
}

/// Errors raised while loading or validating a [`BenchConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config {path}: {source}")]
    Read {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The config file is not valid JSON for [`BenchConfig`].
    #[error("invalid config {path}: {source}")]
    Parse {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// A field holds a value the runner cannot use.
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        /// Field name.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl BenchConfig {
    /// Loads a config from a JSON file, filling unspecified fields with
    /// defaults, and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, is not valid JSON,
    /// or fails [`BenchConfig::validate`].
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a config from JSON without validating it.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input or unknown fields.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Checks that the config can drive a sweep.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.repetitions == 0 {
            return Err(ConfigError::Invalid {
                field: "repetitions",
                reason: "must be at least 1".to_owned(),
            });
        }
        if self.thread_counts.contains(&0) {
            return Err(ConfigError::Invalid {
                field: "thread_counts",
                reason: "thread counts must be at least 1".to_owned(),
            });
        }
        if self.sequential_command.is_empty() {
            return Err(ConfigError::Invalid {
                field: "sequential_command",
                reason: "must name an executable".to_owned(),
            });
        }
        if self.concurrent_command.is_empty() && !self.concurrent_thread_counts().is_empty() {
            return Err(ConfigError::Invalid {
                field: "concurrent_command",
                reason: "must name an executable when thread counts above 1 are requested"
                    .to_owned(),
            });
        }
        if self.timing_label.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "timing_label",
                reason: "must not be blank".to_owned(),
            });
        }
        Ok(())
    }

    /// Thread counts above 1, ascending and without duplicates.
    pub fn concurrent_thread_counts(&self) -> Vec<u32> {
        let mut counts: Vec<u32> = self
            .thread_counts
            .iter()
            .copied()
            .filter(|&t| t > 1)
            .collect();
        counts.sort_unstable();
        counts.dedup();
        counts
    }
}
