//! CLI error types with associated exit codes.
//!
//! [`CliError`] is the top-level error type for the `amdbench` binary. Every
//! variant maps to a stable exit code via [`CliError::exit_code`]:
//!
//! - Exit code **2**: input failure. An argument, config or file could not
//!   be used, so nothing was generated or measured.
//! - Exit code **1**: logical failure. The inputs were fine but there was
//!   nothing to do (no test files discovered).
use std::fmt;
use std::path::PathBuf;

use amdbench_core::{ConfigError, GraphParseError, ResultsParseError};
use amdbench_gen::GenerateError;

/// All error conditions that the `amdbench` CLI can produce.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// A file argument could not be found on the filesystem.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read or write a file.
    PermissionDenied {
        /// The offending path.
        path: PathBuf,
    },

    /// Any other I/O error.
    IoError {
        /// A human-readable label for the file or stream.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// The topology name is not recognised.
    InvalidTopology {
        /// The name as given.
        name: String,
    },

    /// A command-line argument is out of range.
    InvalidArgument {
        /// What is wrong.
        detail: String,
    },

    /// The benchmark config could not be loaded or is invalid.
    Config {
        /// The underlying error message.
        detail: String,
    },

    /// A graph file has no usable header.
    GraphParse {
        /// The graph file.
        path: PathBuf,
        /// The underlying error message.
        detail: String,
    },

    /// A results CSV could not be read back.
    ResultsParse {
        /// The CSV file.
        path: PathBuf,
        /// The underlying error message.
        detail: String,
    },

    /// Logging could not be set up.
    Logging {
        /// The underlying error message.
        detail: String,
    },

    // --- Exit code 1: logical failures ---
    /// The test directory holds no matching graph files.
    NoTestFiles {
        /// Directory that was scanned.
        dir: PathBuf,
        /// Required file-name suffix.
        suffix: String,
    },
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::IoError { .. }
            | Self::InvalidTopology { .. }
            | Self::InvalidArgument { .. }
            | Self::Config { .. }
            | Self::GraphParse { .. }
            | Self::ResultsParse { .. }
            | Self::Logging { .. } => 2,

            Self::NoTestFiles { .. } => 1,
        }
    }

    /// Returns a human-readable error message suitable for printing to stderr.
    pub fn message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("error: file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                format!("error: permission denied: {}", path.display())
            }
            Self::IoError { source, detail } => {
                format!("error: I/O error on {source}: {detail}")
            }
            Self::InvalidTopology { name } => {
                format!(
                    "error: unknown topology '{name}'; expected one of: connected, disconnected, \
                     cyclic, dense, sparse, isolated (or conectado, desconectado, ciclo, denso, \
                     esparso, isolado)"
                )
            }
            Self::InvalidArgument { detail } => format!("error: invalid argument: {detail}"),
            Self::Config { detail } => format!("error: {detail}"),
            Self::GraphParse { path, detail } => {
                format!("error: cannot read graph {}: {detail}", path.display())
            }
            Self::ResultsParse { path, detail } => {
                format!("error: cannot read results {}: {detail}", path.display())
            }
            Self::Logging { detail } => format!("error: logging setup failed: {detail}"),
            Self::NoTestFiles { dir, suffix } => {
                format!(
                    "error: no test files ending in '{suffix}' found in {}",
                    dir.display()
                )
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

impl From<GenerateError> for CliError {
    fn from(e: GenerateError) -> Self {
        match e {
            GenerateError::InvalidTopology { name } => Self::InvalidTopology { name },
            GenerateError::ZeroVertices
            | GenerateError::TooManyVertices { .. }
            | GenerateError::ZeroMaxWeight
            | GenerateError::InvalidDensity { .. }
            | GenerateError::Graph(_) => Self::InvalidArgument {
                detail: e.to_string(),
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        match &e {
            ConfigError::Read { path, source } if source.kind() == std::io::ErrorKind::NotFound => {
                Self::FileNotFound { path: path.clone() }
            }
            ConfigError::Read { .. } | ConfigError::Parse { .. } | ConfigError::Invalid { .. } => {
                Self::Config {
                    detail: e.to_string(),
                }
            }
        }
    }
}

impl CliError {
    /// Wraps a graph header failure for `path`.
    pub fn graph_parse(path: PathBuf, e: &GraphParseError) -> Self {
        Self::GraphParse {
            path,
            detail: e.to_string(),
        }
    }

    /// Wraps a results CSV failure for `path`.
    pub fn results_parse(path: PathBuf, e: &ResultsParseError) -> Self {
        Self::ResultsParse {
            path,
            detail: e.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
