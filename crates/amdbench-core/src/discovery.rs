//! Test case discovery.
//!
//! A test case is any regular file in the test directory whose name ends
//! with the configured suffix. Cases are returned sorted by file name and
//! described from their `"V E"` header.
use std::path::{Path, PathBuf};

use crate::graph_io::read_header;

/// Description used when a file's header cannot be read.
pub const UNKNOWN_SIZE: &str = "unknown size";

/// A graph file to benchmark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Full path to the file.
    pub path: PathBuf,
    /// File name, used as the case key in results.
    pub name: String,
    /// Human-readable size, e.g. `"20 vertices, 76 edges"`.
    pub description: String,
}

impl TestCase {
    /// Builds a case for `path`, reading its header for the description.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            path: path.to_path_buf(),
            name,
            description: describe(path),
        }
    }
}

/// Errors raised while scanning the test directory.
#[derive(Debug, thiserror::Error)]
#[error("cannot scan test directory {path}: {source}")]
pub struct DiscoveryError {
    /// The directory being scanned.
    pub path: PathBuf,
    /// Underlying I/O error.
    #[source]
    pub source: std::io::Error,
}

/// Lists the test cases in `dir` whose file names end with `suffix`.
///
/// # Errors
///
/// Returns [`DiscoveryError`] if `dir` cannot be listed.
pub fn discover(dir: &Path, suffix: &str) -> Result<Vec<TestCase>, DiscoveryError> {
    let wrap = |source| DiscoveryError {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(wrap)? {
        let entry = entry.map_err(wrap)?;
        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(suffix));
        if matches && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let cases: Vec<TestCase> = paths.iter().map(|p| TestCase::from_path(p)).collect();
    tracing::debug!(dir = %dir.display(), count = cases.len(), "discovered test cases");
    Ok(cases)
}

fn describe(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => match read_header(&content) {
            Some((v, e)) => format!("{v} vertices, {e} edges"),
            None => {
                tracing::warn!(file = %path.display(), "unreadable graph header");
                UNKNOWN_SIZE.to_owned()
            }
        },
        Err(e) => {
            tracing::warn!(file = %path.display(), error = %e, "cannot read test file");
            UNKNOWN_SIZE.to_owned()
        }
    }
}
