//! File reading and writing for the `amdbench` binary.
//!
//! The library crates only see strings and writers; every filesystem access
//! of the CLI goes through here so that I/O failures map to [`CliError`]
//! variants (exit code 2) in one place.
use std::path::Path;

use crate::error::CliError;

/// Reads a UTF-8 text file.
///
/// # Errors
///
/// Returns [`CliError::FileNotFound`], [`CliError::PermissionDenied`] or
/// [`CliError::IoError`].
pub fn read_text(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|e| io_error_to_cli(&e, path))
}

/// Writes `contents` to `path`, creating missing parent directories.
///
/// # Errors
///
/// Returns [`CliError`] if a directory or the file cannot be written.
pub fn write_text(path: &Path, contents: &str) -> Result<(), CliError> {
    ensure_parent(path)?;
    std::fs::write(path, contents).map_err(|e| io_error_to_cli(&e, path))
}

/// Creates the parent directory of `path` if it does not exist.
///
/// # Errors
///
/// Returns [`CliError`] if the directory cannot be created.
pub fn ensure_parent(path: &Path) -> Result<(), CliError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            std::fs::create_dir_all(dir).map_err(|e| io_error_to_cli(&e, dir))
        }
        Some(_) | None => Ok(()),
    }
}

/// Maps a `std::io::Error` arising from a file operation to a [`CliError`].
pub fn io_error_to_cli(e: &std::io::Error, path: &Path) -> CliError {
    let kind = e.kind();
    if kind == std::io::ErrorKind::NotFound {
        CliError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else if kind == std::io::ErrorKind::PermissionDenied {
        CliError::PermissionDenied {
            path: path.to_path_buf(),
        }
    } else {
        CliError::IoError {
            source: path.display().to_string(),
            detail: e.to_string(),
        }
    }
}

/// Maps a write failure on standard output to a [`CliError`].
pub fn stdout_error(e: &std::io::Error) -> CliError {
    CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn missing_file_is_file_not_found() {
        let err = read_text(Path::new("/no/such/dir/graph.txt")).expect_err("missing");
        assert!(matches!(err, CliError::FileNotFound { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("a").join("b").join("out.txt");
        write_text(&path, "3 0\n").expect("write");
        assert_eq!(read_text(&path).expect("read back"), "3 0\n");
    }

    #[test]
    fn bare_file_name_needs_no_directory() {
        ensure_parent(Path::new("out.txt")).expect("no parent to create");
    }

    #[test]
    fn reading_a_directory_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = read_text(dir.path()).expect_err("directory");
        assert_eq!(err.exit_code(), 2);
    }
}
