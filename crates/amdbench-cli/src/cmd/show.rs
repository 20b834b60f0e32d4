//! Implementation of `amdbench show <FILE>`.
//!
//! Reads a graph file, skipping malformed edge lines with a warning, and
//! emits it as Graphviz DOT on stdout or into `--save PATH`.
use std::io::Write as _;
use std::path::Path;

use amdbench_core::{parse_graph, to_dot};

use crate::cmd::status;
use crate::error::CliError;
use crate::io::{read_text, stdout_error, write_text};

/// Runs the `show` command.
///
/// # Errors
///
/// Returns [`CliError::FileNotFound`] if `file` is missing,
/// [`CliError::GraphParse`] if it has no usable header, or an I/O variant if
/// the output cannot be written.
pub fn run(
    file: &Path,
    save: Option<&Path>,
    title: Option<&str>,
    quiet: bool,
) -> Result<(), CliError> {
    let content = read_text(file)?;
    let parsed = parse_graph(&content).map_err(|e| CliError::graph_parse(file.to_path_buf(), &e))?;
    if !parsed.diagnostics.is_empty() {
        tracing::warn!(
            file = %file.display(),
            skipped = parsed.diagnostics.len(),
            "graph file has problems; see the warnings above"
        );
    }

    let default_title = file
        .file_name()
        .map_or_else(|| file.display().to_string(), |n| n.to_string_lossy().into_owned());
    let dot = to_dot(&parsed.graph, title.unwrap_or(&default_title));

    match save {
        Some(path) => {
            write_text(path, &dot)?;
            status(quiet, &format!("DOT saved to '{}'", path.display()));
            Ok(())
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            out.write_all(dot.as_bytes()).map_err(|e| stdout_error(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn saves_dot_with_file_name_title() {
        let dir = tempfile::tempdir().expect("tempdir");
        let graph = dir.path().join("tri.txt");
        std::fs::write(&graph, "3 2\n0 1 4\nbad line\n1 2 7\n").expect("write");
        let out = dir.path().join("tri.dot");

        run(&graph, Some(&out), None, true).expect("show");

        let dot = std::fs::read_to_string(&out).expect("saved");
        assert!(dot.starts_with("digraph"), "{dot}");
        assert!(dot.contains("tri.txt"), "{dot}");
    }

    #[test]
    fn headerless_file_is_graph_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let graph = dir.path().join("junk.txt");
        std::fs::write(&graph, "not a header\n").expect("write");
        let err = run(&graph, Some(&dir.path().join("x.dot")), None, true).expect_err("bad");
        assert!(matches!(err, CliError::GraphParse { .. }));
    }
}
