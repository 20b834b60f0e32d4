//! Implementation of `amdbench generate <TOPOLOGY> <VERTEX_COUNT> <OUTPUT_FILE>`.
//!
//! Builds one graph and writes it in the `"V E"` text format to
//! `<test-dir>/<OUTPUT_FILE>`. With `--show` the graph is also printed to
//! stdout as Graphviz DOT.
//!
//! Exit codes: 0 = success, 2 = unknown topology, bad parameter or write
//! failure.
use std::io::Write as _;
use std::path::{Path, PathBuf};

use amdbench_core::{Graph, to_dot, to_text};
use amdbench_gen::{GeneratorConfig, Topology, generate};

use crate::cmd::status;
use crate::error::CliError;
use crate::io::{stdout_error, write_text};

/// Parameters of one `generate` invocation.
pub struct GenerateArgs<'a> {
    /// Topology name or alias.
    pub topology: &'a str,
    /// Number of vertices.
    pub vertex_count: usize,
    /// File name inside the test directory.
    pub output: &'a Path,
    /// Largest edge weight.
    pub max_weight: u32,
    /// Arc density.
    pub density: f64,
    /// Optional seed.
    pub seed: Option<u64>,
    /// Print DOT to stdout as well.
    pub show: bool,
}

/// Runs the `generate` command.
///
/// # Errors
///
/// Returns [`CliError::InvalidTopology`] for an unknown name,
/// [`CliError::InvalidArgument`] for an out-of-range parameter, or an I/O
/// variant if the file cannot be written.
pub fn run(args: &GenerateArgs<'_>, test_dir: &Path, quiet: bool) -> Result<(), CliError> {
    let topology: Topology = args.topology.parse()?;
    let mut config = GeneratorConfig::new(topology, args.vertex_count);
    config.max_weight = args.max_weight;
    config.density = args.density;
    config.seed = args.seed;

    let graph = generate(&config)?;
    let path = output_path(test_dir, args.output);
    write_text(&path, &to_text(&graph))?;
    tracing::info!(
        path = %path.display(),
        %topology,
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "graph written"
    );
    status(quiet, &format!("Graph saved to '{}'", path.display()));

    if args.show {
        print_dot(&graph, &title(topology, graph.vertex_count()))?;
    }
    Ok(())
}

/// Title shown on the rendered graph, e.g. `Cyclic (5 vertices)`.
pub fn title(topology: Topology, vertex_count: usize) -> String {
    let name = topology.name();
    let mut chars = name.chars();
    let capitalised = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    format!("{capitalised} ({vertex_count} vertices)")
}

fn output_path(test_dir: &Path, output: &Path) -> PathBuf {
    if output.is_absolute() {
        output.to_path_buf()
    } else {
        test_dir.join(output)
    }
}

fn print_dot(graph: &Graph, title: &str) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    out.write_all(to_dot(graph, title).as_bytes())
        .map_err(|e| stdout_error(&e))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn title_capitalises_topology() {
        assert_eq!(title(Topology::Cyclic, 5), "Cyclic (5 vertices)");
        assert_eq!(title(Topology::Dense, 20), "Dense (20 vertices)");
    }

    #[test]
    fn relative_output_lands_in_test_dir() {
        assert_eq!(
            output_path(Path::new("Testes"), Path::new("c.txt")),
            PathBuf::from("Testes/c.txt")
        );
    }

    #[test]
    fn writes_seeded_graph() {
        let dir = tempfile::tempdir().expect("tempdir");
        let args = GenerateArgs {
            topology: "ciclo",
            vertex_count: 5,
            output: Path::new("c.txt"),
            max_weight: 10,
            density: 0.2,
            seed: Some(1),
            show: false,
        };
        run(&args, dir.path(), true).expect("generate");
        let text = std::fs::read_to_string(dir.path().join("c.txt")).expect("written");
        assert_eq!(text.lines().next(), Some("5 5"));
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn unknown_topology_is_rejected_before_writing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let args = GenerateArgs {
            topology: "hypercube",
            vertex_count: 5,
            output: Path::new("h.txt"),
            max_weight: 10,
            density: 0.2,
            seed: None,
            show: false,
        };
        let err = run(&args, dir.path(), true).expect_err("invalid");
        assert!(matches!(err, CliError::InvalidTopology { .. }));
        assert!(!dir.path().join("h.txt").exists());
    }
}
