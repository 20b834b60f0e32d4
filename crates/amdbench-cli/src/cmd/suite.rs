//! Implementation of `amdbench suite`.
//!
//! Writes every topology at every size tier into the test directory, named
//! `<topology>_<p|m|g>.txt`.
use std::path::Path;

use amdbench_core::to_text;
use amdbench_gen::{SizeTier, Topology, generate};

use crate::cmd::status;
use crate::error::CliError;
use crate::io::write_text;

/// Runs the `suite` command.
///
/// # Errors
///
/// Returns [`CliError`] if a graph cannot be generated or written.
pub fn run(seed: u64, test_dir: &Path, quiet: bool) -> Result<(), CliError> {
    let mut written = 0usize;
    for tier in SizeTier::ALL {
        for topology in Topology::ALL {
            let graph = generate(&tier.config(topology, seed))?;
            let path = test_dir.join(tier.file_name(topology));
            write_text(&path, &to_text(&graph))?;
            tracing::debug!(path = %path.display(), edges = graph.edge_count(), "suite graph written");
            written += 1;
        }
    }
    status(
        quiet,
        &format!("{written} graphs saved to '{}'", test_dir.display()),
    );
    Ok(())
}
