//! Fixed-width summary table.
//!
//! ```text
//! ====================================================================================================
//! PERFORMANCE SUMMARY
//! ====================================================================================================
//!
//! Test: ciclo_m.txt - 20 vertices, 20 edges
//! ----------------------------------------------------------------------------------------------------
//! Threads    Mean time (s)        Speedup         Efficiency
//! ----------------------------------------------------------------------------------------------------
//! 1          0.123400             1.0000          1.0000
//! 2          0.061700             2.0000          1.0000
//!
//! ====================================================================================================
//! ```
use std::io::Write;

use crate::stats::AggregateRecord;

const WIDTH: usize = 100;

/// Renders the summary table for `aggregates`.
///
/// Files appear sorted by name and, within a file, rows are sorted by
/// thread count; input order does not matter.
///
/// # Errors
///
/// Returns any error produced by `writer`.
pub fn render_table<W: Write>(writer: &mut W, aggregates: &[AggregateRecord]) -> std::io::Result<()> {
    let heavy = "=".repeat(WIDTH);
    let light = "-".repeat(WIDTH);

    let mut sorted: Vec<&AggregateRecord> = aggregates.iter().collect();
    sorted.sort_by(|a, b| {
        a.file
            .cmp(&b.file)
            .then(a.thread_count.cmp(&b.thread_count))
    });

    writeln!(writer, "{heavy}")?;
    writeln!(writer, "PERFORMANCE SUMMARY")?;
    writeln!(writer, "{heavy}")?;
    writeln!(writer)?;

    for group in sorted.chunk_by(|a, b| a.file == b.file) {
        let Some(first) = group.first() else {
            continue;
        };
        writeln!(writer, "Test: {} - {}", first.file, first.description)?;
        writeln!(writer, "{light}")?;
        writeln!(
            writer,
            "{:<10} {:<20} {:<15} {:<15}",
            "Threads", "Mean time (s)", "Speedup", "Efficiency"
        )?;
        writeln!(writer, "{light}")?;
        for row in group {
            writeln!(
                writer,
                "{:<10} {:<20.6} {:<15.4} {:<15.4}",
                row.thread_count, row.mean_time, row.mean_speedup, row.mean_efficiency
            )?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "{heavy}")?;
    Ok(())
}
