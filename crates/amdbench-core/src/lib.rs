#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod config;
pub mod discovery;
pub mod dot;
pub mod graph;
pub mod graph_io;
pub mod report;
pub mod results;
pub mod runner;
pub mod stats;
pub mod timing;

pub use config::{BenchConfig, ConfigError};
pub use discovery::{DiscoveryError, TestCase, UNKNOWN_SIZE, discover};
pub use dot::to_dot;
pub use graph::{Edge, Graph, GraphError};
pub use graph_io::{
    GraphParseError, LineDiagnostic, LineIssue, ParsedGraph, parse_graph, read_header, to_text,
    write_graph,
};
pub use report::render_table;
pub use results::{COLUMNS, ResultsParseError, read_results, write_results};
pub use runner::{BenchmarkRunner, CaseResult, ExecError, Executor, Invocation, ProcessExecutor};
pub use stats::{
    AggregateRecord, BASELINE_THREADS, Measurement, MissingReason, RunRecord, SpeedupPolicy,
    ThreadSeries, aggregate, mean, repetition_speedup, run_records,
};
pub use timing::{DEFAULT_TIMING_LABEL, TimingError, parse_timing};

/// Returns the library version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
