//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use amdbench_core::SpeedupPolicy;
use amdbench_gen::generator::{DEFAULT_DENSITY, DEFAULT_MAX_WEIGHT};
use clap::{Parser, Subcommand, ValueEnum};

/// How the aggregate speedup of a thread count is computed.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SpeedupArg {
    /// Mean sequential time divided by mean concurrent time (default).
    RatioOfMeans,
    /// Mean of the per-repetition speedups.
    MeanOfRatios,
}

impl From<SpeedupArg> for SpeedupPolicy {
    fn from(arg: SpeedupArg) -> Self {
        match arg {
            SpeedupArg::RatioOfMeans => SpeedupPolicy::RatioOfMeans,
            SpeedupArg::MeanOfRatios => SpeedupPolicy::MeanOfRatios,
        }
    }
}

/// All top-level subcommands exposed by the `amdbench` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Generate one test graph into the test directory.
    Generate {
        /// Topology: connected, disconnected, cyclic, dense, sparse, isolated
        /// (or conectado, desconectado, ciclo, denso, esparso, isolado).
        #[arg(value_name = "TOPOLOGY")]
        topology: String,
        /// Number of vertices.
        #[arg(value_name = "VERTEX_COUNT")]
        vertex_count: usize,
        /// Output file name, written inside the test directory.
        #[arg(value_name = "OUTPUT_FILE")]
        output: PathBuf,
        /// Largest edge weight; weights are drawn from 1..=MAX_WEIGHT.
        #[arg(value_name = "MAX_WEIGHT", default_value_t = DEFAULT_MAX_WEIGHT)]
        max_weight: u32,
        /// Fraction of possible arcs, in (0, 1].
        #[arg(value_name = "DENSITY", default_value_t = DEFAULT_DENSITY)]
        density: f64,
        /// Seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
        /// Also print the graph as Graphviz DOT on stdout.
        #[arg(long)]
        show: bool,
    },

    /// Generate every topology at every size tier (10, 20 and 100 vertices).
    Suite {
        /// Seed for reproducible output.
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },

    /// Run the sequential and concurrent executables over every test file.
    Bench {
        /// Repetitions per file and thread count.
        #[arg(long, short = 'r')]
        repetitions: Option<u32>,
        /// Comma-separated thread counts; 1 always runs as the baseline.
        #[arg(long, short = 't', value_delimiter = ',', value_name = "N,N,...")]
        threads: Option<Vec<u32>>,
        /// Only files whose names end with this suffix are benchmarked.
        #[arg(long)]
        suffix: Option<String>,
        /// Sequential command line (program and leading arguments).
        #[arg(long, value_name = "CMD")]
        sequential: Option<String>,
        /// Concurrent command line; the thread count is appended.
        #[arg(long, value_name = "CMD")]
        concurrent: Option<String>,
        /// Aggregate speedup policy.
        #[arg(long, value_name = "POLICY")]
        speedup: Option<SpeedupArg>,
    },

    /// Summarise a results CSV as a table on stdout and in the table file.
    Table {
        /// Results CSV (defaults to the configured results file).
        #[arg(value_name = "CSV")]
        csv: Option<PathBuf>,
        /// Aggregate speedup policy.
        #[arg(long, value_name = "POLICY")]
        speedup: Option<SpeedupArg>,
    },

    /// Print a graph file as Graphviz DOT.
    Show {
        /// Graph file in the "V E" / "u v w" format.
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Write the DOT text to this file instead of stdout.
        #[arg(long, value_name = "PATH")]
        save: Option<PathBuf>,
        /// Graph title (defaults to the file name).
        #[arg(long)]
        title: Option<String>,
    },
}

/// Root CLI struct for the `amdbench` binary.
///
/// All global flags are defined here and marked `global = true` so that clap
/// propagates them to every subcommand.
#[derive(Parser)]
#[command(
    name = "amdbench",
    version,
    about = "AMD benchmark harness",
    long_about = "Generates test graphs for the all-pairs minimum-distance (AMD) executables,\n\
                  runs the sequential and concurrent versions across thread counts, and\n\
                  reports speedup and efficiency."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// JSON benchmark config; unspecified fields keep their defaults.
    #[arg(long, global = true, env = "AMDBENCH_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the test graphs (default: Testes).
    #[arg(long, global = true, env = "AMDBENCH_TEST_DIR", value_name = "DIR")]
    pub test_dir: Option<PathBuf>,

    /// Directory for the results CSV and table (default: resultados_desempenho).
    #[arg(long, global = true, env = "AMDBENCH_RESULTS_DIR", value_name = "DIR")]
    pub results_dir: Option<PathBuf>,

    /// Suppress progress output and all logs except errors (incompatible
    /// with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log debug detail to stderr (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,
}

#[cfg(test)]
mod tests;
