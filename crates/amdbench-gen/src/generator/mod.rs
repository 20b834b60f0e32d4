//! Topology generator.
//!
//! Produces valid [`Graph`] instances of a requested shape. Every random
//! choice comes from a single [`StdRng`], so a fixed seed reproduces the
//! same graph edge for edge.

pub mod sampling;
pub mod topology;

use std::fmt;
use std::str::FromStr;

use amdbench_core::{Graph, GraphError};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Default upper bound for edge weights.
pub const DEFAULT_MAX_WEIGHT: u32 = 10;
/// Default fraction of the `V·(V−1)` possible arcs to sample.
pub const DEFAULT_DENSITY: f64 = 0.2;
/// Default cap on strong-connectivity rejection sampling.
pub const DEFAULT_CONNECTIVITY_ATTEMPTS: u32 = 100;

/// Graph shape to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Strongly connected random digraph.
    Connected,
    /// Several strongly connected groups with no edge between groups.
    Disconnected,
    /// A single directed cycle through every vertex.
    Cyclic,
    /// Random digraph with 90% of all possible arcs.
    Dense,
    /// Random labeled tree with randomly oriented edges.
    Sparse,
    /// Random digraph with at least one vertex that has no edges.
    Isolated,
}

impl Topology {
    /// Every topology, in canonical order.
    pub const ALL: [Topology; 6] = [
        Topology::Connected,
        Topology::Disconnected,
        Topology::Cyclic,
        Topology::Dense,
        Topology::Sparse,
        Topology::Isolated,
    ];

    /// Canonical (English) name.
    pub fn name(self) -> &'static str {
        match self {
            Topology::Connected => "connected",
            Topology::Disconnected => "disconnected",
            Topology::Cyclic => "cyclic",
            Topology::Dense => "dense",
            Topology::Sparse => "sparse",
            Topology::Isolated => "isolated",
        }
    }

    /// Name used by the AMD project's own test files.
    pub fn alias(self) -> &'static str {
        match self {
            Topology::Connected => "conectado",
            Topology::Disconnected => "desconectado",
            Topology::Cyclic => "ciclo",
            Topology::Dense => "denso",
            Topology::Sparse => "esparso",
            Topology::Isolated => "isolado",
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Topology {
    type Err = GenerateError;

    /// Parses a canonical name or alias, ignoring case and surrounding
    /// whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Topology::ALL
            .into_iter()
            .find(|t| t.name() == wanted || t.alias() == wanted)
            .ok_or_else(|| GenerateError::InvalidTopology {
                name: s.to_owned(),
            })
    }
}

/// Errors raised by the generator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerateError {
    /// The topology name is not recognised.
    #[error(
        "unknown topology {name:?}; expected one of connected, disconnected, cyclic, dense, sparse, isolated"
    )]
    InvalidTopology {
        /// The name as given.
        name: String,
    },
    /// `vertex_count` is zero.
    #[error("vertex count must be at least 1")]
    ZeroVertices,
    /// `V·(V−1)` does not fit in `usize`.
    #[error("vertex count {vertex_count} is too large: V·(V−1) overflows")]
    TooManyVertices {
        /// The rejected vertex count.
        vertex_count: usize,
    },
    /// `max_weight` is zero.
    #[error("max weight must be at least 1")]
    ZeroMaxWeight,
    /// `density` is outside `(0, 1]`.
    #[error("density {density} is outside (0, 1]")]
    InvalidDensity {
        /// The rejected density.
        density: f64,
    },
    /// A builder produced an edge the graph model rejects.
    #[error("generated graph is invalid: {0}")]
    Graph(#[from] GraphError),
}

/// Configuration for a single generated graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Shape to generate.
    pub topology: Topology,
    /// Number of vertices (at least 1).
    pub vertex_count: usize,
    /// Weights are drawn uniformly from `1..=max_weight`.
    pub max_weight: u32,
    /// Fraction of possible arcs for the connected, disconnected and
    /// isolated shapes.
    pub density: f64,
    /// RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Rejection-sampling attempts before the connected shape falls back
    /// to a Hamiltonian-cycle construction.
    pub connectivity_attempts: u32,
}

impl GeneratorConfig {
    /// Config for `topology` with `vertex_count` vertices and defaults
    /// elsewhere.
    pub fn new(topology: Topology, vertex_count: usize) -> Self {
        Self {
            topology,
            vertex_count,
            max_weight: DEFAULT_MAX_WEIGHT,
            density: DEFAULT_DENSITY,
            seed: None,
            connectivity_attempts: DEFAULT_CONNECTIVITY_ATTEMPTS,
        }
    }

    /// Sets the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks every numeric parameter.
    ///
    /// # Errors
    ///
    /// Returns the first [`GenerateError`] that applies.
    pub fn validate(&self) -> Result<(), GenerateError> {
        if self.vertex_count == 0 {
            return Err(GenerateError::ZeroVertices);
        }
        if self.vertex_count.checked_mul(self.vertex_count - 1).is_none() {
            return Err(GenerateError::TooManyVertices {
                vertex_count: self.vertex_count,
            });
        }
        if self.max_weight == 0 {
            return Err(GenerateError::ZeroMaxWeight);
        }
        if !(self.density > 0.0 && self.density <= 1.0) {
            return Err(GenerateError::InvalidDensity {
                density: self.density,
            });
        }
        Ok(())
    }
}

/// Predefined graph sizes for a test suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// 10 vertices.
    Small,
    /// 20 vertices.
    Medium,
    /// 100 vertices.
    Large,
}

impl SizeTier {
    /// Every tier, smallest first.
    pub const ALL: [SizeTier; 3] = [SizeTier::Small, SizeTier::Medium, SizeTier::Large];

    /// Vertex count of this tier.
    pub fn vertex_count(self) -> usize {
        match self {
            SizeTier::Small => 10,
            SizeTier::Medium => 20,
            SizeTier::Large => 100,
        }
    }

    /// File-name suffix (`p`, `m`, `g`).
    pub fn suffix(self) -> &'static str {
        match self {
            SizeTier::Small => "p",
            SizeTier::Medium => "m",
            SizeTier::Large => "g",
        }
    }

    /// Returns the seeded `GeneratorConfig` for `topology` at this tier.
    pub fn config(self, topology: Topology, seed: u64) -> GeneratorConfig {
        GeneratorConfig::new(topology, self.vertex_count()).with_seed(seed)
    }

    /// Suite file name, e.g. `cyclic_m.txt`.
    pub fn file_name(self, topology: Topology) -> String {
        format!("{}_{}.txt", topology.name(), self.suffix())
    }
}

/// Generates a graph from `config`.
///
/// With `config.seed` set the result is fully deterministic.
///
/// # Errors
///
/// Returns [`GenerateError`] if the config fails validation.
pub fn generate(config: &GeneratorConfig) -> Result<Graph, GenerateError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    generate_with_rng(config, &mut rng)
}

/// Generates a graph drawing every random choice from `rng`.
///
/// `config.seed` is ignored.
///
/// # Errors
///
/// Returns [`GenerateError`] if the config fails validation.
pub fn generate_with_rng(config: &GeneratorConfig, rng: &mut StdRng) -> Result<Graph, GenerateError> {
    config.validate()?;
    let v = config.vertex_count;

    let arcs = match config.topology {
        Topology::Connected => {
            let m = sampling::arcs_for_density(v, config.density);
            topology::connected(rng, v, m, config.connectivity_attempts)
        }
        Topology::Disconnected => {
            topology::disconnected(rng, v, config.density, config.connectivity_attempts)
        }
        Topology::Cyclic => topology::cyclic(v),
        Topology::Dense => topology::dense(rng, v),
        Topology::Sparse => topology::sparse(rng, v),
        Topology::Isolated => topology::isolated(rng, v, config.density),
    };

    let edges = sampling::assign_weights(rng, &arcs, config.max_weight);
    let graph = Graph::new(v, edges)?;
    tracing::debug!(
        topology = %config.topology,
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "generated graph"
    );
    Ok(graph)
}
