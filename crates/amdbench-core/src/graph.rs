//! Directed weighted graph over contiguous integer vertices.
//!
//! [`Graph`] is the value every generator produces and every serializer
//! consumes. Vertices are the integers `0..vertex_count`; edges are kept in
//! the order they were supplied. Construction validates that every endpoint
//! is in range and every weight is positive, so downstream code never has to
//! re-check those invariants.
//!
//! Connectivity and isolation queries delegate to `petgraph` through
//! [`Graph::to_digraph`].
use petgraph::algo::kosaraju_scc;
use petgraph::graph::{DiGraph, NodeIndex};

/// A single directed, weighted edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    /// Source vertex id.
    pub source: usize,
    /// Target vertex id.
    pub target: usize,
    /// Positive integer weight.
    pub weight: u32,
}

impl Edge {
    /// Creates a new edge.
    pub fn new(source: usize, target: usize, weight: u32) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }
}

/// Errors raised when a [`Graph`] would violate its invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// An edge endpoint lies outside `0..vertex_count`.
    #[error("edge {from} -> {to} has an endpoint outside 0..{vertex_count}")]
    EndpointOutOfRange {
        /// Source vertex of the offending edge.
        from: usize,
        /// Target vertex of the offending edge.
        to: usize,
        /// Vertex count of the graph under construction.
        vertex_count: usize,
    },
    /// An edge carries a zero weight.
    #[error("edge {from} -> {to} has weight 0; weights must be positive")]
    ZeroWeight {
        /// Source vertex of the offending edge.
        from: usize,
        /// Target vertex of the offending edge.
        to: usize,
    },
}

/// A directed weighted graph with vertices `0..vertex_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    vertex_count: usize,
    edges: Vec<Edge>,
}

impl Graph {
    /// Builds a graph, validating every edge.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError`] for the first edge whose endpoint is out of
    /// range or whose weight is zero.
    pub fn new(vertex_count: usize, edges: Vec<Edge>) -> Result<Self, GraphError> {
        for edge in &edges {
            check_edge(vertex_count, edge)?;
        }
        Ok(Self {
            vertex_count,
            edges,
        })
    }

    /// Builds a graph from edges that already passed [`check_edge`].
    pub(crate) fn from_checked_edges(vertex_count: usize, edges: Vec<Edge>) -> Self {
        Self {
            vertex_count,
            edges,
        }
    }

    /// Returns a graph with `vertex_count` vertices and no edges.
    pub fn empty(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            edges: Vec::new(),
        }
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Consumes the graph and returns its edge list.
    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }

    /// Targets of all edges leaving `vertex`, in edge order.
    pub fn successors(&self, vertex: usize) -> Vec<usize> {
        self.edges
            .iter()
            .filter(|e| e.source == vertex)
            .map(|e| e.target)
            .collect()
    }

    /// Vertices with no incoming and no outgoing edge, ascending.
    pub fn isolated_vertices(&self) -> Vec<usize> {
        let mut touched = vec![false; self.vertex_count];
        for edge in &self.edges {
            // Endpoints are validated at construction.
            if let Some(flag) = touched.get_mut(edge.source) {
                *flag = true;
            }
            if let Some(flag) = touched.get_mut(edge.target) {
                *flag = true;
            }
        }
        touched
            .iter()
            .enumerate()
            .filter(|(_, t)| !**t)
            .map(|(v, _)| v)
            .collect()
    }

    /// Returns `true` if every vertex can reach every other vertex.
    ///
    /// A graph with zero or one vertex is trivially strongly connected.
    pub fn is_strongly_connected(&self) -> bool {
        if self.vertex_count <= 1 {
            return true;
        }
        kosaraju_scc(&self.to_digraph()).len() == 1
    }

    /// Converts to a `petgraph` [`DiGraph`] whose node weights are the
    /// vertex ids and whose edge weights are the edge weights.
    pub fn to_digraph(&self) -> DiGraph<usize, u32> {
        let mut g = DiGraph::with_capacity(self.vertex_count, self.edges.len());
        for v in 0..self.vertex_count {
            g.add_node(v);
        }
        for edge in &self.edges {
            g.add_edge(
                NodeIndex::new(edge.source),
                NodeIndex::new(edge.target),
                edge.weight,
            );
        }
        g
    }
}

/// Validates a single edge against a vertex count.
pub(crate) fn check_edge(vertex_count: usize, edge: &Edge) -> Result<(), GraphError> {
    if edge.source >= vertex_count || edge.target >= vertex_count {
        return Err(GraphError::EndpointOutOfRange {
            from: edge.source,
            to: edge.target,
            vertex_count,
        });
    }
    if edge.weight == 0 {
        return Err(GraphError::ZeroWeight {
            from: edge.source,
            to: edge.target,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn cycle(n: usize) -> Graph {
        let edges = (0..n).map(|i| Edge::new(i, (i + 1) % n, 1)).collect();
        Graph::new(n, edges).expect("valid cycle")
    }

    #[test]
    fn new_rejects_out_of_range_target() {
        let err = Graph::new(3, vec![Edge::new(0, 3, 1)]).expect_err("target 3 is out of range");
        assert_eq!(
            err,
            GraphError::EndpointOutOfRange {
                from: 0,
                to: 3,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn new_rejects_zero_weight() {
        let err = Graph::new(2, vec![Edge::new(0, 1, 0)]).expect_err("zero weight");
        assert!(matches!(err, GraphError::ZeroWeight { .. }));
    }

    #[test]
    fn new_accepts_self_loop() {
        let g = Graph::new(1, vec![Edge::new(0, 0, 4)]).expect("one-vertex cycle");
        assert_eq!(g.edge_count(), 1);
        assert!(g.isolated_vertices().is_empty());
    }

    #[test]
    fn cycle_is_strongly_connected() {
        assert!(cycle(6).is_strongly_connected());
    }

    #[test]
    fn path_is_not_strongly_connected() {
        let g = Graph::new(3, vec![Edge::new(0, 1, 1), Edge::new(1, 2, 1)]).expect("valid");
        assert!(!g.is_strongly_connected());
    }

    #[test]
    fn single_vertex_is_strongly_connected() {
        assert!(Graph::empty(1).is_strongly_connected());
    }

    #[test]
    fn isolated_vertices_ignores_direction() {
        let g = Graph::new(4, vec![Edge::new(2, 0, 5)]).expect("valid");
        assert_eq!(g.isolated_vertices(), vec![1, 3]);
    }

    #[test]
    fn successors_follow_edge_order() {
        let g = Graph::new(
            3,
            vec![Edge::new(0, 2, 1), Edge::new(1, 0, 1), Edge::new(0, 1, 1)],
        )
        .expect("valid");
        assert_eq!(g.successors(0), vec![2, 1]);
        assert!(g.successors(2).is_empty());
    }

    #[test]
    fn to_digraph_preserves_counts_and_weights() {
        let g = Graph::new(3, vec![Edge::new(0, 1, 7), Edge::new(1, 2, 9)]).expect("valid");
        let dg = g.to_digraph();
        assert_eq!(dg.node_count(), 3);
        assert_eq!(dg.edge_count(), 2);
        let weights: Vec<u32> = dg.edge_weights().copied().collect();
        assert_eq!(weights, vec![7, 9]);
    }
}
