//! Structural invariant checkers for generated graphs.

use std::collections::HashSet;

use amdbench_core::Graph;
use petgraph::algo::{connected_components, kosaraju_scc};

/// Verifies that every endpoint lies in `0..vertex_count`.
pub fn check_endpoints(graph: &Graph) -> Result<(), String> {
    let v = graph.vertex_count();
    match graph.edges().iter().find(|e| e.source >= v || e.target >= v) {
        Some(e) => Err(format!(
            "edge {} -> {} leaves vertex range 0..{v}",
            e.source, e.target
        )),
        None => Ok(()),
    }
}

/// Verifies that every weight lies in `1..=max_weight`.
pub fn check_weights(graph: &Graph, max_weight: u32) -> Result<(), String> {
    match graph
        .edges()
        .iter()
        .find(|e| e.weight == 0 || e.weight > max_weight)
    {
        Some(e) => Err(format!(
            "edge {} -> {} has weight {} outside 1..={max_weight}",
            e.source, e.target, e.weight
        )),
        None => Ok(()),
    }
}

/// Verifies there are no self-loops and no repeated `(source, target)`
/// pairs.
pub fn check_unique_pairs(graph: &Graph) -> Result<(), String> {
    let mut seen = HashSet::with_capacity(graph.edge_count());
    for e in graph.edges() {
        if e.source == e.target {
            return Err(format!("self-loop on vertex {}", e.source));
        }
        if !seen.insert((e.source, e.target)) {
            return Err(format!("duplicate edge {} -> {}", e.source, e.target));
        }
    }
    Ok(())
}

/// Verifies the graph is exactly one directed cycle through every vertex:
/// `V` edges, in- and out-degree 1 everywhere, and a single strongly
/// connected component.
pub fn check_single_cycle(graph: &Graph) -> Result<(), String> {
    let v = graph.vertex_count();
    if graph.edge_count() != v {
        return Err(format!(
            "cycle over {v} vertices must have {v} edges, found {}",
            graph.edge_count()
        ));
    }
    let mut out_degree = vec![0usize; v];
    let mut in_degree = vec![0usize; v];
    for e in graph.edges() {
        out_degree[e.source] += 1;
        in_degree[e.target] += 1;
    }
    if let Some(x) = (0..v).find(|&x| out_degree[x] != 1 || in_degree[x] != 1) {
        return Err(format!(
            "vertex {x} has out-degree {} and in-degree {}; expected 1 and 1",
            out_degree[x], in_degree[x]
        ));
    }
    let components = kosaraju_scc(&graph.to_digraph()).len();
    if components != 1 {
        return Err(format!("expected one cycle, found {components} components"));
    }
    Ok(())
}

/// Verifies every vertex can reach every other vertex.
pub fn check_strongly_connected(graph: &Graph) -> Result<(), String> {
    if graph.is_strongly_connected() {
        Ok(())
    } else {
        let components = kosaraju_scc(&graph.to_digraph()).len();
        Err(format!(
            "graph has {components} strongly connected components"
        ))
    }
}

/// Verifies at least one vertex has neither incoming nor outgoing edges.
pub fn check_has_isolated(graph: &Graph) -> Result<(), String> {
    if graph.isolated_vertices().is_empty() {
        Err("no isolated vertex".to_owned())
    } else {
        Ok(())
    }
}

/// Verifies the underlying undirected graph is a spanning tree: `V−1`
/// edges and a single weakly connected component.
pub fn check_tree_shape(graph: &Graph) -> Result<(), String> {
    let v = graph.vertex_count();
    let expected = v.saturating_sub(1);
    if graph.edge_count() != expected {
        return Err(format!(
            "tree over {v} vertices must have {expected} edges, found {}",
            graph.edge_count()
        ));
    }
    let components = connected_components(&graph.to_digraph());
    if v > 0 && components != 1 {
        return Err(format!("tree is split into {components} components"));
    }
    Ok(())
}

/// Verifies that no edge joins two different groups, where `group_sizes`
/// partitions `0..V` into consecutive ranges.
pub fn check_no_cross_group_edges(graph: &Graph, group_sizes: &[usize]) -> Result<(), String> {
    let total: usize = group_sizes.iter().sum();
    if total != graph.vertex_count() {
        return Err(format!(
            "group sizes sum to {total}, graph has {} vertices",
            graph.vertex_count()
        ));
    }
    let mut group_of = Vec::with_capacity(total);
    for (g, &size) in group_sizes.iter().enumerate() {
        group_of.extend(std::iter::repeat_n(g, size));
    }
    match graph
        .edges()
        .iter()
        .find(|e| group_of[e.source] != group_of[e.target])
    {
        Some(e) => Err(format!(
            "edge {} -> {} crosses from group {} to group {}",
            e.source, e.target, group_of[e.source], group_of[e.target]
        )),
        None => Ok(()),
    }
}
