//! Graphviz DOT rendering of a [`Graph`].
//!
//! Vertices are labelled with their id and edges with their weight. Isolated
//! vertices are filled `lightcoral` so they stand out from the connected
//! ones (`skyblue`). The output can be piped straight into `dot -Tpng`.
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, EdgeReference, NodeIndex};

use crate::graph::Graph;

const CONNECTED_FILL: &str = "skyblue";
const ISOLATED_FILL: &str = "lightcoral";

/// Renders `graph` as a DOT `digraph` titled `title`.
pub fn to_dot(graph: &Graph, title: &str) -> String {
    let mut isolated = vec![false; graph.vertex_count()];
    for v in graph.isolated_vertices() {
        if let Some(flag) = isolated.get_mut(v) {
            *flag = true;
        }
    }

    let digraph = graph.to_digraph();
    let vertex_attrs = |_: &DiGraph<usize, u32>, (_, vertex): (NodeIndex, &usize)| {
        let fill = if isolated.get(*vertex).copied().unwrap_or(false) {
            ISOLATED_FILL
        } else {
            CONNECTED_FILL
        };
        format!("style = filled fillcolor = {fill}")
    };
    let edge_attrs = |_: &DiGraph<usize, u32>, _: EdgeReference<'_, u32>| "color = gray".to_owned();

    format!(
        "digraph {{\n    label = \"{}\"\n{}}}\n",
        title.replace('"', "\\\""),
        Dot::with_attr_getters(
            &digraph,
            &[Config::GraphContentOnly],
            &edge_attrs,
            &vertex_attrs,
        )
    )
}
