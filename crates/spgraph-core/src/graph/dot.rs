//! DOT rendering and petgraph conversion.
//!
//! Rendering goes through [`petgraph::dot::Dot`]: vertices are listed first
//! (labelled by id), then edges in vertex/adjacency order. Undirected graphs
//! render as `graph { a -- b }` with each edge once. Weighted graphs label
//! edges with their weight; unweighted edges carry no label.

use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex, UnGraph};

use crate::graph::{Graph, VertexId, Weight};

/// Convert to a petgraph `DiGraph` whose node `i` is vertex `i`.
///
/// Undirected edges become a pair of opposite arcs, matching the stored
/// adjacency.
#[must_use]
pub fn to_petgraph(graph: &Graph) -> DiGraph<VertexId, Weight> {
    let mut pg = DiGraph::with_capacity(graph.vertex_count(), graph.edges().count());
    for v in 0..graph.vertex_count() {
        pg.add_node(v);
    }
    for (from, edge) in graph.edges() {
        pg.add_edge(NodeIndex::new(from), NodeIndex::new(edge.to), edge.weight);
    }
    pg
}

fn to_undirected_petgraph(graph: &Graph) -> UnGraph<VertexId, Weight> {
    let mut pg = UnGraph::with_capacity(graph.vertex_count(), graph.edge_count());
    for v in 0..graph.vertex_count() {
        pg.add_node(v);
    }
    for (from, edge) in graph.edges().filter(|(from, e)| *from < e.to) {
        pg.add_edge(NodeIndex::new(from), NodeIndex::new(edge.to), edge.weight);
    }
    pg
}

/// Render `graph` as DOT text.
#[must_use]
pub fn render_dot(graph: &Graph) -> String {
    let config: &[Config] = if graph.is_weighted() {
        &[]
    } else {
        &[Config::EdgeNoLabel]
    };

    if graph.is_directed() {
        format!("{:?}", Dot::with_config(&to_petgraph(graph), config))
    } else {
        format!(
            "{:?}",
            Dot::with_config(&to_undirected_petgraph(graph), config)
        )
    }
}

impl Graph {
    /// DOT rendering of this graph; see [`render_dot`].
    #[must_use]
    pub fn to_dot(&self) -> String {
        render_dot(self)
    }
}
