//! Transitive closure of a directed, unweighted graph.
//!
//! The closure has an edge `v → w` iff `w ≠ v` is reachable from `v` in the
//! input. Reachability comes from one Bellman-Ford run per vertex; with unit
//! weights no negative cycle can occur, but a failing run still aborts the
//! whole computation.

use tracing::{info, instrument};

use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::probe::{NoProbe, Probe};
use crate::shortest::bellman_ford::bellman_ford_with_probe;

/// Compute the transitive closure of `graph`.
///
/// # Errors
///
/// - [`GraphError::NotDirected`] / [`GraphError::Weighted`] before any
///   computation if the input is undirected or weighted.
/// - Any error of a per-vertex Bellman-Ford run.
pub fn transitive_closure(graph: &Graph) -> Result<Graph> {
    transitive_closure_with_probe(graph, &mut NoProbe)
}

/// [`transitive_closure`] reporting every run to `probe`.
///
/// # Errors
///
/// See [`transitive_closure`].
#[instrument(skip(graph, probe), fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn transitive_closure_with_probe(graph: &Graph, probe: &mut dyn Probe) -> Result<Graph> {
    if !graph.is_directed() {
        return Err(GraphError::NotDirected);
    }
    if graph.is_weighted() {
        return Err(GraphError::Weighted);
    }

    let n = graph.vertex_count();
    let mut closure = Graph::directed(n);

    for v in 0..n {
        let paths = bellman_ford_with_probe(graph, v, probe)?;
        for w in paths.reached_vertices().filter(|&w| w != v) {
            closure.add_edge(v, w)?;
        }
    }

    info!(
        vertices = n,
        edges = closure.edge_count(),
        "transitive closure computed"
    );
    Ok(closure)
}
