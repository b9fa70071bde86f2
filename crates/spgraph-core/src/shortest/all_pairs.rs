//! All-pairs shortest distances from repeated Bellman-Ford runs.
//!
//! Row `v` of the [`DistanceMatrix`] is the distance vector of a
//! [`bellman_ford`](super::bellman_ford::bellman_ford) run from `v`. Any run
//! that fails, on a negative cycle or an out-of-range distance, aborts the
//! whole computation; no partially filled matrix is ever returned.
//!
//! Complexity: N runs of O(N · E), so O(N² · E) overall.

use tracing::{info, instrument};

use crate::error::{Result, try_filled};
use crate::graph::{Graph, VertexId, Weight};
use crate::probe::{NoProbe, Probe};
use crate::shortest::bellman_ford::bellman_ford_with_probe;

/// N×N shortest distances; `None` marks an unreachable pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    vertex_count: usize,
    cells: Vec<Option<Weight>>,
}

impl DistanceMatrix {
    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Shortest distance from `v` to `w`; `None` if unreachable or either
    /// id is out of range.
    #[must_use]
    pub fn distance(&self, v: VertexId, w: VertexId) -> Option<Weight> {
        if v >= self.vertex_count || w >= self.vertex_count {
            return None;
        }
        self.cells[v * self.vertex_count + w]
    }

    #[must_use]
    pub fn is_reachable(&self, v: VertexId, w: VertexId) -> bool {
        self.distance(v, w).is_some()
    }

    /// Row `v`: distances from `v` to every vertex.
    #[must_use]
    pub fn row(&self, v: VertexId) -> Option<&[Option<Weight>]> {
        if v >= self.vertex_count {
            return None;
        }
        let start = v * self.vertex_count;
        Some(&self.cells[start..start + self.vertex_count])
    }

    /// All rows in vertex order.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Weight>]> + '_ {
        self.cells.chunks(self.vertex_count.max(1))
    }
}

/// Compute the distance matrix of `graph`.
///
/// # Errors
///
/// - [`GraphError::NegativeCycle`](crate::GraphError::NegativeCycle) from the
///   first source that reaches one.
/// - [`GraphError::DistanceOverflow`](crate::GraphError::DistanceOverflow)
///   if a distance does not fit in a [`Weight`].
/// - [`GraphError::Allocation`](crate::GraphError::Allocation) if the matrix
///   cannot be reserved.
pub fn all_pairs_shortest_distances(graph: &Graph) -> Result<DistanceMatrix> {
    all_pairs_with_probe(graph, &mut NoProbe)
}

/// [`all_pairs_shortest_distances`] reporting every run to `probe`.
///
/// # Errors
///
/// See [`all_pairs_shortest_distances`].
#[instrument(skip(graph, probe), fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn all_pairs_with_probe(graph: &Graph, probe: &mut dyn Probe) -> Result<DistanceMatrix> {
    let n = graph.vertex_count();
    let mut cells = try_filled("distance matrix", n.saturating_mul(n), None)?;

    for (v, row) in cells.chunks_mut(n.max(1)).enumerate() {
        let paths = bellman_ford_with_probe(graph, v, probe)?;
        for (w, cell) in row.iter_mut().enumerate() {
            *cell = paths.distance(w);
        }
    }

    info!(vertices = n, "all-pairs distances computed");
    Ok(DistanceMatrix {
        vertex_count: n,
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;

    #[test]
    fn chain_matrix_is_upper_triangular() {
        let mut g = Graph::directed(4);
        for v in 1..4 {
            g.add_edge(v - 1, v).expect("valid edge");
        }

        let m = all_pairs_shortest_distances(&g).expect("no cycles");
        assert_eq!(
            m.row(0).expect("row 0"),
            &[Some(0), Some(1), Some(2), Some(3)]
        );
        assert_eq!(m.row(3).expect("row 3"), &[None, None, None, Some(0)]);
        assert!(!m.is_reachable(2, 1));
        assert_eq!(m.rows().count(), 4);
    }

    #[test]
    fn undirected_matrix_is_symmetric() {
        let mut g = Graph::undirected(4);
        g.add_edge(0, 1).expect("valid edge");
        g.add_edge(1, 2).expect("valid edge");
        g.add_edge(0, 3).expect("valid edge");

        let m = all_pairs_shortest_distances(&g).expect("no cycles");
        for v in 0..4 {
            for w in 0..4 {
                assert_eq!(m.distance(v, w), m.distance(w, v), "({v},{w})");
            }
        }
        assert_eq!(m.distance(2, 3), Some(3));
    }

    #[test]
    fn negative_cycle_anywhere_aborts() {
        // Only vertices 1 and 2 reach the cycle, but the aggregate still fails.
        let mut g = Graph::weighted_directed(3);
        g.add_weighted_edge(1, 2, -2).expect("valid edge");
        g.add_weighted_edge(2, 1, 1).expect("valid edge");

        let err = all_pairs_shortest_distances(&g).unwrap_err();
        assert!(matches!(err, GraphError::NegativeCycle { start: 1 }));
    }

    #[test]
    fn empty_graph_has_empty_matrix() {
        let m = all_pairs_shortest_distances(&Graph::directed(0)).expect("trivial");
        assert_eq!(m.vertex_count(), 0);
        assert_eq!(m.rows().count(), 0);
        assert_eq!(m.distance(0, 0), None);
    }

    #[test]
    fn out_of_range_lookups_are_none() {
        let m = all_pairs_shortest_distances(&Graph::directed(2)).expect("trivial");
        assert_eq!(m.distance(0, 0), Some(0));
        assert_eq!(m.distance(0, 5), None);
        assert!(m.row(2).is_none());
    }
}
