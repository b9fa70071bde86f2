//! Single-source shortest paths via Bellman-Ford.
//!
//! # Algorithm
//!
//! 1. `dist[source] = 0`; every other vertex starts unreached (no distance).
//! 2. Up to `N - 1` rounds: scan vertices in id order and, for each reached
//!    vertex `u`, each adjacency entry `(u, v, w)` in insertion order; if
//!    `dist[u] + w < dist[v]` set `dist[v]`, `pred[v] = u`, mark `v` reached.
//!    A round that makes no update ends the loop early.
//! 3. One verification pass over every edge. If any edge still relaxes, a
//!    negative-weight cycle is reachable from the source and the run fails
//!    without producing a result.
//!
//! Updates happen in place, so a vertex improved earlier in a round is used
//! by later edges of the same round. Ties never update (strict `<` in step
//! 2 governs): among equal-length alternatives the first one found keeps
//! the predecessor slot.
//!
//! Reported distances are `i64`. Unreached vertices are `None`, never an
//! "infinity" value. Relaxation runs on `i128`: every distance is the weight
//! of a walk with at most one edge per relaxation performed, so it stays far
//! inside the `i128` range and every comparison in steps 2 and 3 is exact.
//! Once the verification pass is clean each distance is narrowed back to
//! `i64`; a reachable vertex whose distance does not fit fails the run with
//! [`GraphError::DistanceOverflow`].
//!
//! Complexity: O(N · E) per run.

use serde::Serialize;
use tracing::{debug, instrument, trace, warn};

use crate::error::{GraphError, Result, check_vertex, try_filled};
use crate::graph::{Graph, VertexId, Weight};
use crate::probe::{NoProbe, Probe, RunOutcome};

/// Output of one Bellman-Ford run. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortestPathResult {
    source: VertexId,
    reached: Vec<bool>,
    distance: Vec<Option<Weight>>,
    predecessor: Vec<Option<VertexId>>,
    rounds: usize,
}

impl ShortestPathResult {
    /// The root of the shortest-path tree.
    #[must_use]
    pub const fn source(&self) -> VertexId {
        self.source
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.reached.len()
    }

    /// Relaxation rounds performed before convergence or the `N - 1` bound.
    #[must_use]
    pub const fn rounds(&self) -> usize {
        self.rounds
    }

    /// `true` iff a path from the source to `v` exists.
    #[must_use]
    pub fn reached(&self, v: VertexId) -> bool {
        self.reached.get(v).copied().unwrap_or(false)
    }

    /// Shortest distance to `v`, or `None` when `v` is unreached (or not a
    /// vertex).
    #[must_use]
    pub fn distance(&self, v: VertexId) -> Option<Weight> {
        self.distance.get(v).copied().flatten()
    }

    /// Previous vertex on the shortest path to `v`. `None` for the source and
    /// for unreached vertices.
    #[must_use]
    pub fn predecessor(&self, v: VertexId) -> Option<VertexId> {
        self.predecessor.get(v).copied().flatten()
    }

    /// Reached vertices in id order, source included.
    pub fn reached_vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.reached
            .iter()
            .enumerate()
            .filter_map(|(v, &r)| r.then_some(v))
    }

    /// The vertex sequence `source, ..., v`; empty if `v` is unreached.
    ///
    /// Predecessor links of reached vertices form a tree rooted at the
    /// source once the verification pass succeeded, so the walk terminates.
    #[must_use]
    pub fn path_to(&self, v: VertexId) -> Vec<VertexId> {
        if !self.reached(v) {
            return Vec::new();
        }

        let mut path = vec![v];
        let mut current = v;
        while current != self.source {
            match self.predecessor(current) {
                Some(prev) => {
                    path.push(prev);
                    current = prev;
                }
                None => break,
            }
        }
        path.reverse();
        path
    }

    /// Edges `(predecessor, vertex)` of the shortest-path tree.
    pub fn tree_edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.predecessor
            .iter()
            .enumerate()
            .filter_map(|(v, p)| p.map(|u| (u, v)))
    }

    /// The shortest-path tree as a directed, unweighted graph.
    ///
    /// # Errors
    ///
    /// Never fails for results produced by [`bellman_ford`]; the error path
    /// exists because tree construction reuses checked edge insertion.
    pub fn to_tree_graph(&self) -> Result<Graph> {
        let mut tree = Graph::directed(self.vertex_count());
        for (u, v) in self.tree_edges() {
            tree.add_edge(u, v)?;
        }
        Ok(tree)
    }
}

/// Run Bellman-Ford from `source`.
///
/// # Errors
///
/// - [`GraphError::VertexOutOfRange`] if `source` is not a vertex.
/// - [`GraphError::NegativeCycle`] if a negative cycle is reachable.
/// - [`GraphError::DistanceOverflow`] if a shortest distance does not fit in
///   a [`Weight`].
/// - [`GraphError::Allocation`] if result storage cannot be reserved.
pub fn bellman_ford(graph: &Graph, source: VertexId) -> Result<ShortestPathResult> {
    bellman_ford_with_probe(graph, source, &mut NoProbe)
}

/// [`bellman_ford`] reporting progress to `probe`.
///
/// # Errors
///
/// See [`bellman_ford`].
#[instrument(level = "debug", skip(graph, probe), fields(vertices = graph.vertex_count()))]
pub fn bellman_ford_with_probe(
    graph: &Graph,
    source: VertexId,
    probe: &mut dyn Probe,
) -> Result<ShortestPathResult> {
    let n = graph.vertex_count();
    check_vertex(source, n)?;

    let mut state = Relaxation {
        distance: try_filled("distance", n, None)?,
        predecessor: try_filled("predecessor", n, None)?,
        reached: try_filled("reached", n, false)?,
    };
    state.distance[source] = Some(0_i128);
    state.reached[source] = true;

    probe.run_started(source);

    let mut rounds = 0;
    let mut converged = n <= 1;
    for round in 1..n {
        let updates = state.relax_all(graph, probe);
        rounds = round;
        probe.round_finished(source, round, updates);
        if updates == 0 {
            converged = true;
            break;
        }
    }

    if let Some((u, v)) = state.find_improvable_edge(graph, probe) {
        warn!(source, from = u, to = v, "negative-weight cycle reachable from source");
        probe.run_finished(source, RunOutcome::NegativeCycle { rounds });
        return Err(GraphError::NegativeCycle { start: source });
    }

    let distance = match state.narrow(source) {
        Ok(distance) => distance,
        Err(err) => {
            warn!(source, error = %err, "shortest distance out of range");
            probe.run_finished(source, RunOutcome::DistanceOverflow { rounds });
            return Err(err);
        }
    };

    let outcome = if converged {
        RunOutcome::Converged { rounds }
    } else {
        RunOutcome::Exhausted { rounds }
    };
    debug!(source, rounds, converged, "shortest paths computed");
    probe.run_finished(source, outcome);

    Ok(ShortestPathResult {
        source,
        reached: state.reached,
        distance,
        predecessor: state.predecessor,
        rounds,
    })
}

/// Mutable per-run buffers; dropped wholesale on failure.
struct Relaxation {
    distance: Vec<Option<i128>>,
    predecessor: Vec<Option<VertexId>>,
    reached: Vec<bool>,
}

impl Relaxation {
    /// The improved distance `dist[u] + w` for `v`, if it is one.
    fn candidate(&self, du: i128, v: VertexId, weight: Weight) -> Option<i128> {
        // |du| <= (relaxations + 1) * 2^63.
        let candidate = du + i128::from(weight);
        match self.distance[v] {
            Some(dv) if dv <= candidate => None,
            _ => Some(candidate),
        }
    }

    /// Final distances as [`Weight`]s.
    fn narrow(&self, source: VertexId) -> Result<Vec<Option<Weight>>> {
        let mut narrowed = try_filled("distance", self.distance.len(), None)?;
        for (vertex, (slot, wide)) in narrowed.iter_mut().zip(&self.distance).enumerate() {
            if let Some(wide) = *wide {
                let value =
                    Weight::try_from(wide).map_err(|_| GraphError::DistanceOverflow {
                        start: source,
                        vertex,
                        distance: wide,
                    })?;
                *slot = Some(value);
            }
        }
        Ok(narrowed)
    }

    /// One full round; returns the number of updates made.
    fn relax_all(&mut self, graph: &Graph, probe: &mut dyn Probe) -> usize {
        let mut updates = 0;
        for u in 0..graph.vertex_count() {
            // No self-loops, so relaxing u's own edges never changes dist[u].
            let Some(du) = self.distance[u] else {
                continue;
            };
            for edge in graph.adjacents(u) {
                probe.edge_scanned();
                if let Some(d) = self.candidate(du, edge.to, edge.weight) {
                    trace!(from = u, to = edge.to, distance = d, "relaxed");
                    self.distance[edge.to] = Some(d);
                    self.predecessor[edge.to] = Some(u);
                    self.reached[edge.to] = true;
                    probe.relaxed(u, edge.to, d);
                    updates += 1;
                }
            }
        }
        updates
    }

    /// The first edge that still admits a strict improvement.
    fn find_improvable_edge(
        &self,
        graph: &Graph,
        probe: &mut dyn Probe,
    ) -> Option<(VertexId, VertexId)> {
        for u in 0..graph.vertex_count() {
            let Some(du) = self.distance[u] else {
                continue;
            };
            for edge in graph.adjacents(u) {
                probe.edge_scanned();
                if self.candidate(du, edge.to, edge.weight).is_some() {
                    return Some((u, edge.to));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::probe::RelaxationCounters;

    fn weighted(n: usize, edges: &[(VertexId, VertexId, Weight)]) -> Graph {
        let mut g = Graph::weighted_directed(n);
        for &(u, v, w) in edges {
            g.add_weighted_edge(u, v, w).expect("valid edge");
        }
        g
    }

    fn chain(n: usize) -> Graph {
        let mut g = Graph::directed(n);
        for v in 1..n {
            g.add_edge(v - 1, v).expect("valid edge");
        }
        g
    }

    #[test]
    fn source_is_reached_at_distance_zero() {
        let r = bellman_ford(&chain(3), 1).expect("no cycles");
        assert!(r.reached(1));
        assert_eq!(r.distance(1), Some(0));
        assert_eq!(r.predecessor(1), None);
        assert_eq!(r.path_to(1), vec![1]);
    }

    #[test]
    fn unweighted_chain_distances() {
        let r = bellman_ford(&chain(4), 0).expect("no cycles");
        assert_eq!(
            (0..4).map(|v| r.distance(v)).collect::<Vec<_>>(),
            vec![Some(0), Some(1), Some(2), Some(3)]
        );
        assert_eq!(r.path_to(3), vec![0, 1, 2, 3]);
    }

    #[test]
    fn upstream_vertices_are_unreached() {
        let r = bellman_ford(&chain(4), 2).expect("no cycles");
        assert!(!r.reached(0));
        assert_eq!(r.distance(0), None);
        assert_eq!(r.predecessor(0), None);
        assert!(r.path_to(0).is_empty());
        assert_eq!(r.reached_vertices().collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn negative_edge_shortens_path() {
        // 0 -> 1 (4), 0 -> 2 (5), 2 -> 1 (-3): best to 1 is 2 via 2.
        let g = weighted(3, &[(0, 1, 4), (0, 2, 5), (2, 1, -3)]);
        let r = bellman_ford(&g, 0).expect("no cycles");
        assert_eq!(r.distance(1), Some(2));
        assert_eq!(r.predecessor(1), Some(2));
        assert_eq!(r.path_to(1), vec![0, 2, 1]);
    }

    #[test]
    fn negative_cycle_fails() {
        let g = weighted(3, &[(0, 1, 1), (1, 2, -3), (2, 0, 1)]);
        let err = bellman_ford(&g, 0).unwrap_err();
        assert!(matches!(err, GraphError::NegativeCycle { start: 0 }));
        assert_eq!(err.kind(), ErrorKind::NegativeCycle);
    }

    #[test]
    fn unreachable_negative_cycle_is_ignored() {
        // Cycle 1 -> 2 -> 1 has weight -2 but vertex 0 cannot reach it.
        let g = weighted(3, &[(1, 2, -1), (2, 1, -1)]);
        let r = bellman_ford(&g, 0).expect("cycle unreachable from 0");
        assert_eq!(r.reached_vertices().collect::<Vec<_>>(), vec![0]);
        assert!(bellman_ford(&g, 1).is_err());
    }

    #[test]
    fn equal_length_alternative_keeps_first_predecessor() {
        // 0 -> 1 -> 3 and 0 -> 2 -> 3 both cost 2; 1 is scanned first.
        let g = weighted(4, &[(0, 1, 1), (0, 2, 1), (1, 3, 1), (2, 3, 1)]);
        let r = bellman_ford(&g, 0).expect("no cycles");
        assert_eq!(r.distance(3), Some(2));
        assert_eq!(r.predecessor(3), Some(1));
    }

    #[test]
    fn zero_weight_cycle_is_fine() {
        let g = weighted(2, &[(0, 1, 3), (1, 0, -3)]);
        let r = bellman_ford(&g, 0).expect("zero-weight cycle is not negative");
        assert_eq!(r.distance(1), Some(3));
        assert_eq!(r.distance(0), Some(0));
    }

    #[test]
    fn out_of_range_source_rejected() {
        let err = bellman_ford(&chain(2), 2).unwrap_err();
        assert!(matches!(
            err,
            GraphError::VertexOutOfRange {
                vertex: 2,
                vertex_count: 2
            }
        ));
        assert!(bellman_ford(&Graph::directed(0), 0).is_err());
    }

    #[test]
    fn stops_after_zero_update_round() {
        // Forward-ordered chain settles in round 1; round 2 confirms.
        let r = bellman_ford(&chain(5), 0).expect("no cycles");
        assert_eq!(r.rounds(), 2);
    }

    #[test]
    fn reverse_ordered_chain_needs_every_round() {
        // 3 -> 2 -> 1 -> 0: scanning ids upward learns one hop per round.
        let mut g = Graph::directed(4);
        g.add_edge(3, 2).expect("valid edge");
        g.add_edge(2, 1).expect("valid edge");
        g.add_edge(1, 0).expect("valid edge");

        let mut counters = RelaxationCounters::default();
        let r = bellman_ford_with_probe(&g, 3, &mut counters).expect("no cycles");

        assert_eq!(r.rounds(), 3);
        assert_eq!(r.distance(0), Some(3));
        assert_eq!(counters.rounds, 3);
        assert_eq!(counters.early_exits, 0);
        assert_eq!(counters.relaxations, 3);
    }

    #[test]
    fn single_vertex_graph() {
        let r = bellman_ford(&Graph::directed(1), 0).expect("trivial");
        assert_eq!(r.rounds(), 0);
        assert_eq!(r.distance(0), Some(0));
    }

    #[test]
    fn undirected_edges_relax_both_ways() {
        let mut g = Graph::undirected(3);
        g.add_edge(2, 1).expect("valid edge");
        g.add_edge(1, 0).expect("valid edge");

        let r = bellman_ford(&g, 0).expect("no cycles");
        assert_eq!(r.distance(2), Some(2));
        assert_eq!(r.path_to(2), vec![0, 1, 2]);
    }

    #[test]
    fn distance_past_weight_max_is_an_error() {
        let g = weighted(3, &[(0, 1, Weight::MAX), (1, 2, 1)]);
        let err = bellman_ford(&g, 0).unwrap_err();
        assert!(matches!(
            err,
            GraphError::DistanceOverflow {
                start: 0,
                vertex: 2,
                distance,
            } if distance == i128::from(Weight::MAX) + 1
        ));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn distance_at_weight_extremes_is_kept() {
        let g = weighted(3, &[(0, 1, Weight::MIN), (1, 2, Weight::MAX)]);
        let r = bellman_ford(&g, 0).expect("no cycles");
        assert_eq!(r.distance(1), Some(Weight::MIN));
        assert_eq!(r.distance(2), Some(-1));
        assert!(r.reached(2));
    }

    #[test]
    fn negative_cycle_near_weight_min_is_detected() {
        let g = weighted(2, &[(0, 1, Weight::MIN + 1), (1, 0, Weight::MIN + 1)]);
        let mut counters = RelaxationCounters::default();
        let err = bellman_ford_with_probe(&g, 0, &mut counters).unwrap_err();
        assert!(matches!(err, GraphError::NegativeCycle { start: 0 }));
        assert_eq!(counters.negative_cycles, 1);
    }

    #[test]
    fn reachable_vertex_below_weight_min_is_an_error() {
        let g = weighted(3, &[(0, 1, Weight::MIN + 1), (1, 2, -5)]);
        let mut counters = RelaxationCounters::default();
        let err = bellman_ford_with_probe(&g, 0, &mut counters).unwrap_err();
        assert!(matches!(
            err,
            GraphError::DistanceOverflow {
                start: 0,
                vertex: 2,
                ..
            }
        ));
        assert_eq!(counters.runs, 1);
        assert_eq!(counters.negative_cycles, 0);
    }

    #[test]
    fn tree_graph_mirrors_predecessors() {
        let mut g = Graph::directed(4);
        g.add_edge(0, 1).expect("valid edge");
        g.add_edge(0, 2).expect("valid edge");
        g.add_edge(2, 3).expect("valid edge");

        let r = bellman_ford(&g, 0).expect("no cycles");
        let tree = r.to_tree_graph().expect("tree edges are valid");
        assert_eq!(tree.edge_count(), 3);
        assert!(tree.contains_edge(0, 1));
        assert!(tree.contains_edge(0, 2));
        assert!(tree.contains_edge(2, 3));
    }

    #[test]
    fn counters_see_the_verification_pass() {
        let g = chain(3);
        let mut counters = RelaxationCounters::default();
        bellman_ford_with_probe(&g, 0, &mut counters).expect("no cycles");

        // Two rounds of 2 edge scans plus a verification pass of 2.
        assert_eq!(counters.edge_scans, 6);
        assert_eq!(counters.runs, 1);
        assert_eq!(counters.early_exits, 1);
    }
}
