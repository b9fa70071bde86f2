//! Adjacency-list graph consumed by every shortest-path analysis.
//!
//! # Overview
//!
//! A [`Graph`] has `N` vertices identified by `0..N`, a directed/undirected
//! flag and a weighted/unweighted flag, both fixed at creation. Each vertex
//! owns a sequence of [`Edge`]s (neighbor id plus weight) in insertion
//! order; that order is the adjacency order the analyses iterate in.
//!
//! Unweighted graphs store weight `1` on every edge so the algorithms never
//! branch on the weighted flag. Undirected graphs store each edge in both
//! directions but count it once.
//!
//! ## Submodules
//!
//! - [`parse`]: the whitespace-separated text description format.
//! - [`dot`]: DOT rendering for graphs and shortest-path trees.

pub mod dot;
pub mod parse;

use serde::Serialize;

use crate::error::{GraphError, Result, check_vertex, try_filled};

/// Index of a vertex in `0..vertex_count`.
pub type VertexId = usize;

/// Edge weight and path length type.
pub type Weight = i64;

/// One entry of a vertex's adjacency sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    /// Neighbor the edge leads to.
    pub to: VertexId,
    /// Edge weight; always `1` in unweighted graphs.
    pub weight: Weight,
}

/// A static graph snapshot with integer edge weights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    directed: bool,
    weighted: bool,
    adjacency: Vec<Vec<Edge>>,
    edge_count: usize,
}

impl Graph {
    /// Create a graph with `vertex_count` vertices and no edges.
    ///
    /// Aborts like any `Vec` allocation when the vertex table does not fit;
    /// use [`Graph::try_new`] for counts taken from untrusted input.
    #[must_use]
    pub fn new(vertex_count: usize, directed: bool, weighted: bool) -> Self {
        Self {
            directed,
            weighted,
            adjacency: vec![Vec::new(); vertex_count],
            edge_count: 0,
        }
    }

    /// Like [`Graph::new`], but reserves the vertex table fallibly.
    ///
    /// # Errors
    ///
    /// [`GraphError::Allocation`] if the vertex table cannot be reserved.
    pub fn try_new(vertex_count: usize, directed: bool, weighted: bool) -> Result<Self> {
        Ok(Self {
            directed,
            weighted,
            adjacency: try_filled("adjacency", vertex_count, Vec::new())?,
            edge_count: 0,
        })
    }

    /// Unweighted directed graph.
    #[must_use]
    pub fn directed(vertex_count: usize) -> Self {
        Self::new(vertex_count, true, false)
    }

    /// Unweighted undirected graph.
    #[must_use]
    pub fn undirected(vertex_count: usize) -> Self {
        Self::new(vertex_count, false, false)
    }

    /// Weighted directed graph.
    #[must_use]
    pub fn weighted_directed(vertex_count: usize) -> Self {
        Self::new(vertex_count, true, true)
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges; an undirected edge counts once.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    #[must_use]
    pub const fn is_directed(&self) -> bool {
        self.directed
    }

    #[must_use]
    pub const fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Add an edge of weight 1 to an unweighted graph.
    ///
    /// Returns `Ok(false)` when the edge is already present.
    ///
    /// # Errors
    ///
    /// [`GraphError::WeightMismatch`] on a weighted graph, plus the endpoint
    /// errors described on [`Graph::add_weighted_edge`].
    pub fn add_edge(&mut self, from: VertexId, to: VertexId) -> Result<bool> {
        if self.weighted {
            return Err(GraphError::WeightMismatch {
                operation: "add_edge",
                expected: "unweighted",
            });
        }
        self.insert(from, to, 1)
    }

    /// Add an edge with an explicit weight to a weighted graph.
    ///
    /// Returns `Ok(false)` when the edge is already present.
    ///
    /// # Errors
    ///
    /// - [`GraphError::WeightMismatch`] on an unweighted graph.
    /// - [`GraphError::VertexOutOfRange`] if either endpoint is not a vertex.
    /// - [`GraphError::SelfLoop`] if `from == to`.
    pub fn add_weighted_edge(&mut self, from: VertexId, to: VertexId, weight: Weight) -> Result<bool> {
        if !self.weighted {
            return Err(GraphError::WeightMismatch {
                operation: "add_weighted_edge",
                expected: "weighted",
            });
        }
        self.insert(from, to, weight)
    }

    fn insert(&mut self, from: VertexId, to: VertexId, weight: Weight) -> Result<bool> {
        let n = self.vertex_count();
        check_vertex(from, n)?;
        check_vertex(to, n)?;
        if from == to {
            return Err(GraphError::SelfLoop { vertex: from });
        }
        if self.contains_edge(from, to) {
            return Ok(false);
        }

        self.adjacency[from].push(Edge { to, weight });
        if !self.directed {
            self.adjacency[to].push(Edge { to: from, weight });
        }
        self.edge_count += 1;
        Ok(true)
    }

    /// Return `true` if `from → to` is stored (either direction for
    /// undirected graphs). Out-of-range ids are simply absent.
    #[must_use]
    pub fn contains_edge(&self, from: VertexId, to: VertexId) -> bool {
        self.adjacency
            .get(from)
            .is_some_and(|edges| edges.iter().any(|e| e.to == to))
    }

    /// The adjacency sequence of `v`, in insertion order.
    ///
    /// Out-of-range ids yield an empty slice.
    #[must_use]
    pub fn adjacents(&self, v: VertexId) -> &[Edge] {
        self.adjacency.get(v).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every stored `(from, edge)` pair in vertex then adjacency order.
    ///
    /// Undirected edges appear once per direction.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, Edge)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(from, edges)| edges.iter().map(move |&e| (from, e)))
    }

    /// Out-degree of `v` (degree for undirected graphs).
    #[must_use]
    pub fn degree(&self, v: VertexId) -> usize {
        self.adjacents(v).len()
    }

    /// Verify the structural invariants of the adjacency storage.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Invariant`] describing the first violation found.
    pub fn check_invariants(&self) -> Result<()> {
        let n = self.vertex_count();
        let mut stored = 0_usize;

        for (from, edges) in self.adjacency.iter().enumerate() {
            for (i, edge) in edges.iter().enumerate() {
                if edge.to >= n {
                    return Err(GraphError::Invariant(format!(
                        "edge {from} -> {} points outside 0..{n}",
                        edge.to
                    )));
                }
                if edge.to == from {
                    return Err(GraphError::Invariant(format!("self-loop on vertex {from}")));
                }
                if edges[..i].iter().any(|prev| prev.to == edge.to) {
                    return Err(GraphError::Invariant(format!(
                        "duplicate edge {from} -> {}",
                        edge.to
                    )));
                }
                if !self.weighted && edge.weight != 1 {
                    return Err(GraphError::Invariant(format!(
                        "unweighted edge {from} -> {} carries weight {}",
                        edge.to, edge.weight
                    )));
                }
                if !self.directed {
                    let mirrored = self.adjacency[edge.to]
                        .iter()
                        .any(|back| back.to == from && back.weight == edge.weight);
                    if !mirrored {
                        return Err(GraphError::Invariant(format!(
                            "undirected edge {from} -- {} has no matching reverse entry",
                            edge.to
                        )));
                    }
                }
            }
            stored += edges.len();
        }

        let expected = if self.directed {
            self.edge_count
        } else {
            self.edge_count * 2
        };
        if stored != expected {
            return Err(GraphError::Invariant(format!(
                "edge count {} does not match {stored} stored adjacency entries",
                self.edge_count
            )));
        }
        Ok(())
    }
}
