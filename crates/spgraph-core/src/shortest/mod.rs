//! Shortest-path primitives.
//!
//! # Overview
//!
//! [`bellman_ford`] is the only algorithm here that touches the graph; every
//! other analysis in the crate is built from repeated single-source runs.
//!
//! ```text
//! Graph
//!   ↓  bellman_ford(graph, source)           once per call
//! ShortestPathResult (reached / distance / predecessor)
//!   ↓  all_pairs_shortest_distances(graph)   once per vertex
//! DistanceMatrix
//! ```
//!
//! ## Typical Usage
//!
//! ```rust
//! use spgraph_core::graph::Graph;
//! use spgraph_core::shortest::{all_pairs_shortest_distances, bellman_ford};
//!
//! let mut g = Graph::directed(3);
//! g.add_edge(0, 1)?;
//! g.add_edge(1, 2)?;
//!
//! let paths = bellman_ford(&g, 0)?;
//! assert_eq!(paths.path_to(2), vec![0, 1, 2]);
//!
//! let matrix = all_pairs_shortest_distances(&g)?;
//! assert_eq!(matrix.distance(2, 0), None);
//! # Ok::<(), spgraph_core::GraphError>(())
//! ```

pub mod all_pairs;
pub mod bellman_ford;

pub use all_pairs::{DistanceMatrix, all_pairs_shortest_distances, all_pairs_with_probe};
pub use bellman_ford::{ShortestPathResult, bellman_ford, bellman_ford_with_probe};
