#![forbid(unsafe_code)]
//! spgraph-core library: shortest-path analytics over integer-weighted graphs.
//!
//! # Conventions
//!
//! - **Errors**: Every fallible function returns [`Result`] with a
//!   [`GraphError`]; see [`ErrorKind`] for the taxonomy.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).
//! - **Instrumentation**: Pass a [`probe::Probe`] to the `*_with_probe`
//!   variants; nothing is recorded globally.

pub mod error;
pub mod graph;
pub mod metrics;
pub mod probe;
pub mod shortest;

pub use error::{ErrorKind, GraphError, Result};
pub use graph::{Edge, Graph, VertexId, Weight};
pub use metrics::{
    EccentricityReport, eccentricity_report, eccentricity_with_probe, transitive_closure,
    transitive_closure_with_probe,
};
pub use probe::{NoProbe, Probe, RelaxationCounters, RunOutcome};
pub use shortest::{
    DistanceMatrix, ShortestPathResult, all_pairs_shortest_distances, all_pairs_with_probe,
    bellman_ford, bellman_ford_with_probe,
};
