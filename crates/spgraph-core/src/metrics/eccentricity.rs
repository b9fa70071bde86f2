//! Eccentricity, radius, diameter and center of a graph.
//!
//! # Definitions
//!
//! | Term           | Definition |
//! |----------------|------------|
//! | eccentricity   | Largest shortest distance from `v` to another vertex it reaches. Undefined when `v` reaches no other vertex. |
//! | radius         | Smallest defined eccentricity. |
//! | diameter       | Largest defined eccentricity. |
//! | center         | Vertices whose eccentricity equals the radius, in id order. |
//!
//! The trivial distance `v → v` is not considered. In directed graphs the
//! measures follow edge direction, so a sink has undefined eccentricity and
//! does not take part in radius/diameter. If no vertex has a defined
//! eccentricity, radius and diameter are undefined and the center is empty.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::graph::{Graph, VertexId, Weight};
use crate::probe::{NoProbe, Probe};
use crate::shortest::all_pairs::{DistanceMatrix, all_pairs_with_probe};

/// Per-vertex eccentricities plus the graph-level aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EccentricityReport {
    eccentricity: Vec<Option<Weight>>,
    radius: Option<Weight>,
    diameter: Option<Weight>,
    central_vertices: Vec<VertexId>,
}

impl EccentricityReport {
    /// Derive the report from an already computed distance matrix.
    #[must_use]
    pub fn from_matrix(matrix: &DistanceMatrix) -> Self {
        let eccentricity: Vec<Option<Weight>> = matrix
            .rows()
            .enumerate()
            .map(|(v, row)| {
                row.iter()
                    .enumerate()
                    .filter(|&(w, _)| w != v)
                    .filter_map(|(_, d)| *d)
                    .max()
            })
            .collect();

        let radius = eccentricity.iter().flatten().copied().min();
        let diameter = eccentricity.iter().flatten().copied().max();

        let central_vertices = match radius {
            Some(r) => eccentricity
                .iter()
                .enumerate()
                .filter_map(|(v, e)| (*e == Some(r)).then_some(v))
                .collect(),
            None => Vec::new(),
        };

        Self {
            eccentricity,
            radius,
            diameter,
            central_vertices,
        }
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.eccentricity.len()
    }

    /// Eccentricity of `v`; `None` when undefined or `v` is not a vertex.
    #[must_use]
    pub fn eccentricity(&self, v: VertexId) -> Option<Weight> {
        self.eccentricity.get(v).copied().flatten()
    }

    /// All eccentricities in vertex order.
    #[must_use]
    pub fn eccentricities(&self) -> &[Option<Weight>] {
        &self.eccentricity
    }

    #[must_use]
    pub const fn radius(&self) -> Option<Weight> {
        self.radius
    }

    #[must_use]
    pub const fn diameter(&self) -> Option<Weight> {
        self.diameter
    }

    /// Central vertices in increasing id order.
    #[must_use]
    pub fn central_vertices(&self) -> &[VertexId] {
        &self.central_vertices
    }

    /// An owned copy of the central vertex set.
    #[must_use]
    pub fn central_vertex_set(&self) -> Vec<VertexId> {
        self.central_vertices.clone()
    }

    #[must_use]
    pub fn is_central(&self, v: VertexId) -> bool {
        self.central_vertices.binary_search(&v).is_ok()
    }
}

/// Compute the eccentricity report of `graph`.
///
/// # Errors
///
/// Propagates every error of
/// [`all_pairs_shortest_distances`](crate::shortest::all_pairs::all_pairs_shortest_distances),
/// a negative cycle in particular.
pub fn eccentricity_report(graph: &Graph) -> Result<EccentricityReport> {
    eccentricity_with_probe(graph, &mut NoProbe)
}

/// [`eccentricity_report`] reporting every run to `probe`.
///
/// # Errors
///
/// See [`eccentricity_report`].
#[instrument(skip(graph, probe), fields(vertices = graph.vertex_count()))]
pub fn eccentricity_with_probe(graph: &Graph, probe: &mut dyn Probe) -> Result<EccentricityReport> {
    let matrix = all_pairs_with_probe(graph, probe)?;
    let report = EccentricityReport::from_matrix(&matrix);
    debug!(
        radius = ?report.radius,
        diameter = ?report.diameter,
        central = report.central_vertices.len(),
        "eccentricity measures computed"
    );
    Ok(report)
}
