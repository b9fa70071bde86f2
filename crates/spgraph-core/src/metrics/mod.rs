//! Graph-level measures derived from shortest paths.
//!
//! - **Eccentricity** (`eccentricity`): per-vertex eccentricity, radius,
//!   diameter and the set of central vertices, from the all-pairs matrix.
//! - **Transitive closure** (`closure`): the reachability graph of a
//!   directed, unweighted graph.
//!
//! Both are strict aggregators: the first failing single-source run aborts
//! the computation and its error is returned unchanged.

pub mod closure;
pub mod eccentricity;

pub use closure::{transitive_closure, transitive_closure_with_probe};
pub use eccentricity::{EccentricityReport, eccentricity_report, eccentricity_with_probe};
