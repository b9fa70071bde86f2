use std::collections::TryReserveError;
use std::fmt;

use crate::graph::{VertexId, Weight};

/// Convenience alias used by every fallible operation in this crate.
pub type Result<T, E = GraphError> = std::result::Result<T, E>;

/// Coarse error classes for callers that branch on the failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    NegativeCycle,
    Allocation,
    Parse,
    Io,
}

impl ErrorKind {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidInput => "E1001",
            Self::NegativeCycle => "E2001",
            Self::Allocation => "E5001",
            Self::Parse => "E3001",
            Self::Io => "E5002",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InvalidInput => {
                Some("Check vertex ids, edge weights and the graph's directed/weighted flags.")
            }
            Self::NegativeCycle => {
                Some("Shortest paths are unbounded; remove or reweight the cycle's edges.")
            }
            Self::Allocation => Some("The graph is too large for the available memory."),
            Self::Parse => Some(
                "Expected `<directed> <weighted> <vertices> <edges>` followed by one edge per line.",
            ),
            Self::Io => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors from graph construction and shortest-path analyses.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// A vertex id is not in `[0, vertex_count)`.
    #[error("vertex {vertex} is out of range for a graph with {vertex_count} vertices")]
    VertexOutOfRange {
        vertex: VertexId,
        vertex_count: usize,
    },

    /// Self-loops are never stored.
    #[error("self-loop on vertex {vertex} is not allowed")]
    SelfLoop { vertex: VertexId },

    /// An explicit weight was supplied for an unweighted graph, or vice versa.
    #[error("{operation} requires a {expected} graph")]
    WeightMismatch {
        operation: &'static str,
        expected: &'static str,
    },

    /// Transitive closure only accepts directed graphs.
    #[error("transitive closure requires a directed graph")]
    NotDirected,

    /// Transitive closure only accepts unweighted graphs.
    #[error("transitive closure requires an unweighted graph")]
    Weighted,

    /// A structural invariant of the adjacency storage does not hold.
    #[error("graph invariant violated: {0}")]
    Invariant(String),

    /// A negative-weight cycle is reachable from `start`.
    #[error("negative-weight cycle reachable from vertex {start}")]
    NegativeCycle { start: VertexId },

    /// A shortest distance exists but does not fit in a [`Weight`].
    #[error("shortest distance from vertex {start} to vertex {vertex} is {distance}, outside the 64-bit weight range")]
    DistanceOverflow {
        start: VertexId,
        vertex: VertexId,
        distance: i128,
    },

    /// Result storage could not be reserved.
    #[error("failed to allocate {what} for {len} entries")]
    Allocation {
        what: &'static str,
        len: usize,
        #[source]
        source: TryReserveError,
    },

    /// A graph description could not be parsed.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Reading a graph description failed.
    #[error("failed to read graph description: {0}")]
    Io(#[from] std::io::Error),
}

impl GraphError {
    /// The taxonomy class of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::VertexOutOfRange { .. }
            | Self::SelfLoop { .. }
            | Self::WeightMismatch { .. }
            | Self::NotDirected
            | Self::Weighted
            | Self::Invariant(_)
            | Self::DistanceOverflow { .. } => ErrorKind::InvalidInput,
            Self::NegativeCycle { .. } => ErrorKind::NegativeCycle,
            Self::Allocation { .. } => ErrorKind::Allocation,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Check that `vertex` indexes a graph of `vertex_count` vertices.
pub(crate) fn check_vertex(vertex: VertexId, vertex_count: usize) -> Result<()> {
    if vertex < vertex_count {
        Ok(())
    } else {
        Err(GraphError::VertexOutOfRange {
            vertex,
            vertex_count,
        })
    }
}

/// Allocate a `Vec` of `len` copies of `value`, reporting allocation failure
/// as [`GraphError::Allocation`] instead of aborting.
pub(crate) fn try_filled<T: Clone>(what: &'static str, len: usize, value: T) -> Result<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|source| GraphError::Allocation { what, len, source })?;
    buf.resize(len, value);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorKind::InvalidInput,
            ErrorKind::NegativeCycle,
            ErrorKind::Allocation,
            ErrorKind::Parse,
            ErrorKind::Io,
        ];

        let mut seen = HashSet::new();
        for kind in all {
            assert!(seen.insert(kind.code()), "duplicate code {}", kind.code());
        }
    }

    #[test]
    fn closure_preconditions_are_invalid_input() {
        assert_eq!(GraphError::NotDirected.kind(), ErrorKind::InvalidInput);
        assert_eq!(GraphError::Weighted.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            GraphError::NegativeCycle { start: 0 }.kind(),
            ErrorKind::NegativeCycle
        );
    }

    #[test]
    fn distance_overflow_is_invalid_input() {
        let err = GraphError::DistanceOverflow {
            start: 0,
            vertex: 2,
            distance: i128::from(Weight::MIN) - 4,
        };
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.to_string().contains("-9223372036854775812"), "{err}");
    }

    #[test]
    fn out_of_range_vertex_is_rejected() {
        assert!(check_vertex(2, 3).is_ok());
        let err = check_vertex(3, 3).unwrap_err();
        assert_eq!(
            err.to_string(),
            "vertex 3 is out of range for a graph with 3 vertices"
        );
    }

    #[test]
    fn oversized_allocation_is_reported() {
        let err = try_filled("distances", usize::MAX, 0_i64).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Allocation);
    }

    #[test]
    fn filled_buffer_has_requested_len() {
        let buf = try_filled("flags", 4, false).expect("small allocation");
        assert_eq!(buf, vec![false; 4]);
    }
}
