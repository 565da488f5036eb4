use thiserror::Error;

use crate::vertex::Cost;

/// Reason an edge mutation or a vertex-addressed query was refused.
///
/// Mutations report these as values, never as panics: the build step keeps
/// consuming input after a bad edge record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Index 0, a negative index, or an index past the declared vertex count.
    #[error("vertex {vertex} is out of range 1..={size}")]
    VertexOutOfRange { vertex: i64, size: usize },

    #[error("self-loop on vertex {vertex} is not allowed")]
    SelfLoop { vertex: usize },

    /// Matrix edges must carry a strictly positive cost.
    #[error("edge cost must be positive, got {cost}")]
    NonPositiveCost { cost: Cost },
}
