//! Errors raised while constructing graphs, generators and games from user-supplied
//! parameters. Parse errors of the text formats are reported as [`std::io::Error`]s by
//! the [`io`](crate::io) module instead.

use crate::prelude::*;

/// Construction-time failures
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The vertex count is zero
    #[error("A graph needs at least one vertex")]
    NoVertices,

    /// The vertex count exceeds [`MAX_NODES`]
    #[error("{0} vertices exceed the maximum of {max}", max = MAX_NODES)]
    TooManyVertices(NumNodes),

    /// A vertex id is not below the vertex count
    #[error("Vertex {vertex} out of range for a graph with {n} vertices")]
    VertexOutOfRange { vertex: Node, n: NumNodes },

    /// An edge starts and ends at the same vertex
    #[error("Self-loop ({0},{0}) is not allowed")]
    SelfLoop(Node),

    /// An edge cost lies outside `[MIN_COST, INFINITY_COST)`
    #[error("Cost {cost} of edge ({u},{v}) must satisfy {lo} <= cost < {hi}", lo = MIN_COST, hi = INFINITY_COST)]
    InvalidCost { u: Node, v: Node, cost: Cost },

    /// The edge density is not a probability
    #[error("Edge density {0} is not within [0, 1]")]
    InvalidDensity(f64),

    /// The cost range of a generator is empty or leaves the legal costs
    #[error("Cost range [{min}, {max}] must satisfy {lo} <= min <= max < {hi}", lo = MIN_COST, hi = INFINITY_COST)]
    InvalidCostRange { min: Cost, max: Cost },

    /// The Hex board dimension is outside the supported range
    #[error("Hex dimension {0} must be within [{min}, {max}]", min = crate::games::MIN_DIMENSION, max = crate::games::MAX_DIMENSION)]
    InvalidDimension(u32),

    /// Reading or writing failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<GraphError> for std::io::Error {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::Io(err) => err,
            other => std::io::Error::new(std::io::ErrorKind::InvalidData, other),
        }
    }
}

/// Checks a vertex count against `1..=MAX_NODES`
pub fn check_num_nodes(n: NumNodes) -> Result<(), GraphError> {
    if n == 0 {
        Err(GraphError::NoVertices)
    } else if n > MAX_NODES {
        Err(GraphError::TooManyVertices(n))
    } else {
        Ok(())
    }
}
