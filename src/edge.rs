/*!
# Edges and Costs

An [`Edge`] is a plain pair of endpoints; whether it is directed depends on the
[`EdgeType`] of the graph storing it. Every stored edge carries a positive integral
[`Cost`]. [`INFINITY_COST`] is larger than every legal cost and is returned for
missing edges and unreachable vertices.
*/

use std::fmt::{Debug, Display};

use crate::Node;

/// An edge is defined by two nodes/endpoints.
/// Is is up to the graph whether an Edge is directed or not.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(pub Node, pub Node);

/// Number of edges of a graph. At most `MAX_NODES^2` which easily fits.
pub type NumEdges = u32;

/// Edge costs are positive integers
pub type Cost = u32;

/// Sentinel for "no edge" / "unreachable"; strictly greater than every legal cost
pub const INFINITY_COST: Cost = i32::MAX as Cost;

/// Smallest legal edge cost
pub const MIN_COST: Cost = 1;

/// An edge together with its cost
pub type WeightedEdge = (Edge, Cost);

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Edge {
    /// Normalizes the edge such that the endpoint with smaller value comes first
    pub fn normalized(&self) -> Self {
        Edge(self.0.min(self.1), self.0.max(self.1))
    }

    /// Returns true if the endpoint with smaller index comes first
    pub fn is_normalized(&self) -> bool {
        self.0 <= self.1
    }

    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    /// Reverses the edge by switching the endpoints
    pub fn reverse(&self) -> Self {
        Edge(self.1, self.0)
    }

    /// Returns the endpoint opposite to `u`.
    /// ** Panics if `u` is not an endpoint **
    pub fn other(&self, u: Node) -> Node {
        if self.0 == u {
            self.1
        } else {
            assert_eq!(self.1, u, "Node {u} is not an endpoint of {self}");
            self.0
        }
    }
}

/// Whether edges of a graph have an orientation
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum EdgeType {
    /// `Edge(u, v)` and `Edge(v, u)` are the same edge, stored as `Edge(min, max)`
    #[default]
    Undirected,
    /// `Edge(u, v)` only connects `u` to `v`
    Directed,
}

impl EdgeType {
    /// Returns *true* if the edge type is directed
    pub fn is_directed(&self) -> bool {
        matches!(self, EdgeType::Directed)
    }

    /// Maps an edge onto the key it is stored under: normalized for undirected graphs
    pub fn canonical(&self, edge: Edge) -> Edge {
        match self {
            EdgeType::Undirected => edge.normalized(),
            EdgeType::Directed => edge,
        }
    }

    /// Single character tag used in text headers
    pub fn tag(&self) -> char {
        match self {
            EdgeType::Undirected => 'U',
            EdgeType::Directed => 'D',
        }
    }
}
