/*!
# Graph Operations

Traits describing what algorithms may ask of a graph. [`Graph`](crate::repr::Graph) and
[`AttrGraph`](crate::repr::AttrGraph) implement all of them; algorithms are written against
the traits only.
*/

use std::ops::Range;

use crate::{bitset::BitSet, *};

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns the range of all vertices.
    ///
    /// The range does not borrow `self` and may be used while mutating the graph.
    fn vertices(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns empty bitset with one entry per node
    fn vertex_bitset_unset(&self) -> BitSet {
        BitSet::new(self.len())
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph.
    /// Undirected edges are counted once.
    fn number_of_edges(&self) -> NumEdges;

    /// Returns *true* if the graph has no edges
    fn is_singleton(&self) -> bool {
        self.number_of_edges() == 0
    }
}

/// Edge orientation of a graph, fixed at construction
pub trait GraphType {
    /// Returns the edge type of the graph
    fn edge_type(&self) -> EdgeType;

    /// Returns *true* if the graph is directed
    fn is_directed(&self) -> bool {
        self.edge_type().is_directed()
    }

    /// Returns *true* if the graph is undirected
    fn is_undirected(&self) -> bool {
        !self.is_directed()
    }
}

/// Lazy neighborhood access by probing the adjacency structure.
///
/// Neighbors are always reported in ascending order.
pub trait AdjacencyProbe: GraphNodeOrder {
    /// Returns the smallest neighbor `v >= lb` of `u` if it exists.
    /// ** Panics if `u >= n` **
    fn next_neighbor(&self, u: Node, lb: Node) -> Option<Node>;

    /// Returns *true* if `Edge(u, v)` exists.
    /// ** Panics if `u >= n || v >= n` **
    fn has_edge(&self, u: Node, v: Node) -> bool;

    /// Returns an iterator over the (out-)neighbors of `u` in ascending order.
    /// ** Panics if `u >= n` **
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        let mut lb = 0;
        std::iter::from_fn(move || {
            let v = self.next_neighbor(u, lb)?;
            lb = v + 1;
            Some(v)
        })
    }

    /// Returns the number of (out-)neighbors of `u`
    /// ** Panics if `u >= n` **
    fn degree_of(&self, u: Node) -> NumNodes {
        self.neighbors_of(u).count() as NumNodes
    }
}

/// Access to edge costs
pub trait EdgeCosts: GraphType {
    /// Returns the cost stored for `Edge(u, v)` if the edge exists.
    /// For undirected graphs, `u` and `v` may be given in either order.
    fn edge_cost(&self, u: Node, v: Node) -> Option<Cost>;

    /// Returns the cost of `Edge(u, v)` or [`INFINITY_COST`] if it does not exist
    fn get_edge_value(&self, u: Node, v: Node) -> Cost {
        self.edge_cost(u, v).unwrap_or(INFINITY_COST)
    }

    /// Returns all stored edges with their cost, sorted by edge.
    /// Undirected edges are reported once in normalized form.
    fn edges(&self) -> impl Iterator<Item = WeightedEdge> + '_;

    /// Sum of all stored edge costs
    fn total_edge_cost(&self) -> u64 {
        self.edges().map(|(_, c)| c as u64).sum()
    }
}

/// Mutating edges of a graph with a fixed number of nodes
pub trait GraphEdgeEditing {
    /// Adds `Edge(u, v)` with the given cost. Re-adding an existing edge overwrites its cost.
    /// ** Panics if `u >= n || v >= n`, if `u == v` or if the cost is not in `[MIN_COST, INFINITY_COST)` **
    fn add_edge(&mut self, u: Node, v: Node, cost: Cost);

    /// Adds `Edge(u, v)` with cost [`MIN_COST`]
    fn add_unit_edge(&mut self, u: Node, v: Node) {
        self.add_edge(u, v, MIN_COST);
    }

    /// Adds all edges of the iterator
    fn add_edges(&mut self, edges: impl IntoIterator<Item = WeightedEdge>) {
        for (Edge(u, v), cost) in edges {
            self.add_edge(u, v, cost);
        }
    }

    /// Removes `Edge(u, v)` and returns *true* if it existed
    /// ** Panics if `u >= n || v >= n` **
    fn del_edge(&mut self, u: Node, v: Node) -> bool;

    /// Updates the cost of an existing `Edge(u, v)` and returns *true* on success.
    /// Does nothing if the edge does not exist.
    fn set_edge_value(&mut self, u: Node, v: Node, cost: Cost) -> bool;
}
