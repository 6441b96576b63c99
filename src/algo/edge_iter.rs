use super::*;

/// Lazily enumerates the edges leaving a vertex `u` together with their cost.
///
/// Each step probes the adjacency row of `u` for the next set bit at or after the current
/// position; nothing is materialized up front. Edges are yielded as `Edge(u, v)` in ascending
/// order of `v`. Once the row is exhausted the position rests on [`INVALID_NODE`].
///
/// Mutating the graph while an iterator is alive is prevented by the shared borrow.
pub struct EdgeIter<'a, G> {
    graph: &'a G,
    u: Node,
    pos: Node,
}

impl<'a, G> EdgeIter<'a, G>
where
    G: AdjacencyProbe + EdgeCosts,
{
    /// Creates an iterator over all edges leaving `u`.
    /// ** Panics if `u >= n` **
    pub fn new(graph: &'a G, u: Node) -> Self {
        Self::starting_at(graph, u, 0)
    }

    /// Creates an iterator over all edges `Edge(u, v)` with `v >= start`.
    /// ** Panics if `u >= n` **
    pub fn starting_at(graph: &'a G, u: Node, start: Node) -> Self {
        assert!(
            u < graph.number_of_nodes(),
            "Node {u} out of range for a graph with {} nodes",
            graph.number_of_nodes()
        );

        let mut iter = Self {
            graph,
            u,
            pos: INVALID_NODE,
        };
        iter.seek(start);
        iter
    }

    /// Same as [`EdgeIter::new`] but reports an out-of-range `u` as an error
    pub fn try_new(graph: &'a G, u: Node) -> Result<Self, GraphError> {
        let n = graph.number_of_nodes();
        if u >= n {
            return Err(GraphError::VertexOutOfRange { vertex: u, n });
        }
        Ok(Self::new(graph, u))
    }

    fn seek(&mut self, lb: Node) {
        self.pos = self.graph.next_neighbor(self.u, lb).unwrap_or(INVALID_NODE);
    }

    /// The vertex whose edges are enumerated
    pub fn source(&self) -> Node {
        self.u
    }

    /// Returns *true* once all edges were enumerated
    pub fn is_end(&self) -> bool {
        self.pos == INVALID_NODE
    }

    /// Returns the edge at the current position without advancing.
    /// ** Panics if the adjacency bit at the position has no cost entry **
    pub fn current(&self) -> Option<WeightedEdge> {
        if self.is_end() {
            return None;
        }

        let (u, v) = (self.u, self.pos);
        let cost = self
            .graph
            .edge_cost(u, v)
            .unwrap_or_else(|| panic!("Adjacency bit ({u},{v}) is set without a cost entry"));
        Some((Edge(u, v), cost))
    }
}

impl<G> Iterator for EdgeIter<'_, G>
where
    G: AdjacencyProbe + EdgeCosts,
{
    type Item = WeightedEdge;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.current()?;
        self.seek(self.pos + 1);
        Some(item)
    }
}

impl<G> std::iter::FusedIterator for EdgeIter<'_, G> where G: AdjacencyProbe + EdgeCosts {}

/// Edge iteration as methods on the graph itself
pub trait EdgeIteration: AdjacencyProbe + EdgeCosts + Sized {
    /// Returns an [`EdgeIter`] over all edges leaving `u`.
    /// ** Panics if `u >= n` **
    fn edges_of(&self, u: Node) -> EdgeIter<'_, Self> {
        EdgeIter::new(self, u)
    }
}

impl<G> EdgeIteration for G where G: AdjacencyProbe + EdgeCosts {}
