use super::*;

/// An undirected [`Graph`] with one attribute per vertex.
///
/// Adjacency probing only reports neighbors whose attribute equals the attribute of the probed
/// vertex. Every traversal over an `AttrGraph` therefore stays within the region of equally
/// attributed vertices it was seeded in, e.g. the cells owned by one player on a game board.
/// Edge costs are not filtered.
///
/// The attribute vector can be saved and restored to explore speculative changes without
/// rebuilding the graph.
#[derive(Debug, Clone)]
pub struct AttrGraph<A> {
    graph: Graph,
    attrs: Vec<A>,
    saved: Vec<A>,
}

impl<A> AttrGraph<A>
where
    A: Copy + Eq,
{
    /// Creates an undirected graph of `n` nodes without edges, every node carrying `attr`
    ///
    /// # Errors
    /// Fails if `n == 0` or `n > MAX_NODES`.
    pub fn new(n: NumNodes, attr: A) -> Result<Self, GraphError> {
        let graph = Graph::undirected(n)?;
        Ok(Self {
            graph,
            attrs: vec![attr; n as usize],
            saved: Vec::new(),
        })
    }

    /// Returns the underlying graph without attribute filtering
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Returns the attribute of `u`
    /// ** Panics if `u >= n` **
    pub fn get_attr(&self, u: Node) -> A {
        self.attrs[u as usize]
    }

    /// Updates the attribute of `u`
    /// ** Panics if `u >= n` **
    pub fn set_attr(&mut self, u: Node, attr: A) {
        self.attrs[u as usize] = attr;
    }

    /// Iterates over all attributes by node id
    pub fn attrs(&self) -> impl Iterator<Item = A> + '_ {
        self.attrs.iter().copied()
    }

    /// Snapshots all attributes. A later snapshot replaces an earlier one.
    pub fn save_state(&mut self) {
        self.saved.clone_from(&self.attrs);
    }

    /// Restores the attributes of the last snapshot.
    /// ** Panics if no snapshot was taken **
    pub fn restore_state(&mut self) {
        assert_eq!(
            self.saved.len(),
            self.attrs.len(),
            "restore_state called without save_state"
        );
        self.attrs.clone_from(&self.saved);
    }
}

impl<A> GraphNodeOrder for AttrGraph<A> {
    fn number_of_nodes(&self) -> NumNodes {
        self.graph.number_of_nodes()
    }
}

impl<A> GraphEdgeOrder for AttrGraph<A> {
    fn number_of_edges(&self) -> NumEdges {
        self.graph.number_of_edges()
    }
}

impl<A> GraphType for AttrGraph<A> {
    fn edge_type(&self) -> EdgeType {
        self.graph.edge_type()
    }
}

impl<A> AdjacencyProbe for AttrGraph<A>
where
    A: Copy + Eq,
{
    fn next_neighbor(&self, u: Node, mut lb: Node) -> Option<Node> {
        let attr = self.get_attr(u);
        loop {
            let v = self.graph.next_neighbor(u, lb)?;
            if self.get_attr(v) == attr {
                return Some(v);
            }
            lb = v + 1;
        }
    }

    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.graph.has_edge(u, v)
    }
}

impl<A> EdgeCosts for AttrGraph<A> {
    fn edge_cost(&self, u: Node, v: Node) -> Option<Cost> {
        self.graph.edge_cost(u, v)
    }

    fn edges(&self) -> impl Iterator<Item = WeightedEdge> + '_ {
        self.graph.edges()
    }
}

impl<A> GraphEdgeEditing for AttrGraph<A> {
    fn add_edge(&mut self, u: Node, v: Node, cost: Cost) {
        self.graph.add_edge(u, v, cost);
    }

    fn del_edge(&mut self, u: Node, v: Node) -> bool {
        self.graph.del_edge(u, v)
    }

    fn set_edge_value(&mut self, u: Node, v: Node, cost: Cost) -> bool {
        self.graph.set_edge_value(u, v, cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn path(n: NumNodes) -> AttrGraph<u8> {
        let mut graph = AttrGraph::new(n, 0).unwrap();
        for u in 1..n {
            graph.add_unit_edge(u - 1, u);
        }
        graph
    }

    #[test]
    fn neighbors_share_attribute() {
        let mut graph = path(5);
        graph.set_attr(2, 1);

        assert_eq!(graph.neighbors_of(1).collect_vec(), vec![0]);
        assert_eq!(graph.neighbors_of(2).collect_vec(), Vec::<Node>::new());
        assert_eq!(graph.neighbors_of(3).collect_vec(), vec![4]);

        graph.set_attr(1, 1);
        graph.set_attr(3, 1);
        assert_eq!(graph.neighbors_of(2).collect_vec(), vec![1, 3]);

        // costs are not filtered
        assert_eq!(graph.get_edge_value(0, 1), MIN_COST);
        assert_eq!(graph.graph().neighbors_of(1).collect_vec(), vec![0, 2]);
    }

    #[test]
    fn save_and_restore() {
        let mut graph = path(4);
        graph.set_attr(0, 2);
        graph.save_state();

        graph.set_attr(0, 5);
        graph.set_attr(3, 7);
        assert_eq!(graph.attrs().collect_vec(), vec![5, 0, 0, 7]);

        graph.restore_state();
        assert_eq!(graph.attrs().collect_vec(), vec![2, 0, 0, 0]);
        assert_eq!(graph.number_of_edges(), 3);
    }

    #[test]
    #[should_panic]
    fn restore_without_save() {
        let mut graph = path(3);
        graph.restore_state();
    }
}
