use fxhash::FxHashMap;
use itertools::Itertools;
use tracing::trace;

use super::*;

/// A graph with a fixed number of nodes and cost-weighted edges.
///
/// Edge presence is kept in an `n x n` adjacency bitmap, costs in a separate hash map keyed by
/// the canonical edge. For undirected graphs both bits `(u, v)` and `(v, u)` are set while only
/// `Edge(min, max)` has a cost entry.
#[derive(Clone)]
pub struct Graph {
    edge_type: EdgeType,
    n: NumNodes,
    costs: FxHashMap<Edge, Cost>,
    adjacency: BitSet,
}

impl Graph {
    /// Creates a graph with `n` nodes and no edges.
    ///
    /// # Errors
    /// Fails if `n == 0` or `n > MAX_NODES`.
    pub fn new(edge_type: EdgeType, n: NumNodes) -> Result<Self, GraphError> {
        check_num_nodes(n)?;
        Ok(Self {
            edge_type,
            n,
            costs: FxHashMap::default(),
            adjacency: BitSet::square(n),
        })
    }

    /// Shorthand for an undirected graph with `n` nodes
    pub fn undirected(n: NumNodes) -> Result<Self, GraphError> {
        Self::new(EdgeType::Undirected, n)
    }

    /// Shorthand for a directed graph with `n` nodes
    pub fn directed(n: NumNodes) -> Result<Self, GraphError> {
        Self::new(EdgeType::Directed, n)
    }

    /// Creates a graph with `n` nodes from a list of weighted edges
    ///
    /// # Errors
    /// Fails if `n` is out of range, an edge references a node `>= n`, an edge is a self-loop
    /// or its cost is not a legal edge cost.
    pub fn from_edges(
        edge_type: EdgeType,
        n: NumNodes,
        edges: impl IntoIterator<Item = WeightedEdge>,
    ) -> Result<Self, GraphError> {
        let mut graph = Self::new(edge_type, n)?;
        for (Edge(u, v), cost) in edges {
            if let Some(vertex) = [u, v].into_iter().find(|&x| x >= n) {
                return Err(GraphError::VertexOutOfRange { vertex, n });
            }
            if u == v {
                return Err(GraphError::SelfLoop(u));
            }
            if !(MIN_COST..INFINITY_COST).contains(&cost) {
                return Err(GraphError::InvalidCost { u, v, cost });
            }
            graph.add_edge(u, v, cost);
        }
        Ok(graph)
    }

    #[inline]
    fn bit(&self, u: Node, v: Node) -> usize {
        assert!(
            u < self.n && v < self.n,
            "Edge ({u},{v}) out of range for a graph with {} nodes",
            self.n
        );
        u as usize * self.n as usize + v as usize
    }
}

impl GraphNodeOrder for Graph {
    fn number_of_nodes(&self) -> NumNodes {
        self.n
    }
}

impl GraphEdgeOrder for Graph {
    fn number_of_edges(&self) -> NumEdges {
        self.costs.len() as NumEdges
    }
}

impl GraphType for Graph {
    fn edge_type(&self) -> EdgeType {
        self.edge_type
    }
}

impl AdjacencyProbe for Graph {
    fn next_neighbor(&self, u: Node, lb: Node) -> Option<Node> {
        assert!(u < self.n, "Node {u} out of range for a graph with {} nodes", self.n);
        if lb >= self.n {
            return None;
        }

        let row = u as usize * self.n as usize;
        self.adjacency
            .first_set_in(row + lb as usize..row + self.n as usize)
            .map(|idx| (idx - row) as Node)
    }

    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.adjacency.test(self.bit(u, v))
    }
}

impl EdgeCosts for Graph {
    fn edge_cost(&self, u: Node, v: Node) -> Option<Cost> {
        self.costs
            .get(&self.edge_type.canonical(Edge(u, v)))
            .copied()
    }

    fn edges(&self) -> impl Iterator<Item = WeightedEdge> + '_ {
        self.costs.iter().map(|(&e, &c)| (e, c)).sorted_unstable()
    }
}

impl GraphEdgeEditing for Graph {
    fn add_edge(&mut self, u: Node, v: Node, cost: Cost) {
        assert!(u != v, "Self-loop ({u},{u}) is not allowed");
        assert!(
            (MIN_COST..INFINITY_COST).contains(&cost),
            "Cost {cost} of edge ({u},{v}) is not a legal edge cost"
        );

        let bit = self.bit(u, v);
        self.adjacency.set(bit);
        if self.edge_type == EdgeType::Undirected {
            let bit = self.bit(v, u);
            self.adjacency.set(bit);
        }

        trace!(u, v, cost, "add edge");
        self.costs.insert(self.edge_type.canonical(Edge(u, v)), cost);
    }

    fn del_edge(&mut self, u: Node, v: Node) -> bool {
        let bit = self.bit(u, v);
        if !self.adjacency.clear(bit) {
            return false;
        }
        if self.edge_type == EdgeType::Undirected {
            let bit = self.bit(v, u);
            self.adjacency.clear(bit);
        }

        self.costs.remove(&self.edge_type.canonical(Edge(u, v)));
        true
    }

    fn set_edge_value(&mut self, u: Node, v: Node, cost: Cost) -> bool {
        if !self.has_edge(u, v) {
            return false;
        }
        assert!(
            (MIN_COST..INFINITY_COST).contains(&cost),
            "Cost {cost} of edge ({u},{v}) is not a legal edge cost"
        );

        self.costs.insert(self.edge_type.canonical(Edge(u, v)), cost);
        true
    }
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("edge_type", &self.edge_type)
            .field("n", &self.n)
            .field("edges", &self.edges().collect_vec())
            .finish()
    }
}

crate::testing::test_graph_ops!(test_undirected_graph, EdgeType::Undirected);
crate::testing::test_graph_ops!(test_directed_graph, EdgeType::Directed);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_count_bounds() {
        assert!(matches!(Graph::undirected(0), Err(GraphError::NoVertices)));
        assert!(matches!(
            Graph::directed(MAX_NODES + 1),
            Err(GraphError::TooManyVertices(_))
        ));
        assert_eq!(Graph::undirected(MAX_NODES).unwrap().number_of_nodes(), MAX_NODES);
    }

    #[test]
    fn undirected_symmetry() {
        let mut graph = Graph::undirected(5).unwrap();
        graph.add_edge(3, 1, 7);

        assert_eq!(graph.get_edge_value(1, 3), 7);
        assert_eq!(graph.get_edge_value(3, 1), 7);
        assert!(graph.has_edge(1, 3) && graph.has_edge(3, 1));
        assert_eq!(graph.number_of_edges(), 1);
        assert_eq!(graph.edges().collect_vec(), vec![(Edge(1, 3), 7)]);

        assert!(graph.set_edge_value(1, 3, 2));
        assert_eq!(graph.get_edge_value(3, 1), 2);

        assert!(graph.del_edge(1, 3));
        assert!(!graph.has_edge(3, 1));
        assert_eq!(graph.get_edge_value(3, 1), INFINITY_COST);
        assert_eq!(graph.number_of_edges(), 0);
    }

    #[test]
    fn directed_asymmetry() {
        let mut graph = Graph::directed(5).unwrap();
        graph.add_edge(3, 1, 7);

        assert_eq!(graph.get_edge_value(3, 1), 7);
        assert_eq!(graph.get_edge_value(1, 3), INFINITY_COST);
        assert!(!graph.set_edge_value(1, 3, 4));
        assert!(!graph.del_edge(1, 3));

        graph.add_edge(1, 3, 4);
        assert_eq!(graph.number_of_edges(), 2);
        assert_eq!(graph.neighbors_of(1).collect_vec(), vec![3]);
        assert_eq!(graph.neighbors_of(3).collect_vec(), vec![1]);
    }

    #[test]
    fn readding_overwrites_cost() {
        let mut graph = Graph::undirected(3).unwrap();
        graph.add_edge(0, 2, 5);
        graph.add_edge(2, 0, 9);

        assert_eq!(graph.number_of_edges(), 1);
        assert_eq!(graph.get_edge_value(0, 2), 9);
    }

    #[test]
    fn set_value_of_missing_edge_is_noop() {
        let mut graph = Graph::undirected(3).unwrap();
        assert!(!graph.set_edge_value(0, 1, 3));
        assert_eq!(graph.number_of_edges(), 0);
        assert!(!graph.has_edge(0, 1));
    }

    #[test]
    fn from_edges_checks_range() {
        let edges = [(Edge(0, 1), 1), (Edge(1, 4), 2)];
        assert!(matches!(
            Graph::from_edges(EdgeType::Undirected, 4, edges),
            Err(GraphError::VertexOutOfRange { vertex: 4, n: 4 })
        ));
    }

    #[test]
    fn from_edges_checks_edges() {
        assert!(matches!(
            Graph::from_edges(EdgeType::Undirected, 3, [(Edge(0, 1), 0)]),
            Err(GraphError::InvalidCost { u: 0, v: 1, cost: 0 })
        ));
        assert!(matches!(
            Graph::from_edges(EdgeType::Directed, 3, [(Edge(1, 2), INFINITY_COST)]),
            Err(GraphError::InvalidCost { u: 1, v: 2, .. })
        ));
        assert!(matches!(
            Graph::from_edges(EdgeType::Undirected, 3, [(Edge(0, 1), 3), (Edge(2, 2), 1)]),
            Err(GraphError::SelfLoop(2))
        ));

        let graph = Graph::from_edges(
            EdgeType::Undirected,
            3,
            [(Edge(0, 1), MIN_COST), (Edge(1, 2), INFINITY_COST - 1)],
        )
        .unwrap();
        assert_eq!(graph.number_of_edges(), 2);
    }

    #[test]
    #[should_panic]
    fn self_loops_are_rejected() {
        let mut graph = Graph::undirected(3).unwrap();
        graph.add_edge(1, 1, 1);
    }

    #[test]
    #[should_panic]
    fn zero_cost_is_rejected() {
        let mut graph = Graph::undirected(3).unwrap();
        graph.add_edge(0, 1, 0);
    }
}
