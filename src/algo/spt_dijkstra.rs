use tracing::debug;

use super::*;

/// Shortest-path tree computed by Dijkstra's algorithm.
///
/// Each tree entry holds the cumulative path cost from the root. The tree can be recomputed from
/// another root on the same graph, replacing the previous result; every path-cost query below
/// does so and therefore costs a full run of Dijkstra.
pub struct SptDijkstra<'a, G> {
    tree: Tree<'a, G>,
}

impl<'a, G> SptDijkstra<'a, G>
where
    G: AdjacencyProbe + EdgeCosts + GraphEdgeOrder,
{
    /// Runs Dijkstra's algorithm from vertex `0`
    pub fn new(graph: &'a G) -> Self {
        Self::with_root(graph, 0)
    }

    /// Runs Dijkstra's algorithm from `root`.
    /// ** Panics if `root >= n` **
    pub fn with_root(graph: &'a G, root: Node) -> Self {
        Self {
            tree: grow_tree(graph, root, TreeKind::ShortestPath),
        }
    }

    /// Same as [`SptDijkstra::with_root`] but reports an out-of-range root as an error
    pub fn try_with_root(graph: &'a G, root: Node) -> Result<Self, GraphError> {
        let n = graph.number_of_nodes();
        if root >= n {
            return Err(GraphError::VertexOutOfRange { vertex: root, n });
        }
        Ok(Self::with_root(graph, root))
    }

    /// Recomputes the tree from `root`, overwriting the previous result.
    /// ** Panics if `root >= n` **
    pub fn run(&mut self, root: Node) {
        self.tree = grow_tree(self.tree.graph(), root, TreeKind::ShortestPath);
    }

    /// Root of the current tree
    pub fn root(&self) -> Node {
        self.tree.root()
    }

    /// The tree of the last run
    pub fn tree(&self) -> &Tree<'a, G> {
        &self.tree
    }

    /// Consumes the algorithm and returns the tree of the last run
    pub fn into_tree(self) -> Tree<'a, G> {
        self.tree
    }

    /// Cost of a cheapest path from `src` to `dst` or [`INFINITY_COST`] if `dst` is unreachable.
    /// Recomputes the tree from `src`.
    /// ** Panics if `src >= n || dst >= n` **
    pub fn path_cost(&mut self, src: Node, dst: Node) -> Cost {
        self.run(src);
        self.tree.cost_of(dst)
    }

    /// Mean path cost from `v` to all other vertices reachable from `v`.
    /// Recomputes the tree from `v`.
    ///
    /// If no other vertex is reachable, returns [`INFINITY_COST`].
    /// ** Panics if `v >= n` **
    pub fn average_path_cost_from(&mut self, v: Node) -> f64 {
        self.run(v);
        let (sum, count) = self.reached_path_costs();
        Self::average(sum, count)
    }

    /// Mean path cost over all ordered pairs `(u, v)` with `u != v` and `v` reachable from `u`.
    /// Recomputes the tree from every vertex; the last root remains.
    ///
    /// If no such pair exists, returns [`INFINITY_COST`].
    pub fn average_path_cost_all(&mut self) -> f64 {
        let mut sum = 0u64;
        let mut count = 0u64;
        for u in self.tree.graph().vertices() {
            self.run(u);
            let (s, c) = self.reached_path_costs();
            sum += s;
            count += c;
        }

        debug!(pairs = count, total = sum, "averaged path costs");
        Self::average(sum, count)
    }

    /// Sum and number of path costs to all reached vertices except the root
    fn reached_path_costs(&self) -> (u64, u64) {
        self.tree
            .edges()
            .fold((0, 0), |(sum, count), (_, cost)| (sum + cost as u64, count + 1))
    }

    fn average(sum: u64, count: u64) -> f64 {
        if count == 0 {
            INFINITY_COST as f64
        } else {
            sum as f64 / count as f64
        }
    }
}

/// Dijkstra's algorithm as a method on the graph itself
pub trait ShortestPathTree: AdjacencyProbe + EdgeCosts + GraphEdgeOrder + Sized {
    /// Computes a shortest-path tree rooted at `root`.
    /// Each tree entry holds the path cost from the root.
    /// ** Panics if `root >= n` **
    fn spt_dijkstra(&self, root: Node) -> Tree<'_, Self> {
        SptDijkstra::with_root(self, root).into_tree()
    }
}

impl<G> ShortestPathTree for G where G: AdjacencyProbe + EdgeCosts + GraphEdgeOrder {}
