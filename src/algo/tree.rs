use super::*;

/// One vertex of a [`Tree`]: its parent and the cost attached to the link.
///
/// For a [`TreeKind::MinimumSpanning`] tree the cost is the cost of the edge to the parent, for
/// a [`TreeKind::ShortestPath`] tree it is the cumulative path cost from the root.
/// Unreached vertices carry [`INFINITY_COST`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub parent: Node,
    pub cost: Cost,
}

impl TreeEntry {
    /// Returns *true* if the entry was reached from the root
    pub fn is_reached(&self) -> bool {
        self.cost < INFINITY_COST
    }
}

/// Meaning of the costs stored in a [`Tree`]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TreeKind {
    /// Costs are edge costs to the parent
    MinimumSpanning,
    /// Costs are path costs from the root
    ShortestPath,
}

/// A rooted tree over the vertices of a graph, stored as one [`TreeEntry`] per vertex.
///
/// The root is the only vertex that is its own parent; its cost is `0`. Every other vertex either
/// is reached with a finite cost or is unreached with [`INFINITY_COST`] (if the graph is not
/// connected from the root). The tree borrows the graph it was built from.
#[derive(Clone)]
pub struct Tree<'a, G> {
    graph: &'a G,
    kind: TreeKind,
    entries: Vec<TreeEntry>,
}

impl<'a, G> Tree<'a, G>
where
    G: GraphNodeOrder,
{
    /// Creates a tree in which only `root` is reached.
    /// ** Panics if `root >= n` **
    pub fn new(graph: &'a G, kind: TreeKind, root: Node) -> Self {
        assert!(
            root < graph.number_of_nodes(),
            "Root {root} out of range for a graph with {} nodes",
            graph.number_of_nodes()
        );

        let mut entries = vec![
            TreeEntry {
                parent: root,
                cost: INFINITY_COST,
            };
            graph.len()
        ];
        entries[root as usize].cost = 0;

        Self {
            graph,
            kind,
            entries,
        }
    }

    /// The graph the tree was built from
    pub fn graph(&self) -> &'a G {
        self.graph
    }

    /// Whether this is a spanning or a shortest-path tree
    pub fn kind(&self) -> TreeKind {
        self.kind
    }

    /// Number of entries, i.e. the number of nodes of the graph
    pub fn number_of_nodes(&self) -> NumNodes {
        self.entries.len() as NumNodes
    }

    /// Returns the unique vertex that is its own parent.
    /// ** Panics if the tree has no root **
    pub fn root(&self) -> Node {
        self.entries
            .iter()
            .enumerate()
            .find_map(|(u, e)| (e.parent == u as Node).then_some(u as Node))
            .expect("Tree without root")
    }

    /// Returns the entry of `u`
    /// ** Panics if `u >= n` **
    pub fn entry(&self, u: Node) -> TreeEntry {
        self.entries[u as usize]
    }

    /// Returns the parent of `u` if `u` is reached
    pub fn parent_of(&self, u: Node) -> Option<Node> {
        let e = self.entry(u);
        e.is_reached().then_some(e.parent)
    }

    /// Returns the cost of `u` or [`INFINITY_COST`] if `u` is unreached
    pub fn cost_of(&self, u: Node) -> Cost {
        self.entry(u).cost
    }

    /// Returns *true* if `u` was reached from the root
    pub fn is_reached(&self, u: Node) -> bool {
        self.entry(u).is_reached()
    }

    /// Number of reached vertices including the root
    pub fn number_of_reached(&self) -> NumNodes {
        self.entries.iter().filter(|e| e.is_reached()).count() as NumNodes
    }

    /// Sum of all finite costs.
    ///
    /// For a spanning tree this is the weight of the tree, for a shortest-path tree the sum of
    /// path costs to all reached vertices.
    pub fn total_cost(&self) -> u64 {
        self.entries
            .iter()
            .filter(|e| e.is_reached())
            .map(|e| e.cost as u64)
            .sum()
    }

    /// All entries indexed by vertex id
    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    /// Iterates over all `(vertex, entry)` pairs by vertex id, including unreached vertices
    pub fn iter(&self) -> impl Iterator<Item = (Node, TreeEntry)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(u, &e)| (u as Node, e))
    }

    /// Iterates over `(Edge(vertex, parent), cost)` of all reached non-root vertices
    pub fn edges(&self) -> impl Iterator<Item = WeightedEdge> + '_ {
        self.iter()
            .filter(|&(u, e)| e.is_reached() && e.parent != u)
            .map(|(u, e)| (Edge(u, e.parent), e.cost))
    }

    /// Overwrites the entry of `u`
    /// ** Panics if `u >= n` **
    pub(crate) fn set(&mut self, u: Node, entry: TreeEntry) {
        self.entries[u as usize] = entry;
    }
}

impl<G> std::fmt::Debug for Tree<'_, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tree")
            .field("kind", &self.kind)
            .field("entries", &self.entries)
            .finish()
    }
}
