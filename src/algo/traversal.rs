/*!
Graph traversal: breadth-first and depth-first search as lazy iterators.

A traversal keeps a *frontier* of discovered but not yet yielded nodes and a visited-bitmap.
Both searches share one implementation, [`VertexIter`]; only the frontier differs:

- [`VecDeque`] -> queue semantics -> **BFS**
- [`Vec`] -> stack semantics -> **DFS**
- [`Frontier`] -> either, selected at runtime by a [`TraversalOrder`]

Traversals may start from several seed nodes at once. Every node is yielded at most once;
the total work is `O(n + m)`.
*/

use super::*;
use std::collections::VecDeque;

/// Abstraction for the traversal frontier data structure.
///
/// A `NodeSequencer` is responsible for storing the "to be visited"
/// nodes during a traversal. Different implementations determine
/// the traversal order.
pub trait NodeSequencer<T> {
    /// Pushes a node into the frontier.
    fn push(&mut self, item: T);

    /// Removes and returns the next node from the frontier.
    fn pop(&mut self) -> Option<T>;

    /// Returns a clone of the next node without removing it.
    fn peek(&self) -> Option<T>;

    /// Returns the number of items currently in the frontier.
    fn cardinality(&self) -> usize;
}

impl<T> NodeSequencer<T> for VecDeque<T>
where
    T: Clone,
{
    fn push(&mut self, u: T) {
        self.push_back(u)
    }
    fn pop(&mut self) -> Option<T> {
        self.pop_front()
    }
    fn peek(&self) -> Option<T> {
        self.front().cloned()
    }
    fn cardinality(&self) -> usize {
        self.len()
    }
}

impl<T> NodeSequencer<T> for Vec<T>
where
    T: Clone,
{
    fn push(&mut self, u: T) {
        self.push(u)
    }
    fn pop(&mut self) -> Option<T> {
        self.pop()
    }
    fn peek(&self) -> Option<T> {
        self.last().cloned()
    }
    fn cardinality(&self) -> usize {
        self.len()
    }
}

/// Order in which a [`VertexIter`] yields nodes
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    /// Breadth-first: nodes are yielded by increasing hop-distance from the seeds
    #[default]
    Bfs,
    /// Depth-first: the most recently discovered node is yielded next
    Dfs,
}

/// A frontier whose queue/stack semantics are chosen at runtime
#[derive(Debug, Clone)]
pub enum Frontier {
    Queue(VecDeque<Node>),
    Stack(Vec<Node>),
}

impl Frontier {
    /// Creates an empty frontier for the given order
    pub fn new(order: TraversalOrder) -> Self {
        match order {
            TraversalOrder::Bfs => Frontier::Queue(VecDeque::new()),
            TraversalOrder::Dfs => Frontier::Stack(Vec::new()),
        }
    }

    /// Returns the order this frontier realizes
    pub fn order(&self) -> TraversalOrder {
        match self {
            Frontier::Queue(_) => TraversalOrder::Bfs,
            Frontier::Stack(_) => TraversalOrder::Dfs,
        }
    }
}

impl NodeSequencer<Node> for Frontier {
    fn push(&mut self, u: Node) {
        match self {
            Frontier::Queue(q) => q.push_back(u),
            Frontier::Stack(s) => s.push(u),
        }
    }
    fn pop(&mut self) -> Option<Node> {
        match self {
            Frontier::Queue(q) => q.pop_front(),
            Frontier::Stack(s) => s.pop(),
        }
    }
    fn peek(&self) -> Option<Node> {
        match self {
            Frontier::Queue(q) => q.front().copied(),
            Frontier::Stack(s) => s.last().copied(),
        }
    }
    fn cardinality(&self) -> usize {
        match self {
            Frontier::Queue(q) => q.len(),
            Frontier::Stack(s) => s.len(),
        }
    }
}

/// Generic traversal iterator over the nodes reachable from a set of seeds.
///
/// The iterator is always positioned on its [`current`](VertexIter::current) node: at
/// construction all seeds are marked visited and pushed, and the first node is popped
/// right away. Advancing from a node pushes all of its unvisited neighbors in ascending
/// order and pops the next one.
///
/// As an [`Iterator`] it yields the current node and advances, returning `None` once the
/// frontier is drained. Calling [`advance`](VertexIter::advance) directly after that point
/// is a logic error and panics.
pub struct VertexIter<'a, G, S = Frontier>
where
    G: AdjacencyProbe,
    S: NodeSequencer<Node>,
{
    graph: &'a G,
    visited: BitSet,
    sequencer: S,
    current: Option<Node>,
    stop_at: Option<Node>,
}

/// A BFS traversal iterator over the graph, visiting nodes in
/// breadth-first order from the given seeds.
pub type BFS<'a, G> = VertexIter<'a, G, VecDeque<Node>>;

/// A DFS traversal iterator over the graph, visiting nodes in
/// depth-first order from the given seeds.
pub type DFS<'a, G> = VertexIter<'a, G, Vec<Node>>;

impl<'a, G, S> VertexIter<'a, G, S>
where
    G: AdjacencyProbe,
    S: NodeSequencer<Node>,
{
    /// Creates a traversal starting at all `seeds` using the given (empty) frontier.
    /// Duplicate seeds are ignored.
    /// ** Panics if a seed is `>= n` **
    pub fn with_frontier<I>(graph: &'a G, sequencer: S, seeds: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        let mut iter = Self {
            graph,
            visited: graph.vertex_bitset_unset(),
            sequencer,
            current: None,
            stop_at: None,
        };

        for u in seeds {
            if !iter.visited.set(u as usize) {
                iter.sequencer.push(u);
            }
        }

        iter.current = iter.sequencer.pop();
        iter
    }

    /// Discovers the neighbors of `u` and moves to the next node of the frontier
    fn step_from(&mut self, u: Node) {
        if self.stop_at == Some(u) {
            while self.sequencer.pop().is_some() {} // drop all
        } else {
            for v in self.graph.neighbors_of(u) {
                if !self.visited.set(v as usize) {
                    self.sequencer.push(v);
                }
            }
        }

        self.current = self.sequencer.pop();
    }

    /// Returns the node the iterator is positioned on or `None` once exhausted
    pub fn current(&self) -> Option<Node> {
        self.current
    }

    /// Returns *true* if all reachable nodes were yielded
    pub fn is_exhausted(&self) -> bool {
        self.current.is_none()
    }

    /// Moves to the next node.
    /// ** Panics if the iterator is already exhausted **
    pub fn advance(&mut self) {
        let u = self
            .current
            .unwrap_or_else(|| panic!("VertexIter advanced past the end of the traversal"));
        self.step_from(u);
    }

    /// Checks if a given node `u` has already been discovered
    pub fn did_visit_node(&self, u: Node) -> bool {
        self.visited.test(u as usize)
    }

    /// Number of nodes discovered so far (yielded or waiting in the frontier)
    pub fn number_of_visited(&self) -> usize {
        self.visited.count_ones()
    }

    /// Sets a stopper node. If this node is reached, the iterator returns it and afterwards only None.
    pub fn stop_at(mut self, stopper: Node) -> Self {
        self.stop_at = Some(stopper);
        self
    }

    /// Excludes a node from the search. It will be treated as if it was already visited,
    /// i.e. no edges to or from that node will be taken.
    ///
    /// # Warning
    /// Calling this method has no effect if the node is already in the frontier.
    pub fn with_node_excluded(mut self, u: Node) -> Self {
        self.visited.set(u as usize);
        self
    }
}

impl<'a, G, S> VertexIter<'a, G, S>
where
    G: AdjacencyProbe,
    S: NodeSequencer<Node> + Default,
{
    /// Creates a new traversal iterator starting from `start`.
    /// ** Panics if `start >= n` **
    pub fn new(graph: &'a G, start: Node) -> Self {
        Self::with_frontier(graph, S::default(), [start])
    }

    /// Creates a new traversal iterator starting from all `seeds`.
    /// ** Panics if a seed is `>= n` **
    pub fn from_seeds<I>(graph: &'a G, seeds: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        Self::with_frontier(graph, S::default(), seeds)
    }
}

impl<'a, G> VertexIter<'a, G, Frontier>
where
    G: AdjacencyProbe,
{
    /// Creates a traversal in the given order starting from all `seeds`.
    ///
    /// # Errors
    /// Fails if a seed is `>= n`.
    pub fn try_new<I>(graph: &'a G, order: TraversalOrder, seeds: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = Node>,
    {
        let n = graph.number_of_nodes();
        let seeds: SmallVec<[Node; 32]> = seeds.into_iter().collect();
        if let Some(&vertex) = seeds.iter().find(|&&u| u >= n) {
            return Err(GraphError::VertexOutOfRange { vertex, n });
        }
        Ok(Self::with_frontier(graph, Frontier::new(order), seeds))
    }

    /// Returns the order of this traversal
    pub fn order(&self) -> TraversalOrder {
        self.sequencer.order()
    }
}

impl<G, S> Iterator for VertexIter<'_, G, S>
where
    G: AdjacencyProbe,
    S: NodeSequencer<Node>,
{
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        let u = self.current?;
        self.step_from(u);
        Some(u)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let current = self.current.is_some() as usize;
        let pending = self.sequencer.cardinality() + current;
        let upper = Some(pending + self.graph.len() - self.visited.count_ones());

        // a stopper may end the traversal before the frontier is drained
        if self.stop_at.is_some() {
            (current, upper)
        } else {
            (pending, upper)
        }
    }
}

impl<G, S> std::iter::FusedIterator for VertexIter<'_, G, S>
where
    G: AdjacencyProbe,
    S: NodeSequencer<Node>,
{
}

/// Traversal algorithms as methods on the graph itself
pub trait Traversal: AdjacencyProbe + Sized {
    /// Returns an iterator that traverses nodes reachable from `start`
    /// in **breadth-first search (BFS) order**.
    ///
    /// # Examples
    /// ```
    /// use hexgraph::{prelude::*, algo::*};
    ///
    /// let mut g = Graph::undirected(3).unwrap();
    /// g.add_edge(0, 1, 4);
    ///
    /// let order: Vec<_> = g.bfs(0).collect();
    /// assert_eq!(order, vec![0, 1]);
    /// ```
    fn bfs(&self, start: Node) -> BFS<'_, Self> {
        BFS::new(self, start)
    }

    /// Returns an iterator that traverses nodes reachable from `start`
    /// in **depth-first search (DFS) order**.
    fn dfs(&self, start: Node) -> DFS<'_, Self> {
        DFS::new(self, start)
    }

    /// BFS seeded with several nodes at once
    fn bfs_from<I>(&self, seeds: I) -> BFS<'_, Self>
    where
        I: IntoIterator<Item = Node>,
    {
        BFS::from_seeds(self, seeds)
    }

    /// DFS seeded with several nodes at once
    fn dfs_from<I>(&self, seeds: I) -> DFS<'_, Self>
    where
        I: IntoIterator<Item = Node>,
    {
        DFS::from_seeds(self, seeds)
    }

    /// Traversal whose order is chosen at runtime
    /// ** Panics if a seed is `>= n` **
    fn traverse<I>(&self, order: TraversalOrder, seeds: I) -> VertexIter<'_, Self>
    where
        I: IntoIterator<Item = Node>,
    {
        VertexIter::with_frontier(self, Frontier::new(order), seeds)
    }

    /// Returns *true* if there is a (directed) path from `u` to `v`
    fn is_node_reachable(&self, u: Node, v: Node) -> bool {
        u == v || self.bfs(u).stop_at(v).any(|x| x == v)
    }
}

impl<G> Traversal for G where G: AdjacencyProbe + Sized {}
