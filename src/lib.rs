/*!
`hexgraph` is a small graph engine for graphs with at most [`MAX_NODES`] nodes and positive
edge costs, together with the algorithms and games built on top of it.

# Representation

We represent **nodes** as `u32` in the range `0..n` where `n` is the number of nodes in the graph.
For **edges**, we use a simple tuple-struct `Edge(Node, Node)`; costs are `u32` in
`MIN_COST..INFINITY_COST`.

A [`Graph`](crate::repr::Graph) stores its adjacency as a dense `n x n` bitmap and the edge
costs in a separate map keyed by edge. It is either **directed** or **undirected**:

- In an **undirected** graph, `Edge(u, v)` is treated as equivalent to `Edge(v, u)`; both bits
  are set and the cost is stored once under the normalized edge.
- In a **directed** graph, the edge has orientation, so `Edge(u, v)` and `Edge(v, u)` are
  distinct.

An [`AttrGraph`](crate::repr::AttrGraph) additionally attaches one attribute to every node and
restricts neighbor probing to equally attributed nodes.

# Design

All algorithms/generators are provided as configurable structs that one can alter to their
needs using the *Builder* / *Setter* pattern before calling the configured algorithm on a
provided graph. The most important functionalities are also implemented via traits on the
graph itself, e.g. `graph.mst_prim()` or `graph.spt_dijkstra(root)`.

# Usage

- [`prelude`] includes definitions for nodes, edges, basic graph operations and both graph
  representations,
- [`algo`] includes edge iteration, BFS/DFS iterators, Prim, Dijkstra and find-merge,
- [`gens`] includes the density-driven random graph generator,
- [`io`] includes readers and writers for the graph text format, the find-merge text format and
  tree dumps,
- [`games`] includes the Hex board and the Monte-Carlo Hex player,
- [`utils`] includes the augmented priority queue used by Prim and Dijkstra.

In most use-cases, `use hexgraph::{prelude::*, algo::*};` suffices for your needs.
*/

pub mod algo;
pub mod bitset;
pub mod edge;
pub mod error;
pub mod games;
pub mod gens;
pub mod io;
pub mod node;
pub mod ops;
pub mod repr;
pub(crate) mod testing;
pub mod utils;

pub use edge::*;
pub use node::*;

/// `hexgraph::prelude` includes definitions for nodes and edges, all basic graph operation traits,
/// both representations and the crate's error type.
pub mod prelude {
    pub use super::{edge::*, error::GraphError, node::*, ops::*, repr::*};
}
