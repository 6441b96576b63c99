/*!
# Node Representation

We choose `Node = u32` like most graph code: vertex ids are dense integers in `0..n`.
Graphs in this crate store a dense `n x n` adjacency bitmap, so the number of nodes is
capped at [`MAX_NODES`] to keep a graph within a few megabytes.
*/

/// Nodes are dense ids from `0` to `n - 1`
pub type Node = u32;

/// Number of nodes in a graph
pub type NumNodes = Node;

/// Largest supported number of nodes in a graph.
///
/// A full adjacency bitmap at this size takes `128 KiB`.
pub const MAX_NODES: NumNodes = 1024;

/// Node-Value one past every valid id; marks the end of a neighbor scan
pub const INVALID_NODE: Node = MAX_NODES;
