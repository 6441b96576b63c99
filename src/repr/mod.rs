/*!
# Graph Representations

- [`Graph`]: directed or undirected graph over a dense adjacency bitmap with a separate cost map,
- [`AttrGraph`]: an undirected [`Graph`] with one attribute per vertex whose adjacency probing is
  restricted to equally attributed neighbors.

Both implement all traits of [`ops`](crate::ops).
*/

use crate::{bitset::BitSet, error::*, ops::*, *};

mod attributed;
mod graph;

pub use attributed::*;
pub use graph::*;
