/*!
# Graph Algorithms

All algorithms are re-exported at the top level of this module, so you can simply do:
```rust
use hexgraph::algo::*;
```
and gain access to edge iteration, traversals, spanning and shortest-path trees as well as
disjoint-set merging.
If possible, algorithms are provided as **iterators** or as traits on the graph itself.
*/

mod edge_iter;
mod find_merge;
mod mst_prim;
mod spt_dijkstra;
mod traversal;
mod tree;

use crate::{bitset::BitSet, error::*, ops::*, utils::*, *};
use smallvec::SmallVec;

#[cfg(test)]
use crate::repr::*;

pub use edge_iter::*;
pub use find_merge::*;
pub use mst_prim::*;
pub use spt_dijkstra::*;
pub use traversal::*;
pub use tree::*;
