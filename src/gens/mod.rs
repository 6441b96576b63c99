/*!
# Graph Generators

Random graphs are produced by configurable generators in builder style:

1. Create a generator instance (e.g., `DensityGraph::new()`).
2. Set parameters using chained setters (e.g., `.nodes(n).density(p)`).
3. Generate a graph via `generate()` or lazily stream its edges via `stream()`.

All randomness is drawn from an explicit [`RandomSource`]. Tests and reproducible runs use
[`RandomSource::fixed`]; everything else should use [`RandomSource::from_entropy`].
*/

use crate::{error::*, prelude::*, utils::*};

mod random;

pub use random::*;

/// Trait for generators that allow setting the number of nodes.
pub trait NumNodesGen {
    /// Sets the number of nodes in the graph generator.
    fn nodes(self, n: NumNodes) -> Self;
}

/// General trait for a configurable random graph generator.
pub trait GraphGenerator {
    /// Creates a lazy iterator (stream) over generated edges and their costs.
    ///
    /// # Errors
    /// Fails if the generator is configured with invalid parameters.
    fn stream<'a>(
        &self,
        src: &'a mut RandomSource,
    ) -> Result<impl Iterator<Item = WeightedEdge> + 'a, GraphError>;

    /// Generates a full graph from [`GraphGenerator::stream`].
    ///
    /// # Errors
    /// Fails if the generator is configured with invalid parameters.
    fn generate(&self, src: &mut RandomSource) -> Result<Graph, GraphError>;
}
