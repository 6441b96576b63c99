//! # Tree Dump Format (output only)
//!
//! ```text
//! # MINIMUM SPANNING TREE
//! # FORMAT: num_vertices, then one "vid parent_vid edge_cost" line per reached vertex
//! # MST Prim Seed Vertex: 0
//! # MST Prim Cost: 11
//! 5
//! 1 0 2
//! ...
//! ```
//!
//! Shortest-path trees carry `SPT Dijkstra Root Vertex` and `SPT Total Path Cost` instead and
//! list path costs. The root and unreached vertices are skipped.

use std::fmt::Display;

use super::*;
use crate::algo::{Tree, TreeKind};

impl<G> Display for Tree<'_, G>
where
    G: GraphNodeOrder,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (title, root_label, cost_label, cost_column) = match self.kind() {
            TreeKind::MinimumSpanning => (
                "MINIMUM SPANNING TREE",
                "MST Prim Seed Vertex",
                "MST Prim Cost",
                "edge_cost",
            ),
            TreeKind::ShortestPath => (
                "SHORTEST PATH TREE",
                "SPT Dijkstra Root Vertex",
                "SPT Total Path Cost",
                "path_cost",
            ),
        };

        writeln!(f, "# {title}")?;
        writeln!(
            f,
            "# FORMAT: num_vertices, then one \"vid parent_vid {cost_column}\" line per reached vertex"
        )?;
        writeln!(f, "# {root_label}: {}", self.root())?;
        writeln!(f, "# {cost_label}: {}", self.total_cost())?;
        writeln!(f, "{}", self.number_of_nodes())?;
        for (Edge(u, parent), cost) in self.edges() {
            writeln!(f, "{u} {parent} {cost}")?;
        }
        Ok(())
    }
}

/// Writing a [`Tree`] in the dump format
pub trait TreeDump {
    /// Tries to write the tree to a given writer
    fn try_write_tree<W: Write>(&self, writer: W) -> Result<()>;

    /// Tries to write the tree to a given file
    fn try_write_tree_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.try_write_tree(&mut writer)?;
        writer.flush()
    }
}

impl<G> TreeDump for Tree<'_, G>
where
    G: GraphNodeOrder,
{
    fn try_write_tree<W: Write>(&self, mut writer: W) -> Result<()> {
        write!(writer, "{self}")
    }
}
