//! # Graph Text Format
//!
//! ```text
//! # GRAPH
//! # FORMAT: num_vertices, then one "src dst cost" line per edge
//! # GEdgeType: U
//! # #V: 3; #E(uniq): 2
//! 3
//! 0 1 4
//! 1 2 7
//! ```
//!
//! The header block is informational; the reader skips it like every other comment. Undirected
//! edges are written once in normalized form. When reading, the edge type is a reader setting.

use std::fmt::Display;

use tracing::debug;

use super::*;

/// A GraphReader for the graph text format
#[derive(Debug, Clone)]
pub struct GraphTextReader {
    /// Edge type of the created graph
    edge_type: EdgeType,
    /// Lines starting with `comment_identifier` are skipped when reading
    comment_identifier: String,
}

impl Default for GraphTextReader {
    fn default() -> Self {
        Self {
            edge_type: EdgeType::Undirected,
            comment_identifier: "#".to_string(),
        }
    }
}

impl GraphTextReader {
    /// Creates a new (default) reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the edge type of the created graph
    pub fn edge_type(mut self, edge_type: EdgeType) -> Self {
        self.edge_type = edge_type;
        self
    }

    /// Updates the comment identifier
    pub fn comment_identifier<S: Into<String>>(mut self, c: S) -> Self {
        self.comment_identifier = c.into();
        self
    }
}

impl GraphReader<Graph> for GraphTextReader {
    fn try_read_graph<R: BufRead>(&self, reader: R) -> Result<Graph> {
        let mut lines = ContentLines::new(reader, &self.comment_identifier);

        let (_, line) = lines.expect_line("number of vertices")?;
        let mut parts = line.split_whitespace();
        let n: NumNodes = parse_next_value!(parts, "number of vertices");
        raise_error_unless!(
            parts.next().is_none(),
            ErrorKind::InvalidData,
            format!("Unexpected data after the number of vertices: {line:?}")
        );
        let mut graph = Graph::new(self.edge_type, n)?;

        while let Some((line_no, line)) = lines.next_line()? {
            let mut parts = line.split_whitespace();
            let src: Node = parse_next_value!(parts, "source vertex");
            let dst: Node = parse_next_value!(parts, "target vertex");
            let cost: Cost = parse_next_value!(parts, "edge cost");

            raise_error_unless!(
                parts.next().is_none(),
                ErrorKind::InvalidData,
                format!("Line {line_no}: unexpected data after the edge cost")
            );
            raise_error_unless!(
                src < n && dst < n,
                ErrorKind::InvalidData,
                format!("Line {line_no}: edge ({src},{dst}) out of range for {n} vertices")
            );
            raise_error_unless!(
                src != dst,
                ErrorKind::InvalidData,
                format!("Line {line_no}: self-loop at vertex {src}")
            );
            raise_error_unless!(
                (MIN_COST..INFINITY_COST).contains(&cost),
                ErrorKind::InvalidData,
                format!("Line {line_no}: cost {cost} not in [{MIN_COST}, {INFINITY_COST})")
            );

            graph.add_edge(src, dst, cost);
        }

        debug!(
            n,
            m = graph.number_of_edges(),
            edge_type = ?self.edge_type,
            "parsed graph text"
        );
        Ok(graph)
    }
}

/// Trait for creating graphs from the graph text format with default settings
pub trait GraphTextRead: Sized {
    /// Tries to read an undirected graph from a given reader
    fn try_read_graph_text<R: BufRead>(reader: R) -> Result<Self>;

    /// Tries to read an undirected graph from a given file
    fn try_read_graph_text_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::try_read_graph_text(BufReader::new(File::open(path)?))
    }
}

impl GraphTextRead for Graph {
    fn try_read_graph_text<R: BufRead>(reader: R) -> Result<Self> {
        GraphTextReader::default().try_read_graph(reader)
    }
}

/// Renders a graph in the graph text format through the public query surface only
pub struct GraphText<'a, G>(pub &'a G);

impl<G> Display for GraphText<'_, G>
where
    G: EdgeCosts + GraphNodeOrder + GraphEdgeOrder,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let graph = self.0;
        writeln!(f, "# GRAPH")?;
        writeln!(f, "# FORMAT: num_vertices, then one \"src dst cost\" line per edge")?;
        writeln!(f, "# GEdgeType: {}", graph.edge_type().tag())?;
        writeln!(
            f,
            "# #V: {}; #E(uniq): {}",
            graph.number_of_nodes(),
            graph.number_of_edges()
        )?;
        writeln!(f, "{}", graph.number_of_nodes())?;
        for (Edge(u, v), cost) in graph.edges() {
            writeln!(f, "{u} {v} {cost}")?;
        }
        Ok(())
    }
}

impl Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        GraphText(self).fmt(f)
    }
}

/// A writer for the graph text format
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphTextWriter;

impl GraphTextWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self
    }
}

impl<G> GraphWriter<G> for GraphTextWriter
where
    G: EdgeCosts + GraphNodeOrder + GraphEdgeOrder,
{
    fn try_write_graph<W: Write>(&self, graph: &G, mut writer: W) -> Result<()> {
        write!(writer, "{}", GraphText(graph))
    }
}

/// Trait for writing graphs in the graph text format with default settings
pub trait GraphTextWrite {
    /// Tries to write the graph to a given writer
    fn try_write_graph_text<W: Write>(&self, writer: W) -> Result<()>;

    /// Tries to write the graph to a given file
    fn try_write_graph_text_file<P: AsRef<Path>>(&self, path: P) -> Result<()>;
}

impl<G> GraphTextWrite for G
where
    G: EdgeCosts + GraphNodeOrder + GraphEdgeOrder,
{
    fn try_write_graph_text<W: Write>(&self, writer: W) -> Result<()> {
        GraphTextWriter.try_write_graph(self, writer)
    }

    fn try_write_graph_text_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        GraphTextWriter.try_write_graph_file(self, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    const SAMPLE: &str = "\
# a comment

4
0 1 3
# inline comment line
2 1 5
  3 0 1
";

    fn read(text: &str) -> Result<Graph> {
        Graph::try_read_graph_text(text.as_bytes())
    }

    fn error_message(text: &str) -> String {
        let err = read(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        err.to_string()
    }

    #[test]
    fn read_sample() {
        let graph = read(SAMPLE).unwrap();
        assert_eq!(graph.number_of_nodes(), 4);
        assert!(graph.is_undirected());
        assert_eq!(
            graph.edges().collect_vec(),
            vec![(Edge(0, 1), 3), (Edge(0, 3), 1), (Edge(1, 2), 5)]
        );

        let directed = GraphTextReader::new()
            .edge_type(EdgeType::Directed)
            .try_read_graph(SAMPLE.as_bytes())
            .unwrap();
        assert!(directed.has_edge(2, 1));
        assert!(!directed.has_edge(1, 2));
    }

    #[test]
    fn write_format() {
        let graph = read(SAMPLE).unwrap();
        let mut buffer = Vec::new();
        graph.try_write_graph_text(&mut buffer).unwrap();

        let expected = "\
# GRAPH
# FORMAT: num_vertices, then one \"src dst cost\" line per edge
# GEdgeType: U
# #V: 4; #E(uniq): 3
4
0 1 3
0 3 1
1 2 5
";
        assert_eq!(String::from_utf8(buffer).unwrap(), expected);
        assert_eq!(graph.to_string(), expected);
    }

    #[test]
    fn write_then_read_random() {
        let rng = &mut Pcg64Mcg::seed_from_u64(11);

        for edge_type in [EdgeType::Undirected, EdgeType::Directed] {
            let n = 20;
            let mut graph = Graph::new(edge_type, n).unwrap();
            for _ in 0..60 {
                let u = rng.random_range(0..n);
                let v = rng.random_range(0..n);
                if u != v {
                    graph.add_edge(u, v, rng.random_range(1..100));
                }
            }

            let mut buffer = Vec::new();
            GraphTextWriter::new()
                .try_write_graph(&graph, &mut buffer)
                .unwrap();
            let read_back = GraphTextReader::new()
                .edge_type(edge_type)
                .try_read_graph(buffer.as_slice())
                .unwrap();

            assert_eq!(read_back.number_of_edges(), graph.number_of_edges());
            assert_eq!(read_back.edges().collect_vec(), graph.edges().collect_vec());
        }
    }

    #[test]
    fn malformed_input() {
        assert!(error_message("").contains("number of vertices"));
        assert!(error_message("# only comments\n").contains("number of vertices"));
        assert!(error_message("abc\n").contains("Cannot parse"));
        assert!(error_message("3 4\n").contains("Unexpected data"));
        assert!(error_message("3\n0 1\n").contains("edge cost"));
        assert!(error_message("3\n0 3 1\n").contains("Line 2"));
        assert!(error_message("3\n0 1 0\n").contains("cost 0"));
        assert!(error_message("3\n1 1 2\n").contains("self-loop"));
        assert!(error_message("3\n0 1 2 9\n").contains("unexpected data"));
        assert!(error_message("3\n0 -1 2\n").contains("Cannot parse"));
    }

    #[test]
    fn vertex_count_is_checked() {
        assert_eq!(read("0\n").unwrap_err().kind(), ErrorKind::InvalidData);
        assert_eq!(
            read(&format!("{}\n", MAX_NODES + 1)).unwrap_err().kind(),
            ErrorKind::InvalidData
        );
        assert!(read(&format!("{MAX_NODES}\n")).is_ok());
    }
}
