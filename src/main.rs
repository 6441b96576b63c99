use std::{
    fs::File,
    io::{self, BufWriter, Lines, StdinLock, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use hexgraph::{algo::*, games::*, gens::*, io::*, prelude::*};
use itertools::Itertools;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hexgraph")]
#[command(version)]
#[command(about = "Random graphs, spanning trees, shortest paths and Hex", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random graph and write it in the graph text format
    Random {
        #[command(flatten)]
        random: RandomArgs,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compute a minimum spanning tree with Prim's algorithm seeded at vertex 0
    Mst {
        #[command(flatten)]
        graph: GraphArgs,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compute a shortest path tree with Dijkstra's algorithm
    Spt {
        #[command(flatten)]
        graph: GraphArgs,

        /// Root vertex
        #[arg(long, default_value_t = 0)]
        root: Node,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the vertices reachable from the seeds in BFS or DFS order
    Traverse {
        /// Graph in the graph text format
        #[arg(short, long)]
        input: PathBuf,

        /// Read the edges as directed
        #[arg(long)]
        directed: bool,

        #[arg(long, value_enum, default_value_t = OrderArg::Bfs)]
        order: OrderArg,

        /// Comma separated seed vertices
        #[arg(long, value_delimiter = ',', default_value = "0")]
        seeds: Vec<Node>,
    },

    /// Execute the merges of a find-merge text file and print the resulting sets
    FindMerge {
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replay a sequence of Hex moves, printing the board after each one
    Hex {
        #[arg(long, default_value_t = DEFAULT_DIMENSION)]
        dimension: u32,

        /// Comma separated moves, e.g. A0,B1
        #[arg(long, value_delimiter = ',')]
        moves: Vec<String>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Play Hex against the Monte-Carlo player; human moves are read from stdin
    McHex {
        #[arg(long, default_value_t = MonteCarloHex::DEFAULT_DIMENSION)]
        dimension: u32,

        #[arg(long, value_enum, default_value_t = PlayerArg::Red)]
        human: PlayerArg,

        /// Stop after this many moves of both sides (0 plays the game out)
        #[arg(long, default_value_t = 0)]
        max_moves: u32,

        /// Fixed seed, 1 s per move, 10 trials; the human plays the first open cell
        #[arg(long)]
        auto_test: bool,

        /// Time budget per software move in seconds
        #[arg(long, default_value_t = MonteCarloHex::DEFAULT_MAX_MOVE_TIME.as_secs())]
        max_move_time: u64,

        /// Random playouts per candidate move
        #[arg(long, default_value_t = MonteCarloHex::DEFAULT_TRIALS, value_parser = clap::value_parser!(u32).range(1..))]
        trials: u32,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct RandomArgs {
    #[arg(long, default_value_t = DensityGraph::DEFAULT_NUM_NODES)]
    vertices: NumNodes,

    /// Probability of every candidate edge
    #[arg(long, default_value_t = DensityGraph::DEFAULT_DENSITY)]
    density: f64,

    #[arg(long, default_value_t = DensityGraph::DEFAULT_MIN_COST)]
    min_cost: Cost,

    #[arg(long, default_value_t = DensityGraph::DEFAULT_MAX_COST)]
    max_cost: Cost,

    #[arg(long)]
    directed: bool,

    /// Use the fixed seeds instead of entropy
    #[arg(long)]
    auto_test: bool,
}

impl RandomArgs {
    fn generate(&self) -> Result<Graph> {
        let graph = DensityGraph::new()
            .nodes(self.vertices)
            .density(self.density)
            .costs(self.min_cost, self.max_cost)
            .edge_type(edge_type(self.directed))
            .generate(&mut RandomSource::new(self.auto_test))?;
        Ok(graph)
    }
}

#[derive(Args, Debug)]
struct GraphArgs {
    /// Graph in the graph text format; a random graph is generated if omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    #[command(flatten)]
    random: RandomArgs,
}

impl GraphArgs {
    fn load(&self) -> Result<Graph> {
        match &self.input {
            Some(path) => read_graph(path, self.random.directed),
            None => self.random.generate(),
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OrderArg {
    Bfs,
    Dfs,
}

impl From<OrderArg> for TraversalOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Bfs => TraversalOrder::Bfs,
            OrderArg::Dfs => TraversalOrder::Dfs,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PlayerArg {
    Blue,
    Red,
}

impl From<PlayerArg> for Cell {
    fn from(player: PlayerArg) -> Self {
        match player {
            PlayerArg::Blue => Cell::Blue,
            PlayerArg::Red => Cell::Red,
        }
    }
}

/// Reads human moves from stdin, asking again until a line parses to an open cell
struct StdinMoves {
    lines: Lines<StdinLock<'static>>,
}

impl MoveSource for StdinMoves {
    fn next_move(&mut self, hex: &Hex, _open: &[Node]) -> io::Result<Node> {
        loop {
            eprint!("{} to move (e.g. A0): ", hex.next_player());
            let Some(line) = self.lines.next().transpose()? else {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "stdin closed before the game ended",
                ));
            };

            let text = line.trim();
            match hex.node_from_str(text) {
                Some(cell) => return Ok(cell),
                None => eprintln!("Invalid move {text:?}"),
            }
        }
    }
}

fn edge_type(directed: bool) -> EdgeType {
    if directed {
        EdgeType::Directed
    } else {
        EdgeType::Undirected
    }
}

fn read_graph(path: &Path, directed: bool) -> Result<Graph> {
    GraphTextReader::new()
        .edge_type(edge_type(directed))
        .try_read_graph_file(path)
        .with_context(|| format!("Cannot read graph from {}", path.display()))
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Cannot create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    })
}

/// Runs Prim's algorithm on `graph` and dumps the tree
fn write_mst<W: Write>(graph: &Graph, out: W) -> Result<()> {
    let mst = MstPrim::new(graph);
    info!(
        weight = mst.weight(),
        spanning = mst.is_spanning(),
        "computed minimum spanning tree"
    );
    mst.tree().try_write_tree(out)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match cli.command {
        Commands::Random { random, output } => {
            let graph = random.generate()?;
            info!(
                n = graph.number_of_nodes(),
                m = graph.number_of_edges(),
                "generated graph"
            );

            let mut out = open_output(output.as_deref())?;
            graph.try_write_graph_text(&mut out)?;
            out.flush()?;
        }

        Commands::Mst { graph, output } => {
            let graph = graph.load()?;
            let mut out = open_output(output.as_deref())?;
            write_mst(&graph, &mut out)?;
            out.flush()?;
        }

        Commands::Spt {
            graph,
            root,
            output,
        } => {
            let graph = graph.load()?;
            let mut spt = SptDijkstra::try_with_root(&graph, root)?;
            info!(
                root,
                reached = spt.tree().number_of_reached(),
                "computed shortest path tree"
            );

            let mut out = open_output(output.as_deref())?;
            spt.tree().try_write_tree(&mut out)?;
            writeln!(
                out,
                "# Average path cost from {root}: {:.3}",
                spt.average_path_cost_from(root)
            )?;
            writeln!(
                out,
                "# Average path cost over all pairs: {:.3}",
                spt.average_path_cost_all()
            )?;
            out.flush()?;
        }

        Commands::Traverse {
            input,
            directed,
            order,
            seeds,
        } => {
            let graph = read_graph(&input, directed)?;
            let visited = VertexIter::try_new(&graph, order.into(), seeds)?.collect_vec();
            info!(visited = visited.len(), order = ?order, "traversal finished");
            println!("{}", visited.iter().join(" "));
        }

        Commands::FindMerge { input, output } => {
            let sets = FindMerge::try_read_text_file(&input)
                .with_context(|| format!("Cannot read find-merge text from {}", input.display()))?;
            info!(sets = sets.number_of_sets(), "merged");

            let mut out = open_output(output.as_deref())?;
            sets.try_write_text(&mut out)?;
            out.flush()?;
        }

        Commands::Hex {
            dimension,
            moves,
            output,
        } => {
            let mut hex = Hex::new(dimension)?;
            let mut out = open_output(output.as_deref())?;
            writeln!(out, "{hex}")?;

            for text in moves.iter().map(|m| m.trim()) {
                if hex.is_play_over() {
                    bail!("Move {text} after the game was decided");
                }
                let player = hex.next_player();
                if !hex.play_next_move(text) {
                    bail!("Invalid move {text:?} for {player}");
                }
                writeln!(out, "{player} plays {text}")?;
                writeln!(out, "{hex}")?;
            }

            if let Some(winner) = hex.winner() {
                info!(%winner, round = hex.round(), "game decided");
            }
            out.flush()?;
        }

        Commands::McHex {
            dimension,
            human,
            max_moves,
            auto_test,
            max_move_time,
            trials,
            output,
        } => {
            let mut game = MonteCarloHex::new(dimension)?
                .human(human.into())
                .max_moves(max_moves)
                .max_move_time(Duration::from_secs(max_move_time))
                .trials(trials);
            if auto_test {
                game = game.auto_test();
            }

            let mut out = open_output(output.as_deref())?;
            let winner = if auto_test {
                game.run(&mut FirstOpenCell, &mut out)?
            } else {
                let mut moves = StdinMoves {
                    lines: io::stdin().lines(),
                };
                game.run(&mut moves, &mut out)?
            };
            out.flush()?;

            match winner {
                Some(winner) => info!(%winner, moves = game.num_moves(), "game over"),
                None => info!(moves = game.num_moves(), "move limit reached"),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn mst_subcommand_arguments() {
        let cli = Cli::try_parse_from(["hexgraph", "mst", "--vertices", "7", "--auto-test"]).unwrap();
        let Commands::Mst { graph, output } = cli.command else {
            panic!("expected the mst subcommand");
        };
        assert!(graph.input.is_none() && output.is_none());
        assert_eq!(graph.random.vertices, 7);
        assert!(graph.random.auto_test);
    }

    #[test]
    fn mst_dump() {
        let graph = Graph::from_edges(
            EdgeType::Undirected,
            4,
            [(Edge(0, 1), 2), (Edge(1, 2), 3), (Edge(0, 2), 4)],
        )
        .unwrap();

        let mut buffer = Vec::new();
        write_mst(&graph, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("# MST Prim Cost: 5\n"));
        assert!(text.ends_with("4\n1 0 2\n2 1 3\n"));
    }
}
