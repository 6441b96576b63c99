use std::{
    fmt::{Display, Write as _},
    ops::{Deref, DerefMut},
};

use tracing::{debug, trace};

use super::*;

/// Progress of a game; everything except the cell contents
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
struct GameState {
    round: u32,
    last: Cell,
    over: bool,
    winner: Option<Cell>,
    blue: NumNodes,
    red: NumNodes,
}

/// A Hex board of `dim x dim` cells.
///
/// Cell `(row, col)` is vertex `dim * row + col` of an [`AttrGraph`] whose attribute is the
/// cell state. Every cell is linked to the up to six cells
/// `(r, c-1)`, `(r, c+1)`, `(r-1, c)`, `(r-1, c+1)`, `(r+1, c-1)`, `(r+1, c)`.
/// Because neighbor probing on the attributed graph only reports equally colored cells, a
/// depth-first search seeded on one border of a player only walks that player's stones.
#[derive(Debug, Clone)]
pub struct Hex {
    dim: u32,
    board: AttrGraph<Cell>,
    state: GameState,
    saved: Option<GameState>,
}

impl Hex {
    /// Creates an empty board.
    ///
    /// # Errors
    /// Fails if `dim` is not in `MIN_DIMENSION..=MAX_DIMENSION`.
    pub fn new(dim: u32) -> Result<Self, GraphError> {
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&dim) {
            return Err(GraphError::InvalidDimension(dim));
        }
        Ok(Self::with_valid_dimension(dim))
    }

    fn with_valid_dimension(dim: u32) -> Self {
        let mut board = AttrGraph::new(dim * dim, Cell::Empty)
            .unwrap_or_else(|e| panic!("{dim}x{dim} board exceeds the graph capacity: {e}"));

        // forward links only; the graph is undirected
        for row in 0..dim {
            for col in 0..dim {
                let u = row * dim + col;
                if col + 1 < dim {
                    board.add_unit_edge(u, u + 1);
                }
                if row + 1 < dim {
                    if col > 0 {
                        board.add_unit_edge(u, u + dim - 1);
                    }
                    board.add_unit_edge(u, u + dim);
                }
            }
        }

        debug!(dim, links = board.number_of_edges(), "created hex board");
        Self {
            dim,
            board,
            state: GameState::default(),
            saved: None,
        }
    }

    /// Number of rows and columns of the board
    pub fn dimension(&self) -> u32 {
        self.dim
    }

    /// Number of cells, i.e. `dim * dim`
    pub fn number_of_cells(&self) -> NumNodes {
        self.board.number_of_nodes()
    }

    /// The underlying lattice
    pub fn board(&self) -> &AttrGraph<Cell> {
        &self.board
    }

    /// Vertex id of cell `(row, col)`
    pub fn cell_id(&self, row: u32, col: u32) -> Node {
        debug_assert!(row < self.dim && col < self.dim);
        row * self.dim + col
    }

    /// Inverse of [`Hex::cell_id`]
    pub fn position_of(&self, cell: Node) -> (u32, u32) {
        (cell / self.dim, cell % self.dim)
    }

    /// Human readable name of a cell, e.g. `B3`
    pub fn cell_name(&self, cell: Node) -> String {
        let (row, col) = self.position_of(cell);
        format!("{}{col}", (b'A' + row as u8) as char)
    }

    /// Current content of a cell
    pub fn cell(&self, cell: Node) -> Cell {
        self.board.get_attr(cell)
    }

    /// Iterates over all unoccupied cells in ascending order
    pub fn open_cells(&self) -> impl Iterator<Item = Node> + '_ {
        self.board
            .attrs()
            .enumerate()
            .filter_map(|(u, c)| (c == Cell::Empty).then_some(u as Node))
    }

    /// Number of moves played so far
    pub fn round(&self) -> u32 {
        self.state.round
    }

    /// Player of the most recent move, [`Cell::Empty`] before the first one
    pub fn last_player(&self) -> Cell {
        self.state.last
    }

    /// Player to move next
    pub fn next_player(&self) -> Cell {
        self.state.last.next_player()
    }

    /// Number of BLUE stones on the board
    pub fn blue_cells(&self) -> NumNodes {
        self.state.blue
    }

    /// Number of RED stones on the board
    pub fn red_cells(&self) -> NumNodes {
        self.state.red
    }

    /// Returns *true* once [`Hex::assess_positions`] found a winner
    pub fn is_play_over(&self) -> bool {
        self.state.over
    }

    /// The winning player, if the game is decided
    pub fn winner(&self) -> Option<Cell> {
        self.state.winner
    }

    /// Parses a move such as `C4`: an uppercase row letter followed by a column number.
    ///
    /// Returns `None` if the game is over, the text is malformed, the position is off the board
    /// or the cell is already occupied.
    pub fn node_from_str(&self, text: &str) -> Option<Node> {
        if self.state.over || self.state.winner.is_some() {
            return None;
        }

        let mut chars = text.chars();
        let letter = chars.next()?;
        let digits = chars.as_str();
        if !letter.is_ascii_uppercase()
            || digits.is_empty()
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }

        let row = letter as u32 - 'A' as u32;
        let col: u32 = digits.parse().ok()?;
        if row >= self.dim || col >= self.dim {
            return None;
        }

        let cell = self.cell_id(row, col);
        (self.cell(cell) == Cell::Empty).then_some(cell)
    }

    /// Parses and plays a move for the next player, then assesses the board.
    /// Returns *false* if the move was rejected by [`Hex::node_from_str`].
    pub fn play_next_move(&mut self, text: &str) -> bool {
        let Some(cell) = self.node_from_str(text) else {
            debug!(text, "rejected move");
            return false;
        };
        self.set_next_move(cell);
        self.assess_positions();
        true
    }

    /// Places a stone of the next player on `cell` without assessing the board.
    /// ** Panics if the cell is occupied **
    pub fn set_next_move(&mut self, cell: Node) {
        assert_eq!(
            self.cell(cell),
            Cell::Empty,
            "cell {} is occupied",
            self.cell_name(cell)
        );

        let player = self.next_player();
        self.state.last = player;
        self.board.set_attr(cell, player);
        match player {
            Cell::Blue => self.state.blue += 1,
            _ => {
                self.state.red += 1;
                self.state.round += 1;
            }
        }

        debug_assert!(self.state.blue >= self.state.red && self.state.blue <= self.state.red + 1);
        debug_assert!(self.state.blue + self.state.red <= self.number_of_cells());
        trace!(cell = %self.cell_name(cell), %player, "placed stone");
    }

    /// Checks whether `player` connects its two borders
    fn connects(&self, player: Cell) -> bool {
        if player == Cell::Empty {
            return false;
        }

        let last = self.dim - 1;
        let seeds = (0..self.dim)
            .map(|i| match player {
                Cell::Blue => self.cell_id(i, 0),
                _ => self.cell_id(0, i),
            })
            .filter(|&u| self.cell(u) == player);

        self.board.dfs_from(seeds).any(|u| {
            let (row, col) = self.position_of(u);
            match player {
                Cell::Blue => col == last,
                _ => row == last,
            }
        })
    }

    /// Determines whether the game is decided and records the winner.
    ///
    /// BLUE wins by connecting West and East. Otherwise a full board is won by RED, and RED
    /// wins early by connecting North and South.
    pub fn assess_positions(&mut self) -> bool {
        let winner = if self.connects(Cell::Blue) {
            Some(Cell::Blue)
        } else if self.state.blue + self.state.red == self.number_of_cells()
            || self.connects(Cell::Red)
        {
            Some(Cell::Red)
        } else {
            None
        };

        if let Some(player) = winner {
            self.state.over = true;
            self.state.winner = Some(player);
            trace!(%player, round = self.state.round, "game decided");
        }
        self.state.over
    }

    /// Snapshots the board and the game progress. A later snapshot replaces an earlier one.
    pub fn save_state(&mut self) {
        self.board.save_state();
        self.saved = Some(self.state);
    }

    /// Returns to the last snapshot.
    /// ** Panics if no snapshot was taken **
    pub fn restore_state(&mut self) {
        let Some(state) = self.saved else {
            panic!("restore_state called without save_state");
        };
        self.board.restore_state();
        self.state = state;
    }

    /// Snapshots the board and returns a guard that gives mutable access to it; the snapshot is
    /// restored when the guard is dropped.
    pub fn speculate(&mut self) -> Speculation<'_> {
        self.save_state();
        Speculation { hex: self }
    }
}

impl Default for Hex {
    fn default() -> Self {
        Self::with_valid_dimension(DEFAULT_DIMENSION)
    }
}

/// Moves played through this guard are undone when it goes out of scope
pub struct Speculation<'a> {
    hex: &'a mut Hex,
}

impl Deref for Speculation<'_> {
    type Target = Hex;

    fn deref(&self) -> &Hex {
        &*self.hex
    }
}

impl DerefMut for Speculation<'_> {
    fn deref_mut(&mut self) -> &mut Hex {
        &mut *self.hex
    }
}

impl Drop for Speculation<'_> {
    fn drop(&mut self) {
        self.hex.restore_state();
    }
}

impl Display for Hex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dim = self.dim;
        let winner = self.state.winner.unwrap_or_default();

        writeln!(f, "HEX BOARD {dim}x{dim}")?;
        writeln!(
            f,
            "+ NEXT ROUND# {}: LAST PLAYER {}",
            self.state.round, self.state.last
        )?;
        writeln!(f, "+ GAME OVER {}: WINNER {winner}", self.state.over)?;
        writeln!(
            f,
            "+ TOTAL CELLS: {}: BLUE CELLS {}: RED CELLS {}",
            self.number_of_cells(),
            self.state.blue,
            self.state.red
        )?;
        writeln!(
            f,
            "* {} {}   {} {} (West-East, moves first)   {} {} (North-South)",
            Cell::Empty.symbol(),
            Cell::Empty,
            Cell::Blue.symbol(),
            Cell::Blue,
            Cell::Red.symbol(),
            Cell::Red
        )?;

        let graph = self.board.graph();
        let mut line = String::from(" ");
        for col in 0..dim {
            write!(line, "{col:<4}")?;
        }
        writeln!(f, "{}", line.trim_end())?;

        for row in 0..dim {
            let label = (b'A' + row as u8) as char;

            line.clear();
            write!(line, "{label:>w$} ", w = 2 * row as usize + 1)?;
            for col in 0..dim {
                let u = self.cell_id(row, col);
                write!(line, "{:<2}", self.cell(u).symbol())?;
                if col + 1 < dim && graph.has_edge(u, u + 1) {
                    write!(line, "{:<2}", '_')?;
                }
            }
            write!(line, "{label}")?;
            writeln!(f, "{}", line.trim_end())?;

            if row + 1 == dim {
                break;
            }

            line.clear();
            write!(line, "{:>w$}", ' ', w = 2 * row as usize + 3)?;
            for col in 0..dim {
                let u = self.cell_id(row, col);
                if col > 0 && graph.has_edge(u, u + dim - 1) {
                    write!(line, "{:<2}", '/')?;
                }
                if graph.has_edge(u, u + dim) {
                    write!(line, "{:<2}", '\\')?;
                }
            }
            writeln!(f, "{}", line.trim_end())?;
        }

        line.clear();
        write!(line, "{:>w$}", ' ', w = 2 * dim as usize + 1)?;
        for col in 0..dim {
            write!(line, "{col:<4}")?;
        }
        writeln!(f, "{}", line.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn play(hex: &mut Hex, moves: &[&str]) {
        for text in moves {
            assert!(hex.play_next_move(text), "move {text} rejected");
        }
    }

    #[test]
    fn dimension_is_checked() {
        assert!(matches!(
            Hex::new(MIN_DIMENSION - 1),
            Err(GraphError::InvalidDimension(2))
        ));
        assert!(Hex::new(MAX_DIMENSION + 1).is_err());
        assert_eq!(Hex::new(MAX_DIMENSION).unwrap().number_of_cells(), 26 * 26);
        assert_eq!(Hex::default().dimension(), DEFAULT_DIMENSION);
    }

    #[test]
    fn lattice() {
        let hex = Hex::new(3).unwrap();
        let graph = hex.board().graph();

        // corners have 2 or 3 neighbors, the center has 6
        assert_eq!(graph.neighbors_of(0).collect_vec(), vec![1, 3]);
        assert_eq!(graph.neighbors_of(2).collect_vec(), vec![1, 4, 5]);
        assert_eq!(graph.neighbors_of(4).collect_vec(), vec![1, 2, 3, 5, 6, 7]);
        assert_eq!(graph.neighbors_of(8).collect_vec(), vec![5, 7]);
        assert_eq!(graph.number_of_edges(), 3 * 2 + 2 * 3 + 2 * 2);
        assert_eq!(graph.edges().map(|(_, c)| c).max(), Some(MIN_COST));
    }

    #[test]
    fn parse_moves() {
        let mut hex = Hex::new(3).unwrap();

        assert_eq!(hex.node_from_str("A0"), Some(0));
        assert_eq!(hex.node_from_str("B2"), Some(5));
        assert_eq!(hex.node_from_str("C2"), Some(8));
        for text in ["", "A", "0A", "a0", "D0", "A3", "A0x", "A-1", "A+1", "A 1"] {
            assert_eq!(hex.node_from_str(text), None, "{text:?} accepted");
        }

        assert!(hex.play_next_move("B1"));
        assert_eq!(hex.node_from_str("B1"), None);
        assert!(!hex.play_next_move("B1"));
        assert_eq!(hex.cell(4), Cell::Blue);
        assert_eq!(hex.last_player(), Cell::Blue);
        assert_eq!(hex.next_player(), Cell::Red);
        assert_eq!(hex.cell_name(5), "B2");
    }

    #[test]
    fn blue_connects_west_east() {
        let mut hex = Hex::new(3).unwrap();
        play(&mut hex, &["A0", "B0", "A1", "B1"]);
        assert!(!hex.is_play_over());

        play(&mut hex, &["A2"]);
        assert!(hex.is_play_over());
        assert_eq!(hex.winner(), Some(Cell::Blue));
        assert_eq!((hex.blue_cells(), hex.red_cells()), (3, 2));
        assert_eq!(hex.round(), 2);

        // no moves after the game is decided
        assert_eq!(hex.node_from_str("C0"), None);
        assert!(!hex.play_next_move("C0"));
    }

    #[test]
    fn red_connects_north_south() {
        let mut hex = Hex::new(3).unwrap();
        play(&mut hex, &["A0", "A2", "B0", "B1", "A1"]);
        assert_eq!(hex.winner(), None);

        play(&mut hex, &["C1"]);
        assert_eq!(hex.winner(), Some(Cell::Red));
        assert_eq!(hex.open_cells().collect_vec(), vec![5, 6, 8]);
    }

    #[test]
    fn full_board_is_decided() {
        let mut hex = Hex::new(4).unwrap();
        for cell in 0..hex.number_of_cells() {
            hex.set_next_move(cell);
        }
        assert!(hex.assess_positions());
        // columns alternate between BLUE and RED, so only RED connects
        assert_eq!(hex.winner(), Some(Cell::Red));
        assert_eq!(hex.open_cells().count(), 0);
    }

    /// Plays `cells` alternately starting with BLUE without assessing in between
    fn fill(hex: &mut Hex, cells: &[Node]) {
        for &cell in cells {
            hex.set_next_move(cell);
        }
    }

    #[test]
    fn full_board_without_blue_chain_goes_to_red() {
        let mut hex = Hex::new(3).unwrap();
        // BLUE: 2 3 5 6 8, RED: 0 1 4 7
        fill(&mut hex, &[2, 1, 3, 4, 5, 7, 6, 0, 8]);
        assert_eq!(hex.open_cells().count(), 0);

        assert!(hex.assess_positions());
        assert_eq!(hex.winner(), Some(Cell::Red));
    }

    #[test]
    fn full_board_with_blue_chain_goes_to_blue() {
        let mut hex = Hex::new(3).unwrap();
        // BLUE: 0 3 4 5 8, RED: 1 2 6 7
        fill(&mut hex, &[3, 1, 4, 2, 5, 6, 0, 7, 8]);
        assert_eq!(hex.open_cells().count(), 0);

        assert!(hex.assess_positions());
        assert_eq!(hex.winner(), Some(Cell::Blue));
    }

    #[test]
    fn speculation_is_undone() {
        let mut hex = Hex::new(3).unwrap();
        play(&mut hex, &["B1"]);
        let before = hex.to_string();

        {
            let mut sim = hex.speculate();
            let open = sim.open_cells().collect_vec();
            for cell in open {
                sim.set_next_move(cell);
            }
            assert!(sim.assess_positions());
            assert_eq!(sim.open_cells().count(), 0);
        }

        assert_eq!(hex.to_string(), before);
        assert!(!hex.is_play_over());
        assert_eq!(hex.open_cells().count(), 8);
        assert_eq!(hex.next_player(), Cell::Red);
    }

    #[test]
    #[should_panic]
    fn occupied_cell_panics() {
        let mut hex = Hex::new(3).unwrap();
        hex.set_next_move(4);
        hex.set_next_move(4);
    }

    #[test]
    fn display() {
        let mut hex = Hex::new(3).unwrap();
        play(&mut hex, &["A0", "B1"]);

        let expected = "\
HEX BOARD 3x3
+ NEXT ROUND# 1: LAST PLAYER RED
+ GAME OVER false: WINNER EMPTY
+ TOTAL CELLS: 9: BLUE CELLS 1: RED CELLS 1
* . EMPTY   X BLUE (West-East, moves first)   # RED (North-South)
 0   1   2
A X _ . _ . A
   \\ / \\ / \\
  B . _ # _ . B
     \\ / \\ / \\
    C . _ . _ . C
       0   1   2
";
        assert_eq!(hex.to_string(), expected);
    }
}
