use std::{
    io::{self, ErrorKind, Write},
    time::{Duration, Instant},
};

use rand::{SeedableRng, seq::SliceRandom};
use rand_pcg::Pcg64Mcg;
use tracing::{debug, trace};

use super::*;

/// Seed of the random source in auto-test mode
pub const AUTO_TEST_SEED: u64 = 13607;

/// Supplies the moves of the human side of a [`MonteCarloHex`] game
pub trait MoveSource {
    /// Chooses a cell for the next human move; `open` lists all unoccupied cells.
    ///
    /// # Errors
    /// Implementations reading external input forward their I/O errors.
    fn next_move(&mut self, hex: &Hex, open: &[Node]) -> io::Result<Node>;
}

impl<F> MoveSource for F
where
    F: FnMut(&Hex, &[Node]) -> io::Result<Node>,
{
    fn next_move(&mut self, hex: &Hex, open: &[Node]) -> io::Result<Node> {
        self(hex, open)
    }
}

/// Plays the first cell of the open list; used to simulate the human in auto-test mode
#[derive(Debug, Copy, Clone, Default)]
pub struct FirstOpenCell;

impl MoveSource for FirstOpenCell {
    fn next_move(&mut self, _hex: &Hex, open: &[Node]) -> io::Result<Node> {
        open.first()
            .copied()
            .ok_or_else(|| io::Error::new(ErrorKind::UnexpectedEof, "no open cell left"))
    }
}

/// Returns the largest `i` with `i! <= num`.
/// ** Panics if `num == 0` **
pub fn factorial_inverse(num: u32) -> u32 {
    assert!(num > 0, "factorial_inverse of 0");
    let (mut i, mut factorial) = (1u32, 1u64);
    while factorial * (i as u64 + 1) <= num as u64 {
        i += 1;
        factorial *= i as u64;
    }
    i
}

/// A game of Hex between a human and a software player.
///
/// The software evaluates a candidate cell by filling the remaining board randomly `trials`
/// times (alternating players, starting with the candidate) and counting the games the human
/// does not win. Open cells are evaluated in random order until all of them are scored or the
/// time budget per move is exhausted; the first candidate with the most wins is played. If
/// fewer cells remain than would make `trials` distinct fillings likely, one trial per
/// remaining cell is run instead.
///
/// All cells live in one permutation whose prefix of length `num_moves` holds the cells played
/// so far; the open cells form the suffix.
#[derive(Debug, Clone)]
pub struct MonteCarloHex {
    hex: Hex,
    human: Cell,
    max_moves: u32,
    max_move_time: Duration,
    trials: u32,
    rng: Pcg64Mcg,
    shuffle: Vec<Node>,
    num_moves: usize,
}

impl MonteCarloHex {
    /// Board dimension used by the command line game
    pub const DEFAULT_DIMENSION: u32 = 11;

    /// Random games per candidate
    pub const DEFAULT_TRIALS: u32 = 100;

    /// Time budget for one software move
    pub const DEFAULT_MAX_MOVE_TIME: Duration = Duration::from_secs(60);

    /// Creates a game on an empty board with the human playing RED.
    ///
    /// # Errors
    /// Fails if `dim` is not a valid board dimension.
    pub fn new(dim: u32) -> Result<Self, GraphError> {
        let hex = Hex::new(dim)?;
        let shuffle = (0..hex.number_of_cells()).collect();
        Ok(Self {
            hex,
            human: Cell::Red,
            max_moves: 0,
            max_move_time: Self::DEFAULT_MAX_MOVE_TIME,
            trials: Self::DEFAULT_TRIALS,
            rng: Pcg64Mcg::from_rng(&mut rand::rng()),
            shuffle,
            num_moves: 0,
        })
    }

    /// Sets the color of the human.
    /// ** Panics if `human` is [`Cell::Empty`] **
    pub fn human(mut self, human: Cell) -> Self {
        assert_ne!(human, Cell::Empty, "the human has to play BLUE or RED");
        self.human = human;
        self
    }

    /// Stops after `max_moves` moves of both sides; `0` plays until the game is decided
    pub fn max_moves(mut self, max_moves: u32) -> Self {
        self.max_moves = max_moves;
        self
    }

    /// Time budget of one software move; checked after each evaluated candidate
    pub fn max_move_time(mut self, max_move_time: Duration) -> Self {
        self.max_move_time = max_move_time;
        self
    }

    /// Random games per candidate.
    /// ** Panics if `trials == 0` **
    pub fn trials(mut self, trials: u32) -> Self {
        assert!(trials > 0, "at least one trial per candidate is required");
        self.trials = trials;
        self
    }

    /// Makes the software reproducible
    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = Pcg64Mcg::seed_from_u64(seed);
        self
    }

    /// Fixed seed, one second per move and 10 trials
    pub fn auto_test(self) -> Self {
        self.seed(AUTO_TEST_SEED)
            .max_move_time(Duration::from_secs(1))
            .trials(10)
    }

    /// The current board
    pub fn hex(&self) -> &Hex {
        &self.hex
    }

    /// Color played by the human
    pub fn human_player(&self) -> Cell {
        self.human
    }

    /// Number of moves played by both sides
    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    /// Unoccupied cells in the order of the current permutation
    pub fn open_cells(&self) -> &[Node] {
        &self.shuffle[self.num_moves..]
    }

    /// Number of moves after which [`MonteCarloHex::run`] stops
    fn move_limit(&self) -> usize {
        let cells = self.shuffle.len();
        match self.max_moves as usize {
            0 => cells,
            limit => limit.min(cells),
        }
    }

    /// Plays the game, writing the board after every move to `out`, and returns the winner or
    /// `None` if the move limit was hit first. BLUE moves first.
    ///
    /// # Errors
    /// Forwards errors of `out` and of `moves`; a human move onto an occupied or non-existent
    /// cell fails with [`ErrorKind::InvalidInput`].
    pub fn run<M, W>(&mut self, moves: &mut M, mut out: W) -> io::Result<Option<Cell>>
    where
        M: MoveSource + ?Sized,
        W: Write,
    {
        writeln!(out, "HEX GAME: Human vs SW")?;
        writeln!(out, "  Human Chose Position: {}", self.human)?;
        writeln!(out, "{}", self.hex)?;

        let limit = self.move_limit();
        while !self.hex.is_play_over() && self.num_moves < limit {
            let player = self.hex.next_player();
            let cell = if player == self.human {
                let cell = moves.next_move(&self.hex, self.open_cells())?;
                if !self.open_cells().contains(&cell) {
                    return Err(io::Error::new(
                        ErrorKind::InvalidInput,
                        format!("cell {cell} is not open"),
                    ));
                }
                cell
            } else {
                self.sw_next_move()
            };

            writeln!(out, "{player} plays {}", self.hex.cell_name(cell))?;
            self.record_next_move(cell);
            writeln!(out, "{}", self.hex)?;
        }

        let winner = self.hex.winner();
        match winner {
            Some(player) => writeln!(out, "WINNER: {player}")?,
            None => writeln!(out, "STOPPED AFTER {} MOVES", self.num_moves)?,
        }
        debug!(moves = self.num_moves, winner = ?winner, "game finished");
        Ok(winner)
    }

    /// Chooses the software's move by Monte-Carlo simulation
    pub fn sw_next_move(&mut self) -> Node {
        let start = Instant::now();
        let mut candidates = self.open_cells().to_vec();
        assert!(!candidates.is_empty(), "no open cell left");
        candidates.shuffle(&mut self.rng);

        let mut best: Option<(u32, Node)> = None;
        for (explored, &candidate) in candidates.iter().enumerate() {
            self.move_to_front(candidate);
            let wins = self.count_wins();
            trace!(candidate, wins, explored, "evaluated candidate");

            if best.is_none_or(|(most, _)| wins > most) {
                best = Some((wins, candidate));
            }
            if start.elapsed() > self.max_move_time {
                debug!(explored, "move time exhausted");
                break;
            }
        }

        best.map_or(candidates[0], |(_, cell)| cell)
    }

    /// Plays out the board from the current permutation, whose first open cell is the
    /// candidate, and counts the games the human loses
    fn count_wins(&mut self) -> u32 {
        let fixed = self.num_moves + 1;
        let rest = self.shuffle.len() - fixed;
        let trials = if rest > factorial_inverse(self.trials) as usize {
            self.trials
        } else {
            rest as u32
        };

        let mut wins = 0;
        for trial in 0..trials {
            if trial > 0 {
                self.shuffle[fixed..].shuffle(&mut self.rng);
            }

            let mut sim = self.hex.speculate();
            for &cell in &self.shuffle[self.num_moves..] {
                sim.set_next_move(cell);
            }
            sim.assess_positions();
            if sim.winner() != Some(self.human) {
                wins += 1;
            }
        }
        wins
    }

    /// Swaps `cell` to the first open position of the permutation.
    /// ** Panics if `cell` is not open **
    fn move_to_front(&mut self, cell: Node) {
        let Some(offset) = self.open_cells().iter().position(|&u| u == cell) else {
            panic!("cell {} is not open", self.hex.cell_name(cell));
        };
        self.shuffle.swap(self.num_moves, self.num_moves + offset);
    }

    /// Plays `cell` for the next player and assesses the board
    fn record_next_move(&mut self, cell: Node) {
        self.move_to_front(cell);
        self.num_moves += 1;

        self.hex.set_next_move(cell);
        self.hex.assess_positions();
    }
}
