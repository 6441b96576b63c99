/*!
# Games

The board game *Hex* modelled on top of the graph engine:

- [`Hex`]: the board as an [`AttrGraph`](crate::repr::AttrGraph) of [`Cell`]s on a hexagonal
  lattice; win checks are depth-first searches restricted to one player's cells,
- [`MonteCarloHex`]: a software player choosing moves by playing random games to the end.

Rows are labelled by letters starting with `A` (North to South), columns by numbers starting
with `0` (West to East). BLUE moves first and connects West with East, RED connects North with
South.
*/

use std::fmt::Display;

use crate::{algo::*, error::*, prelude::*};

mod hex;
mod mc_hex;

pub use hex::*;
pub use mc_hex::*;

/// Smallest supported board dimension
pub const MIN_DIMENSION: u32 = 3;

/// Largest supported board dimension; rows are labelled `A` to `Z`
pub const MAX_DIMENSION: u32 = 26;

/// Board dimension of [`Hex::default`]
pub const DEFAULT_DIMENSION: u32 = 5;

/// State of a board cell; doubles as the identity of a player
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Blue,
    Red,
}

impl Cell {
    /// Player moving after `self`: BLUE opens the game, then BLUE and RED alternate
    pub fn next_player(self) -> Cell {
        match self {
            Cell::Empty | Cell::Red => Cell::Blue,
            Cell::Blue => Cell::Red,
        }
    }

    /// The other player; `Empty` has no opponent
    pub fn opponent(self) -> Cell {
        match self {
            Cell::Empty => Cell::Empty,
            Cell::Blue => Cell::Red,
            Cell::Red => Cell::Blue,
        }
    }

    /// Board symbol
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Blue => 'X',
            Cell::Red => '#',
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Cell::Empty => "EMPTY",
            Cell::Blue => "BLUE",
            Cell::Red => "RED",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_cycle() {
        assert_eq!(Cell::Empty.next_player(), Cell::Blue);
        assert_eq!(Cell::Blue.next_player(), Cell::Red);
        assert_eq!(Cell::Red.next_player(), Cell::Blue);
        assert_eq!(Cell::Red.opponent(), Cell::Blue);
        assert_eq!(Cell::Empty.opponent(), Cell::Empty);
    }

    #[test]
    fn rendering() {
        assert_eq!(
            [Cell::Empty, Cell::Blue, Cell::Red].map(Cell::symbol),
            ['.', 'X', '#']
        );
        assert_eq!(Cell::Blue.to_string(), "BLUE");
    }
}
