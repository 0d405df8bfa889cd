//! Core domain types for tic-tac-toe.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nobody has played here yet.
    #[default]
    Empty,
    /// Cell holds a player's mark.
    Occupied(Player),
}

impl Cell {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }

    /// Returns true if no mark has been placed here.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Number of cells on the board.
pub const CELLS: usize = 9;

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; CELLS],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from cells in row-major order.
    pub fn from_cells(cells: [Cell; CELLS]) -> Self {
        Self { cells }
    }

    /// Gets the cell at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Checks if the cell at `index` exists and is empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Places a mark. Callers validate bounds and occupancy first.
    pub(crate) fn place(&mut self, index: usize, player: Player) {
        self.cells[index] = Cell::Occupied(player);
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    /// Number of cells holding a mark.
    #[instrument(skip(self))]
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Formats the board as a human-readable grid. Empty cells show
    /// their 1-based key.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                let symbol = match self.cells[index] {
                    Cell::Empty => (index + 1).to_string(),
                    Cell::Occupied(player) => player.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

/// Error parsing a board from its compact text form.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ParseBoardError {
    /// Wrong number of cells.
    #[display("Expected 9 cells, found {}", _0)]
    WrongLength(usize),
    /// A character that is not `X`, `O`, `_` or `.`.
    #[display("Invalid cell character '{}'", _0)]
    InvalidCell(char),
}

impl std::error::Error for ParseBoardError {}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses nine cells such as `"XXX_OO___"`. `_` and `.` are empty,
    /// whitespace and commas are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(CELLS);
        for c in s.chars().filter(|c| !c.is_whitespace() && *c != ',') {
            let cell = match c {
                'X' | 'x' => Cell::Occupied(Player::X),
                'O' | 'o' => Cell::Occupied(Player::O),
                '_' | '.' => Cell::Empty,
                other => return Err(ParseBoardError::InvalidCell(other)),
            };
            cells.push(cell);
        }
        let cells: [Cell; CELLS] = cells
            .try_into()
            .map_err(|v: Vec<Cell>| ParseBoardError::WrongLength(v.len()))?;
        Ok(Self::from_cells(cells))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_board() {
        let board: Board = "XXX_OO___".parse().expect("valid board");
        assert_eq!(board.get(0), Some(Cell::Occupied(Player::X)));
        assert_eq!(board.get(3), Some(Cell::Empty));
        assert_eq!(board.get(5), Some(Cell::Occupied(Player::O)));
        assert_eq!(board.occupied(), 5);
    }

    #[test]
    fn test_parse_board_rejects_bad_input() {
        assert_eq!(
            "XX".parse::<Board>(),
            Err(ParseBoardError::WrongLength(2))
        );
        assert_eq!(
            "XXZ______".parse::<Board>(),
            Err(ParseBoardError::InvalidCell('Z'))
        );
    }

    #[test]
    fn test_display_shows_keys_for_empty_cells() {
        let board: Board = "X___O___.".parse().expect("valid board");
        assert_eq!(board.display(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }
}
