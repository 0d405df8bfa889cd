//! Win detection logic for tic-tac-toe.

use tracing::instrument;

use crate::{Board, Cell, Player};

/// The 8 winning lines as board indices.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Checks if there is a winner on the board.
///
/// Returns `Some(player)` for the first line holding three of the
/// player's marks, `None` otherwise.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Player> {
    let cells = board.cells();
    LINES.iter().find_map(|&[a, b, c]| match cells[a] {
        Cell::Occupied(player) if cells[b] == cells[a] && cells[c] == cells[a] => Some(player),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_column() {
        let board: Board = "_O__O__O_".parse().expect("valid board");
        assert_eq!(check_winner(&board), Some(Player::O));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board: Board = "__X_X_X__".parse().expect("valid board");
        assert_eq!(check_winner(&board), Some(Player::X));
    }

    #[test]
    fn test_no_winner_mixed_line() {
        let board: Board = "XXO______".parse().expect("valid board");
        assert_eq!(check_winner(&board), None);
    }
}
