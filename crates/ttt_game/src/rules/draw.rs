//! Draw detection logic for tic-tac-toe.

use tracing::instrument;

use crate::Board;

/// Checks if the board is full (all cells occupied).
///
/// A full board with no winner is a draw.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|c| !c.is_empty())
}
