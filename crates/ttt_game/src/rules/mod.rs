//! Game rules for tic-tac-toe.
//!
//! Pure functions for evaluating a board. Rules are separated from board
//! storage so the session reducer and any display layer share one detector.

mod draw;
mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner};

use tracing::instrument;

use crate::{Board, Outcome};

/// Win/draw detector.
///
/// Returns the winning mark if any line holds three equal marks, a draw
/// if the board is full without such a line, and `None` while the game
/// can still continue.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> Option<Outcome> {
    if let Some(player) = check_winner(board) {
        return Some(Outcome::Winner(player));
    }
    if is_full(board) {
        return Some(Outcome::Draw);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Player;

    fn board(s: &str) -> Board {
        s.parse().expect("valid board")
    }

    #[test]
    fn test_top_row_wins() {
        assert_eq!(
            evaluate(&board("XXX_OO___")),
            Some(Outcome::Winner(Player::X))
        );
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        assert_eq!(evaluate(&board("XOXOXOOXO")), Some(Outcome::Draw));
    }

    #[test]
    fn test_open_board_has_no_result() {
        assert_eq!(evaluate(&board("XO_______")), None);
        assert_eq!(evaluate(&Board::new()), None);
    }

    #[test]
    fn test_win_on_full_board_beats_draw() {
        // Last mark completes the bottom row and fills the board.
        assert_eq!(
            evaluate(&board("XOXOXOOOO")),
            Some(Outcome::Winner(Player::O))
        );
    }

    #[test]
    fn test_every_line_is_detected_for_both_players() {
        for player in [Player::X, Player::O] {
            for line in LINES {
                let mut cells = ['_'; 9];
                for index in line {
                    cells[index] = if player == Player::X { 'X' } else { 'O' };
                }
                let text: String = cells.iter().collect();
                assert_eq!(
                    evaluate(&board(&text)),
                    Some(Outcome::Winner(player)),
                    "line {:?}",
                    line
                );
            }
        }
    }
}
