//! Keyboard helpers for board navigation.

use crossterm::event::KeyCode;

/// Moves the cursor one cell with the arrow keys, stopping at the edges.
pub fn move_cursor(cursor: usize, key: KeyCode) -> usize {
    let (row, col) = (cursor / 3, cursor % 3);
    match key {
        KeyCode::Left if col > 0 => cursor - 1,
        KeyCode::Right if col < 2 => cursor + 1,
        KeyCode::Up if row > 0 => cursor - 3,
        KeyCode::Down if row < 2 => cursor + 3,
        _ => cursor,
    }
}

/// Maps the keys `1`-`9` to cells 0-8, laid out like the board display.
pub fn digit_cell(c: char) -> Option<usize> {
    match c.to_digit(10) {
        Some(d @ 1..=9) => Some(d as usize - 1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_moves_within_grid() {
        assert_eq!(move_cursor(4, KeyCode::Left), 3);
        assert_eq!(move_cursor(4, KeyCode::Right), 5);
        assert_eq!(move_cursor(4, KeyCode::Up), 1);
        assert_eq!(move_cursor(4, KeyCode::Down), 7);
    }

    #[test]
    fn test_cursor_stops_at_edges() {
        assert_eq!(move_cursor(3, KeyCode::Left), 3);
        assert_eq!(move_cursor(5, KeyCode::Right), 5);
        assert_eq!(move_cursor(1, KeyCode::Up), 1);
        assert_eq!(move_cursor(7, KeyCode::Down), 7);
    }

    #[test]
    fn test_digit_cells() {
        assert_eq!(digit_cell('1'), Some(0));
        assert_eq!(digit_cell('9'), Some(8));
        assert_eq!(digit_cell('0'), None);
        assert_eq!(digit_cell('x'), None);
    }
}
