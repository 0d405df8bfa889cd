//! Reasons a move is rejected.

/// Error that can occur when placing a mark.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The cell at the index already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(usize),

    /// The index is not one of the 9 cells.
    #[display("Cell {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),

    /// The game already has a result.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for MoveError {}
