//! Pure tic-tac-toe game logic.
//!
//! - [`Board`] and [`Cell`]: the 3x3 grid, row-major indices 0-8.
//! - [`rules::evaluate`]: the win/draw detector.
//! - [`Session`]: one game held in memory, driven by [`Event`]s through
//!   [`Session::apply`], which hands back an [`Effect`] when a finished
//!   game should be recorded.
//!
//! Nothing here performs I/O; callers inject timestamps with each click.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod outcome;
pub mod rules;
mod session;
mod types;

pub use error::MoveError;
pub use outcome::Outcome;
pub use session::{CompletedGame, Effect, Event, Phase, PlayerNames, Session, Transition};
pub use types::{Board, CELLS, Cell, ParseBoardError, Player};
