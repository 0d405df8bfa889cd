//! In-memory game session and its event reducer.
//!
//! A session moves through `Idle -> InProgress -> Finished`. Every UI
//! layer feeds the same [`Event`]s into [`Session::apply`] and acts on the
//! returned [`Effect`], so no rule is reimplemented per front end.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{Board, CELLS, MoveError, Outcome, Player, rules};

/// Coarse lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Phase {
    /// No move yet.
    Idle,
    /// At least one move, no result.
    InProgress,
    /// Won or drawn; only a reset leaves this phase.
    Finished,
}

/// Display names for both marks. Survive a reset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerNames {
    x: String,
    o: String,
}

impl PlayerNames {
    /// Creates names for X and O.
    pub fn new(x: impl Into<String>, o: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            o: o.into(),
        }
    }

    /// Name shown for the given mark.
    pub fn name(&self, player: Player) -> &str {
        match player {
            Player::X => &self.x,
            Player::O => &self.o,
        }
    }

    fn set(&mut self, player: Player, name: String) {
        match player {
            Player::X => self.x = name,
            Player::O => self.o = name,
        }
    }
}

impl Default for PlayerNames {
    fn default() -> Self {
        Self::new("Player X", "Player O")
    }
}

/// Input to the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A cell was clicked at the given wall-clock time.
    CellClicked {
        /// Board index, 0-8.
        index: usize,
        /// When the click happened.
        at: DateTime<Utc>,
    },
    /// A name input changed. Ignored once a move has been made.
    Rename {
        /// Which name to change.
        player: Player,
        /// The new display name.
        name: String,
    },
    /// "New Game": back to an empty board.
    NewGame,
}

/// Summary of a finished game, ready to be recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct CompletedGame {
    /// Name playing X.
    player_x: String,
    /// Name playing O.
    player_o: String,
    /// Who won, or a draw.
    outcome: Outcome,
    /// Total accepted moves.
    moves: u8,
    /// First move time, if one was captured.
    started_at: Option<DateTime<Utc>>,
    /// Time of the deciding move.
    finished_at: DateTime<Utc>,
}

impl CompletedGame {
    /// Whole seconds between the first and the deciding move.
    ///
    /// `None` when no start marker was captured, never zero in its place.
    #[instrument(skip(self))]
    pub fn duration_seconds(&self) -> Option<u64> {
        self.started_at.map(|start| {
            let elapsed = (self.finished_at - start).num_seconds();
            u64::try_from(elapsed).unwrap_or(0)
        })
    }
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Persist the finished game and refresh the leaderboard.
    RecordGame(CompletedGame),
}

/// Result of applying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// State after the event.
    pub session: Session,
    /// What the caller must do next, if anything.
    pub effect: Option<Effect>,
}

/// One game held in memory until reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    board: Board,
    current_player: Player,
    move_count: u8,
    started_at: Option<DateTime<Utc>>,
    outcome: Option<Outcome>,
    names: PlayerNames,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(PlayerNames::default())
    }
}

impl Session {
    /// Creates an idle session with X to move.
    pub fn new(names: PlayerNames) -> Self {
        Self {
            board: Board::new(),
            current_player: Player::X,
            move_count: 0,
            started_at: None,
            outcome: None,
            names,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player whose turn it is.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Number of accepted moves.
    pub fn move_count(&self) -> u8 {
        self.move_count
    }

    /// Time of the first accepted move.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// The resolved result, once the game is finished.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Display names for both marks.
    pub fn names(&self) -> &PlayerNames {
        &self.names
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        match (self.outcome, self.move_count) {
            (Some(_), _) => Phase::Finished,
            (None, 0) => Phase::Idle,
            (None, _) => Phase::InProgress,
        }
    }

    /// Names may only change before the first move.
    pub fn names_editable(&self) -> bool {
        self.move_count == 0
    }

    /// Status line shown above the board.
    pub fn status_line(&self) -> String {
        match self.outcome {
            Some(Outcome::Draw) => "It's a Draw!".to_string(),
            Some(Outcome::Winner(player)) => format!("{} Wins!", self.names.name(player)),
            None => format!("Current: {}", self.names.name(self.current_player)),
        }
    }

    /// Places the current player's mark at `index`.
    ///
    /// Captures the start marker on the first accepted move. Returns the
    /// outcome if this move decided the game.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] and leaves the session untouched if the game is
    /// over, the index is outside 0-8, or the cell is occupied.
    #[instrument(skip(self), fields(player = %self.current_player, moves = self.move_count))]
    pub fn place(&mut self, index: usize, at: DateTime<Utc>) -> Result<Option<Outcome>, MoveError> {
        if self.outcome.is_some() {
            return Err(MoveError::GameOver);
        }
        if index >= CELLS {
            return Err(MoveError::OutOfBounds(index));
        }
        if !self.board.is_empty(index) {
            return Err(MoveError::CellOccupied(index));
        }

        if self.started_at.is_none() {
            self.started_at = Some(at);
        }
        self.board.place(index, self.current_player);
        self.move_count += 1;
        debug_assert_eq!(usize::from(self.move_count), self.board.occupied());

        match rules::evaluate(&self.board) {
            Some(outcome) => {
                info!(%outcome, moves = self.move_count, "Game finished");
                self.outcome = Some(outcome);
                Ok(Some(outcome))
            }
            None => {
                self.current_player = self.current_player.opponent();
                Ok(None)
            }
        }
    }

    /// Back to an empty board with X to move. Names are kept.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        debug!("Resetting session");
        *self = Self::new(std::mem::take(&mut self.names));
    }

    /// Applies one event and returns the next state plus any effect.
    ///
    /// Rejected clicks and late renames are no-ops.
    #[instrument(skip(self, event))]
    pub fn apply(mut self, event: Event) -> Transition {
        let effect = match event {
            Event::CellClicked { index, at } => match self.place(index, at) {
                Ok(Some(outcome)) => Some(Effect::RecordGame(CompletedGame::new(
                    self.names.x.clone(),
                    self.names.o.clone(),
                    outcome,
                    self.move_count,
                    self.started_at,
                    at,
                ))),
                Ok(None) => None,
                Err(e) => {
                    debug!(index, error = %e, "Click ignored");
                    None
                }
            },
            Event::Rename { player, name } => {
                if self.names_editable() {
                    self.names.set(player, name);
                } else {
                    debug!(%player, "Rename ignored after first move");
                }
                None
            }
            Event::NewGame => {
                self.reset();
                None
            }
        };

        Transition {
            session: self,
            effect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap() + Duration::seconds(secs)
    }

    fn click(session: Session, index: usize, secs: i64) -> Transition {
        session.apply(Event::CellClicked { index, at: t(secs) })
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::default();
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.current_player(), Player::X);
        assert_eq!(session.move_count(), 0);
        assert_eq!(session.started_at(), None);
        assert_eq!(session.status_line(), "Current: Player X");
    }

    #[test]
    fn test_first_move_captures_start_and_toggles_turn() {
        let step = click(Session::default(), 4, 3);
        assert_eq!(step.effect, None);
        let session = step.session;
        assert_eq!(session.phase(), Phase::InProgress);
        assert_eq!(session.started_at(), Some(t(3)));
        assert_eq!(session.current_player(), Player::O);

        let session = click(session, 0, 10).session;
        assert_eq!(session.started_at(), Some(t(3)));
        assert_eq!(session.current_player(), Player::X);
    }

    #[test]
    fn test_occupied_cell_is_noop() {
        let session = click(Session::default(), 4, 0).session;
        let step = click(session.clone(), 4, 1);
        assert_eq!(step.session, session);
        assert_eq!(step.effect, None);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut session = Session::default();
        assert_eq!(session.place(9, t(0)), Err(MoveError::OutOfBounds(9)));
        assert_eq!(session.move_count(), 0);
    }

    #[test]
    fn test_winning_move_emits_record_effect() {
        let mut session = Session::new(PlayerNames::new("Ann", "Bob"));
        // X: 0, 1, 2 ; O: 3, 4
        for (i, index) in [0, 3, 1, 4].into_iter().enumerate() {
            session = click(session, index, i as i64).session;
        }
        let step = click(session, 2, 42);
        let Some(Effect::RecordGame(game)) = step.effect else {
            panic!("expected record effect");
        };
        assert_eq!(game.player_x(), "Ann");
        assert_eq!(game.player_o(), "Bob");
        assert_eq!(*game.outcome(), Outcome::Winner(Player::X));
        assert_eq!(*game.moves(), 5);
        assert_eq!(game.duration_seconds(), Some(42));
        assert_eq!(step.session.phase(), Phase::Finished);
        assert_eq!(step.session.status_line(), "Ann Wins!");
        // Winner keeps the turn marker.
        assert_eq!(step.session.current_player(), Player::X);
    }

    #[test]
    fn test_rename_only_before_first_move() {
        let session = Session::default()
            .apply(Event::Rename {
                player: Player::O,
                name: "Zed".to_string(),
            })
            .session;
        assert_eq!(session.names().name(Player::O), "Zed");

        let session = click(session, 0, 0).session;
        let session = session
            .apply(Event::Rename {
                player: Player::X,
                name: "Late".to_string(),
            })
            .session;
        assert_eq!(session.names().name(Player::X), "Player X");
    }

    #[test]
    fn test_duration_floors_partial_seconds() {
        let game = CompletedGame::new(
            "a".to_string(),
            "b".to_string(),
            Outcome::Draw,
            9,
            Some(t(0)),
            t(7) + Duration::milliseconds(999),
        );
        assert_eq!(game.duration_seconds(), Some(7));
    }

    #[test]
    fn test_missing_start_marker_gives_no_duration() {
        let game = CompletedGame::new(
            "a".to_string(),
            "b".to_string(),
            Outcome::Winner(Player::O),
            7,
            None,
            t(42),
        );
        assert_eq!(game.duration_seconds(), None);
    }
}
