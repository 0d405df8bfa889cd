//! Glue between the session reducer and the leaderboard.

use chrono::Utc;
use tracing::{debug, info, instrument};
use ttt_game::{Effect, Event, PlayerNames, Session, Transition};

use crate::leaderboard::Leaderboard;
use crate::store::ScoreStore;

/// What happened when an event was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    /// State updated (or the event was ignored); nothing to persist.
    Applied,
    /// The game finished and its record was stored.
    Recorded,
    /// The game finished but the insert failed; the record is lost.
    RecordDropped,
}

/// Owns one session and the leaderboard it reports to.
///
/// Every front end drives play through [`GameController::dispatch`], so the
/// insert-then-refresh sequence runs the same way everywhere.
#[derive(Debug)]
pub struct GameController<S> {
    session: Session,
    leaderboard: Leaderboard<S>,
}

impl<S: ScoreStore> GameController<S> {
    /// Creates a controller with an idle session.
    #[instrument(skip(names, leaderboard))]
    pub fn new(names: PlayerNames, leaderboard: Leaderboard<S>) -> Self {
        info!(x = %names.name(ttt_game::Player::X), o = %names.name(ttt_game::Player::O), "Creating GameController");
        Self {
            session: Session::new(names),
            leaderboard,
        }
    }

    /// Current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Leaderboard view.
    pub fn leaderboard(&self) -> &Leaderboard<S> {
        &self.leaderboard
    }

    /// Initial leaderboard load.
    #[instrument(skip(self))]
    pub async fn mount(&mut self) {
        self.leaderboard.fetch_recent().await;
    }

    /// Applies an event and runs the effect it produces.
    #[instrument(skip(self))]
    pub async fn dispatch(&mut self, event: Event) -> Dispatched {
        let Transition { session, effect } = std::mem::take(&mut self.session).apply(event);
        self.session = session;

        match effect {
            Some(Effect::RecordGame(game)) => {
                if self.leaderboard.record_game(&game).await {
                    Dispatched::Recorded
                } else {
                    Dispatched::RecordDropped
                }
            }
            None => {
                debug!(phase = %self.session.phase(), "Event applied");
                Dispatched::Applied
            }
        }
    }

    /// Clicks a cell now.
    pub async fn click(&mut self, index: usize) -> Dispatched {
        self.dispatch(Event::CellClicked {
            index,
            at: Utc::now(),
        })
        .await
    }
}
