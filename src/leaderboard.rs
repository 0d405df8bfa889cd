//! Leaderboard synchronization: record finished games, refresh the recent list.

use std::fmt::Write as _;

use tracing::{debug, info, instrument, warn};
use ttt_game::CompletedGame;

use crate::store::{GameRecord, NewGameRecord, ScoreStore};

/// Number of records fetched for the leaderboard.
pub const RECENT_LIMIT: usize = 50;

/// Cached view of the most recent games in a [`ScoreStore`].
///
/// Store failures never surface: a failed fetch leaves the cached list as
/// it was, a failed insert drops the game.
#[derive(Debug)]
pub struct Leaderboard<S> {
    store: S,
    games: Vec<GameRecord>,
    total_games: usize,
}

impl<S: ScoreStore> Leaderboard<S> {
    /// Creates an empty leaderboard backed by `store`. Nothing is fetched
    /// until [`Leaderboard::fetch_recent`] runs.
    #[instrument(skip(store))]
    pub fn new(store: S) -> Self {
        info!("Creating Leaderboard");
        Self {
            store,
            games: Vec::new(),
            total_games: 0,
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Cached records, newest first.
    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    /// "Total games played" as shown to players.
    ///
    /// This is the size of the last fetched page, so it never exceeds
    /// [`RECENT_LIMIT`].
    pub fn total_games(&self) -> usize {
        self.total_games
    }

    /// Replaces the cached list with the newest [`RECENT_LIMIT`] records.
    ///
    /// Returns false and keeps the stale list if the store call fails.
    #[instrument(skip(self))]
    pub async fn fetch_recent(&mut self) -> bool {
        match self.store.fetch_recent(RECENT_LIMIT).await {
            Ok(games) => {
                self.total_games = games.len();
                self.games = games;
                info!(total = self.total_games, "Leaderboard refreshed");
                true
            }
            Err(e) => {
                warn!(error = %e, "Leaderboard fetch failed, keeping cached list");
                false
            }
        }
    }

    /// Stores a finished game, then refreshes the list.
    ///
    /// Returns false if the insert failed; the game is then not retried.
    #[instrument(skip(self, game), fields(outcome = %game.outcome(), moves = game.moves()))]
    pub async fn record_game(&mut self, game: &CompletedGame) -> bool {
        let record = NewGameRecord::from(game);
        debug!(duration = ?record.duration_seconds(), "Recording game");

        if let Err(e) = self.store.insert(record).await {
            warn!(error = %e, "Game record dropped");
            return false;
        }

        self.fetch_recent().await;
        true
    }

    /// Plain-text rendering of the cached list.
    pub fn listing(&self) -> String {
        let mut out = format!("Total Games Played: {}\n", self.total_games);
        for game in &self.games {
            let _ = writeln!(
                out,
                "{} vs {} | {} moves • {} | {}",
                game.player_name(),
                game.opponent_name(),
                game.moves(),
                game.duration_display(),
                game.winner_display(),
            );
        }
        out
    }
}
