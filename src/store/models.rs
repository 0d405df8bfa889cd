//! Leaderboard record types shared by every store backend.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::instrument;
use ttt_game::{CompletedGame, Outcome, Player};

use crate::store::StoreError;

/// Who won a recorded game, as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    /// Player X completed a line.
    X,
    /// Player O completed a line.
    O,
    /// Board filled without a line.
    Draw,
}

impl Winner {
    /// Converts winner to the string stored in the table.
    #[instrument]
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::X => "X",
            Self::O => "O",
            Self::Draw => "Draw",
        }
    }

    /// Parses winner from the string stored in the table.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the string is not a valid winner value.
    #[instrument(skip(s), fields(s = %s))]
    pub fn from_db_string(s: &str) -> Result<Self, StoreError> {
        match s {
            "X" => Ok(Self::X),
            "O" => Ok(Self::O),
            "Draw" => Ok(Self::Draw),
            _ => Err(StoreError::new(format!("Invalid winner: '{}'", s))),
        }
    }
}

impl From<Outcome> for Winner {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Winner(Player::X) => Self::X,
            Outcome::Winner(Player::O) => Self::O,
            Outcome::Draw => Self::Draw,
        }
    }
}

/// A finished game as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct GameRecord {
    /// Store-assigned identifier (UUID or integer, kept as text).
    #[serde(deserialize_with = "id_from_text_or_number")]
    id: String,
    /// Name playing X.
    player_name: String,
    /// Name playing O.
    opponent_name: String,
    winner: Winner,
    moves: u32,
    /// Absent when no start marker was captured.
    duration_seconds: Option<u64>,
    created_at: DateTime<Utc>,
}

impl GameRecord {
    /// Name to show in the winner column.
    pub fn winner_display(&self) -> &str {
        match self.winner {
            Winner::Draw => "Draw",
            Winner::X => &self.player_name,
            Winner::O => &self.opponent_name,
        }
    }

    /// Human-readable duration, see [`format_duration`].
    pub fn duration_display(&self) -> String {
        format_duration(self.duration_seconds)
    }
}

/// Formats a duration as `"1m 5s"` or `"42s"`.
///
/// Missing and zero durations both show as `"N/A"`.
#[instrument]
pub fn format_duration(seconds: Option<u64>) -> String {
    match seconds {
        None | Some(0) => "N/A".to_string(),
        Some(s) if s >= 60 => format!("{}m {}s", s / 60, s % 60),
        Some(s) => format!("{}s", s),
    }
}

/// Values inserted for a newly finished game. The store assigns id and
/// creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct NewGameRecord {
    player_name: String,
    opponent_name: String,
    winner: Winner,
    moves: u32,
    duration_seconds: Option<u64>,
}

impl From<&CompletedGame> for NewGameRecord {
    fn from(game: &CompletedGame) -> Self {
        Self::new(
            game.player_x().clone(),
            game.player_o().clone(),
            (*game.outcome()).into(),
            u32::from(*game.moves()),
            game.duration_seconds(),
        )
    }
}

fn id_from_text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
