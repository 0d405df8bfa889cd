//! Tic-tac-toe with a persisted global leaderboard.
//!
//! # Architecture
//!
//! - **Game**: the pure session reducer lives in [`ttt_game`]
//! - **Store**: [`ScoreStore`] backends for finished games (hosted, SQLite, memory)
//! - **Leaderboard**: cached newest-first list, refreshed after every insert
//! - **Controller**: runs reducer effects against the leaderboard
//!
//! # Example
//!
//! ```no_run
//! use ttt_leaderboard::{GameController, Leaderboard, MemoryScoreStore};
//! use ttt_game::PlayerNames;
//!
//! # async fn example() {
//! let leaderboard = Leaderboard::new(MemoryScoreStore::new());
//! let mut controller = GameController::new(PlayerNames::new("Ann", "Bob"), leaderboard);
//! controller.mount().await;
//! for cell in [0, 3, 1, 4, 2] {
//!     controller.click(cell).await;
//! }
//! assert_eq!(controller.leaderboard().total_games(), 1);
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod controller;
mod leaderboard;
mod script;
mod store;

// Crate-level exports - Configuration
pub use config::{
    API_KEY_VAR, Backend, Config, ConfigError, DEFAULT_CONFIG_FILE, PlayersConfig, StoreConfig,
    URL_VAR,
};

// Crate-level exports - Game flow
pub use controller::{Dispatched, GameController};
pub use leaderboard::{Leaderboard, RECENT_LIMIT};
pub use script::{ScriptReport, run_script};

// Crate-level exports - Persistence
pub use store::{
    DEFAULT_TABLE, GameRecord, MemoryScoreStore, NewGameRecord, RestScoreStore, ScoreStore,
    SqliteScoreStore, StoreError, Winner, format_duration,
};
