//! Persistence for finished games.
//!
//! The leaderboard talks to an opaque [`ScoreStore`] with two operations:
//! read the most recent records and insert one. Backends:
//!
//! - [`RestScoreStore`]: hosted table over HTTP
//! - [`SqliteScoreStore`]: local SQLite file via diesel
//! - [`MemoryScoreStore`]: in-process, for tests and offline play

mod error;
mod memory;
mod models;
mod rest;
mod schema; // Diesel generated schema - internal use only
mod sqlite;

pub use error::StoreError;
pub use memory::MemoryScoreStore;
pub use models::{GameRecord, NewGameRecord, Winner, format_duration};
pub use rest::{DEFAULT_TABLE, RestScoreStore};
pub use sqlite::SqliteScoreStore;

use async_trait::async_trait;

/// Remote collection of finished games.
#[async_trait]
pub trait ScoreStore: Send + Sync + std::fmt::Debug {
    /// Returns up to `limit` records ordered by creation time, newest first.
    async fn fetch_recent(&self, limit: usize) -> Result<Vec<GameRecord>, StoreError>;

    /// Inserts one finished game.
    async fn insert(&self, record: NewGameRecord) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    async fn fetch_recent(&self, limit: usize) -> Result<Vec<GameRecord>, StoreError> {
        (**self).fetch_recent(limit).await
    }

    async fn insert(&self, record: NewGameRecord) -> Result<(), StoreError> {
        (**self).insert(record).await
    }
}
