//! In-process score store.
//!
//! Holds records in a shared vector. Fetch and insert failures can be
//! switched on to exercise the leaderboard's silent-failure paths.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, instrument};

use crate::store::{GameRecord, NewGameRecord, ScoreStore, StoreError};

#[derive(Debug, Default)]
struct MemoryState {
    records: Vec<GameRecord>,
    next_id: u64,
    fail_fetch: bool,
    fail_insert: bool,
}

/// Score store kept in memory. Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryScoreStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with `records`, oldest first.
    pub fn with_records(records: Vec<GameRecord>) -> Self {
        let next_id = records.len() as u64;
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                records,
                next_id,
                ..MemoryState::default()
            })),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::new("Memory store lock poisoned"))
    }

    /// Snapshot of every stored record, oldest first.
    pub fn records(&self) -> Vec<GameRecord> {
        self.lock().map(|s| s.records.clone()).unwrap_or_default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.lock().map(|s| s.records.len()).unwrap_or(0)
    }

    /// Checks if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Makes subsequent fetches fail.
    pub fn set_fail_fetch(&self, fail: bool) {
        if let Ok(mut state) = self.lock() {
            state.fail_fetch = fail;
        }
    }

    /// Makes subsequent inserts fail.
    pub fn set_fail_insert(&self, fail: bool) {
        if let Ok(mut state) = self.lock() {
            state.fail_insert = fail;
        }
    }
}

#[async_trait]
impl ScoreStore for MemoryScoreStore {
    #[instrument(skip(self))]
    async fn fetch_recent(&self, limit: usize) -> Result<Vec<GameRecord>, StoreError> {
        let state = self.lock()?;
        if state.fail_fetch {
            return Err(StoreError::new("Fetch failed (simulated)"));
        }

        // Newest insert first among equal timestamps.
        let mut records: Vec<GameRecord> = state.records.iter().rev().cloned().collect();
        records.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        records.truncate(limit);
        debug!(count = records.len(), "Recent games read from memory");
        Ok(records)
    }

    #[instrument(skip(self, record))]
    async fn insert(&self, record: NewGameRecord) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        if state.fail_insert {
            return Err(StoreError::new("Insert failed (simulated)"));
        }

        state.next_id += 1;
        let stored = GameRecord::new(
            state.next_id.to_string(),
            record.player_name().clone(),
            record.opponent_name().clone(),
            *record.winner(),
            *record.moves(),
            *record.duration_seconds(),
            Utc::now(),
        );
        debug!(id = %stored.id(), "Game record stored in memory");
        state.records.push(stored);
        Ok(())
    }
}
