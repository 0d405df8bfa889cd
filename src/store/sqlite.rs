//! Local SQLite score store.

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::store::{GameRecord, NewGameRecord, ScoreStore, StoreError, Winner, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Row as stored in `tic_tac_toe_scores`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = schema::tic_tac_toe_scores)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct ScoreRow {
    id: i32,
    player_name: String,
    opponent_name: String,
    winner: String,
    moves: i32,
    duration_seconds: Option<i32>,
    created_at: NaiveDateTime,
}

impl TryFrom<ScoreRow> for GameRecord {
    type Error = StoreError;

    fn try_from(row: ScoreRow) -> Result<Self, Self::Error> {
        let moves = u32::try_from(row.moves)
            .map_err(|_| StoreError::new(format!("Negative move count {} in row {}", row.moves, row.id)))?;
        let duration_seconds = row
            .duration_seconds
            .map(|d| {
                u64::try_from(d)
                    .map_err(|_| StoreError::new(format!("Negative duration {} in row {}", d, row.id)))
            })
            .transpose()?;

        Ok(GameRecord::new(
            row.id.to_string(),
            row.player_name,
            row.opponent_name,
            Winner::from_db_string(&row.winner)?,
            moves,
            duration_seconds,
            row.created_at.and_utc(),
        ))
    }
}

/// Insertable row. Creation time is stamped client-side with sub-second
/// precision so recency ordering stays stable.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::tic_tac_toe_scores)]
struct NewScoreRow {
    player_name: String,
    opponent_name: String,
    winner: String,
    moves: i32,
    duration_seconds: Option<i32>,
    created_at: NaiveDateTime,
}

impl TryFrom<NewGameRecord> for NewScoreRow {
    type Error = StoreError;

    fn try_from(record: NewGameRecord) -> Result<Self, Self::Error> {
        let moves = i32::try_from(*record.moves())
            .map_err(|_| StoreError::new(format!("Move count {} too large", record.moves())))?;
        let duration_seconds = record
            .duration_seconds()
            .map(|d| i32::try_from(d).map_err(|_| StoreError::new(format!("Duration {} too large", d))))
            .transpose()?;

        Ok(Self {
            player_name: record.player_name().clone(),
            opponent_name: record.opponent_name().clone(),
            winner: record.winner().to_db_string().to_string(),
            moves,
            duration_seconds,
            created_at: Utc::now().naive_utc(),
        })
    }
}

/// Score store backed by a SQLite file.
///
/// Each call opens its own connection, so use a file path rather than
/// `":memory:"`.
#[derive(Debug, Clone)]
pub struct SqliteScoreStore {
    db_path: String,
}

impl SqliteScoreStore {
    /// Opens the database at `db_path`, creating the table if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, StoreError> {
        info!(path = %db_path, "Opening SqliteScoreStore");
        let store = Self { db_path };
        let mut conn = store.connection()?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::new(format!("Migrations failed: {}", e)))?;
        Ok(store)
    }

    /// Path of the database file.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StoreError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| StoreError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Loads up to `limit` records, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a database error occurs or a row is malformed.
    #[instrument(skip(self))]
    pub fn load_recent(&self, limit: usize) -> Result<Vec<GameRecord>, StoreError> {
        use schema::tic_tac_toe_scores::dsl;

        let mut conn = self.connection()?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows = dsl::tic_tac_toe_scores
            .order((dsl::created_at.desc(), dsl::id.desc()))
            .limit(limit)
            .select(ScoreRow::as_select())
            .load(&mut conn)?;

        let records = rows
            .into_iter()
            .map(GameRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        info!(count = records.len(), "Recent games loaded");
        Ok(records)
    }

    /// Inserts one finished game.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a database error occurs.
    #[instrument(skip(self, record), fields(winner = %record.winner().to_db_string(), moves = record.moves()))]
    pub fn insert_record(&self, record: NewGameRecord) -> Result<(), StoreError> {
        let row = NewScoreRow::try_from(record)?;
        let mut conn = self.connection()?;

        diesel::insert_into(schema::tic_tac_toe_scores::table)
            .values(&row)
            .execute(&mut conn)?;

        info!("Game record inserted");
        Ok(())
    }
}

#[async_trait]
impl ScoreStore for SqliteScoreStore {
    async fn fetch_recent(&self, limit: usize) -> Result<Vec<GameRecord>, StoreError> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.load_recent(limit)).await?
    }

    async fn insert(&self, record: NewGameRecord) -> Result<(), StoreError> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.insert_record(record)).await?
    }
}
