//! Tests for the SQLite score store.

use tempfile::NamedTempFile;

use ttt_leaderboard::{Leaderboard, NewGameRecord, ScoreStore, SqliteScoreStore, Winner};

/// Creates a temporary database file with schema applied, returns the file
/// handle (must stay in scope to keep the file alive) and a ready store.
fn setup_test_db() -> (NamedTempFile, SqliteScoreStore) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let store = SqliteScoreStore::open(db_path).expect("Failed to open store");
    (db_file, store)
}

fn record(name: &str, winner: Winner, duration: Option<u64>) -> NewGameRecord {
    NewGameRecord::new(name.to_string(), "Opponent".to_string(), winner, 7, duration)
}

#[test]
fn test_empty_store_returns_nothing() {
    let (_db, store) = setup_test_db();
    let records = store.load_recent(50).expect("Query failed");
    assert!(records.is_empty());
}

#[test]
fn test_insert_then_load_round_trips_fields() {
    let (_db, store) = setup_test_db();
    store
        .insert_record(record("Ann", Winner::O, Some(42)))
        .expect("Insert failed");

    let records = store.load_recent(50).expect("Query failed");
    assert_eq!(records.len(), 1);
    let game = &records[0];
    assert_eq!(game.player_name(), "Ann");
    assert_eq!(game.opponent_name(), "Opponent");
    assert_eq!(*game.winner(), Winner::O);
    assert_eq!(*game.moves(), 7);
    assert_eq!(*game.duration_seconds(), Some(42));
    assert!(!game.id().is_empty());
}

#[test]
fn test_null_duration_is_kept() {
    let (_db, store) = setup_test_db();
    store
        .insert_record(record("Ann", Winner::Draw, None))
        .expect("Insert failed");
    let records = store.load_recent(50).expect("Query failed");
    assert_eq!(*records[0].duration_seconds(), None);
    assert_eq!(records[0].duration_display(), "N/A");
}

#[test]
fn test_load_is_newest_first_and_limited() {
    let (_db, store) = setup_test_db();
    for i in 0..5 {
        store
            .insert_record(record(&format!("P{i}"), Winner::X, Some(10)))
            .expect("Insert failed");
    }

    let records = store.load_recent(3).expect("Query failed");
    let names: Vec<&str> = records.iter().map(|r| r.player_name().as_str()).collect();
    assert_eq!(names, vec!["P4", "P3", "P2"]);
}

#[test]
fn test_reopen_keeps_records() {
    let (db, store) = setup_test_db();
    store
        .insert_record(record("Ann", Winner::X, Some(5)))
        .expect("Insert failed");

    let path = db.path().to_str().expect("Invalid path").to_string();
    let reopened = SqliteScoreStore::open(path).expect("Reopen failed");
    assert_eq!(reopened.load_recent(50).expect("Query failed").len(), 1);
}

#[test]
fn test_open_bad_path_fails() {
    let result = SqliteScoreStore::open("/nonexistent-dir/sub/scores.db".to_string());
    assert!(result.is_err());
}

#[tokio::test]
async fn test_trait_calls_and_leaderboard_refresh() {
    let (_db, store) = setup_test_db();
    store
        .insert(record("Ann", Winner::X, Some(65)))
        .await
        .expect("Insert failed");
    assert_eq!(store.fetch_recent(50).await.expect("Fetch failed").len(), 1);

    let mut leaderboard = Leaderboard::new(store);
    assert!(leaderboard.fetch_recent().await);
    assert_eq!(leaderboard.total_games(), 1);
    assert_eq!(leaderboard.games()[0].duration_display(), "1m 5s");
    assert_eq!(leaderboard.games()[0].winner_display(), "Ann");
}
