//! Hosted score store reached over a PostgREST-style HTTP interface.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Url};
use tracing::{debug, info, instrument};

use crate::store::{GameRecord, NewGameRecord, ScoreStore, StoreError};

/// Default table holding finished games.
pub const DEFAULT_TABLE: &str = "tic_tac_toe_scores";

/// Score store backed by a hosted table.
///
/// Reads with `GET {base}/rest/v1/{table}?select=*&order=created_at.desc&limit=N`
/// and writes with `POST {base}/rest/v1/{table}`.
#[derive(Debug, Clone)]
pub struct RestScoreStore {
    base_url: String,
    table: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl RestScoreStore {
    /// Creates a client for the table at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if `base_url` is not a valid URL.
    #[instrument(skip(api_key), fields(has_key = api_key.is_some()))]
    pub fn new(
        base_url: String,
        table: String,
        api_key: Option<String>,
    ) -> Result<Self, StoreError> {
        Url::parse(&base_url)
            .map_err(|e| StoreError::new(format!("Invalid store URL '{}': {}", base_url, e)))?;
        info!(base_url = %base_url, table = %table, "Creating RestScoreStore");
        Ok(Self {
            base_url,
            table,
            api_key,
            client: reqwest::Client::new(),
        })
    }

    /// Collection endpoint for the table.
    fn endpoint(&self) -> Result<Url, StoreError> {
        let url = format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), self.table);
        Url::parse(&url).map_err(|e| StoreError::new(format!("Invalid endpoint '{}': {}", url, e)))
    }

    /// Attaches credentials when configured.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("apikey", key).bearer_auth(key),
            None => request,
        }
    }
}

#[async_trait]
impl ScoreStore for RestScoreStore {
    #[instrument(skip(self), fields(table = %self.table))]
    async fn fetch_recent(&self, limit: usize) -> Result<Vec<GameRecord>, StoreError> {
        let mut url = self.endpoint()?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("order", "created_at.desc")
            .append_pair("limit", &limit.to_string());
        debug!(url = %url, "Fetching recent games");

        let records: Vec<GameRecord> = self
            .authorize(self.client.get(url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        info!(count = records.len(), "Recent games fetched");
        Ok(records)
    }

    #[instrument(skip(self, record), fields(table = %self.table, winner = %record.winner().to_db_string()))]
    async fn insert(&self, record: NewGameRecord) -> Result<(), StoreError> {
        let url = self.endpoint()?;
        debug!(url = %url, "Inserting game record");

        self.authorize(self.client.post(url))
            .header("Prefer", "return=minimal")
            .json(&record)
            .send()
            .await?
            .error_for_status()?;

        info!("Game record inserted");
        Ok(())
    }
}
