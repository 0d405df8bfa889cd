//! Configuration: TOML file, environment, then command-line overrides.

use std::path::Path;

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use ttt_game::PlayerNames;

use crate::store::{
    DEFAULT_TABLE, MemoryScoreStore, RestScoreStore, ScoreStore, SqliteScoreStore, StoreError,
};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "ttt_leaderboard.toml";

/// Environment variable holding the hosted store's API key.
pub const API_KEY_VAR: &str = "LEADERBOARD_API_KEY";

/// Environment variable overriding `store.url`.
pub const URL_VAR: &str = "LEADERBOARD_URL";

/// Which store backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Hosted table over HTTP.
    #[default]
    Rest,
    /// Local SQLite file.
    Sqlite,
    /// In-process only; nothing survives the run.
    Memory,
}

/// Store settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[serde(default)]
#[setters(prefix = "with_")]
pub struct StoreConfig {
    /// Backend kind.
    backend: Backend,
    /// Base URL of the hosted store.
    url: Option<String>,
    /// Table holding finished games.
    table: String,
    /// SQLite file for the `sqlite` backend.
    sqlite_path: String,
    /// Credential for the hosted store. Only read from the environment.
    #[serde(skip)]
    api_key: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            url: None,
            table: DEFAULT_TABLE.to_string(),
            sqlite_path: "tictactoe.db".to_string(),
            api_key: None,
        }
    }
}

impl StoreConfig {
    /// Builds the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the `rest` backend has no URL or the SQLite
    /// file cannot be opened.
    #[instrument(skip(self), fields(backend = ?self.backend))]
    pub fn open(&self) -> Result<Box<dyn ScoreStore>, StoreError> {
        let store: Box<dyn ScoreStore> = match self.backend {
            Backend::Rest => {
                let url = self.url.clone().ok_or_else(|| {
                    StoreError::new(format!("rest backend needs store.url or {}", URL_VAR))
                })?;
                Box::new(RestScoreStore::new(url, self.table.clone(), self.api_key.clone())?)
            }
            Backend::Sqlite => Box::new(SqliteScoreStore::open(self.sqlite_path.clone())?),
            Backend::Memory => Box::new(MemoryScoreStore::new()),
        };
        info!("Score store ready");
        Ok(store)
    }
}

/// Default display names.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    /// Name playing X.
    x: String,
    /// Name playing O.
    o: String,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        Self {
            x: "Player X".to_string(),
            o: "Player O".to_string(),
        }
    }
}

impl PlayersConfig {
    /// Names for a new session.
    pub fn names(&self) -> PlayerNames {
        PlayerNames::new(self.x.clone(), self.o.clone())
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[serde(default)]
#[setters(prefix = "with_")]
pub struct Config {
    /// Store settings.
    store: StoreConfig,
    /// Default player names.
    players: PlayersConfig,
}

impl Config {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid configuration.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml_str(&content)?;
        info!(backend = ?config.store.backend, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if given, else [`DEFAULT_CONFIG_FILE`] if present, else
    /// defaults. Environment variables are applied on top.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an explicit file is missing or any file is invalid.
    #[instrument(skip(path))]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE)?,
            None => {
                debug!("No config file, using defaults");
                Self::default()
            }
        };
        Ok(config.with_env(|key| std::env::var(key).ok()))
    }

    /// Applies [`API_KEY_VAR`] and [`URL_VAR`] using `lookup`.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup(API_KEY_VAR).filter(|k| !k.is_empty()) {
            debug!("API key taken from environment");
            self.store.api_key = Some(key);
        }
        if let Some(url) = lookup(URL_VAR).filter(|u| !u.is_empty()) {
            debug!(url = %url, "Store URL taken from environment");
            self.store.url = Some(url);
        }
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
