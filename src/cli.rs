//! Command-line interface for ttt_leaderboard.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ttt_leaderboard::{Backend, Config};

/// Tic-tac-toe with a global leaderboard
#[derive(Parser, Debug)]
#[command(name = "ttt_leaderboard")]
#[command(about = "Play tic-tac-toe and compete on the global leaderboard", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (default: ./ttt_leaderboard.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Store backend override
    #[arg(long, global = true, value_enum)]
    pub backend: Option<Backend>,

    /// Hosted store base URL override
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// SQLite file override
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play,

    /// Print the most recent games
    Leaderboard,

    /// Play a fixed list of cells (0-8) and record the result
    Script {
        /// Name playing X
        #[arg(long)]
        x: Option<String>,

        /// Name playing O
        #[arg(long)]
        o: Option<String>,

        /// Cells to click, in order
        #[arg(required = true)]
        cells: Vec<usize>,
    },
}

impl Cli {
    /// Applies command-line overrides on top of a loaded config.
    pub fn apply(&self, config: Config) -> Config {
        let mut store = config.store().clone();
        if let Some(backend) = self.backend {
            store = store.with_backend(backend);
        }
        if let Some(url) = &self.url {
            store = store.with_url(Some(url.clone()));
        }
        if let Some(path) = &self.db_path {
            store = store.with_sqlite_path(path.clone());
        }
        config.with_store(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let cli = Cli::try_parse_from(["ttt_leaderboard", "script", "--x", "Ann", "0", "3", "1"])
            .expect("valid args");
        match cli.command {
            Command::Script { x, o, cells } => {
                assert_eq!(x.as_deref(), Some("Ann"));
                assert_eq!(o, None);
                assert_eq!(cells, vec![0, 3, 1]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_script_needs_cells() {
        assert!(Cli::try_parse_from(["ttt_leaderboard", "script"]).is_err());
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let cli = Cli::try_parse_from([
            "ttt_leaderboard",
            "leaderboard",
            "--backend",
            "sqlite",
            "--db-path",
            "other.db",
        ])
        .expect("valid args");
        let config = cli.apply(Config::default());
        assert_eq!(*config.store().backend(), Backend::Sqlite);
        assert_eq!(config.store().sqlite_path(), "other.db");
        assert_eq!(config.store().url(), &None);
    }
}
