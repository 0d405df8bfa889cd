//! ttt_leaderboard - unified CLI
//!
//! Play tic-tac-toe in the terminal, script games, or list the leaderboard.

#![warn(missing_docs)]

mod cli;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use ttt_game::PlayerNames;
use ttt_leaderboard::{Config, GameController, Leaderboard, ScoreStore, run_script};

/// Log file used while the terminal UI owns the screen.
const TUI_LOG_FILE: &str = "ttt_leaderboard.log";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play => init_file_tracing()?,
        Command::Leaderboard | Command::Script { .. } => init_stderr_tracing(),
    }

    let config = cli.apply(Config::load(cli.config.as_deref())?);
    let store = config.store().open().context("Failed to open score store")?;
    let leaderboard = Leaderboard::new(store);

    match cli.command {
        Command::Play => {
            let controller = GameController::new(config.players().names(), leaderboard);
            tui::run(controller).await
        }
        Command::Leaderboard => run_listing(leaderboard).await,
        Command::Script { x, o, cells } => {
            let names = PlayerNames::new(
                x.unwrap_or_else(|| config.players().x().clone()),
                o.unwrap_or_else(|| config.players().o().clone()),
            );
            run_scripted(GameController::new(names, leaderboard), &cells).await
        }
    }
}

/// Logs to a file so the terminal UI is not disturbed.
fn init_file_tracing() -> Result<()> {
    let log_file = std::fs::File::create(TUI_LOG_FILE)
        .with_context(|| format!("Failed to create {}", TUI_LOG_FILE))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Logs to stderr, keeping stdout for command output.
fn init_stderr_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

/// Print the most recent games
#[instrument(skip(leaderboard))]
async fn run_listing<S: ScoreStore>(mut leaderboard: Leaderboard<S>) -> Result<()> {
    if !leaderboard.fetch_recent().await {
        anyhow::bail!("Could not fetch the leaderboard");
    }
    print!("{}", leaderboard.listing());
    Ok(())
}

/// Play the given cells, then print the board and leaderboard
#[instrument(skip(controller))]
async fn run_scripted<S: ScoreStore>(mut controller: GameController<S>, cells: &[usize]) -> Result<()> {
    controller.mount().await;
    let report = run_script(&mut controller, cells).await;
    info!(?report, "Script complete");

    println!("{}\n", controller.session().board().display());
    println!("{}", controller.session().status_line());
    if !report.ignored().is_empty() {
        println!("Ignored clicks: {:?}", report.ignored());
    }
    if report.outcome().is_some() && !report.recorded() {
        println!("Result was not saved to the leaderboard.");
    }
    println!();
    print!("{}", controller.leaderboard().listing());
    Ok(())
}
