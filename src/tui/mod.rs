//! Terminal UI: the game board with its leaderboard alongside.

mod app;
mod input;
mod ui;

use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::time::Duration;
use tracing::{debug, error, info, instrument};
use ttt_game::Event as GameEvent;
use ttt_leaderboard::{Dispatched, GameController, ScoreStore};

use app::{Action, App};

/// Runs the interactive game until the player quits.
///
/// Loads the leaderboard before the first frame, the way a page fetches on
/// mount.
#[instrument(skip(controller))]
pub async fn run<S: ScoreStore>(mut controller: GameController<S>) -> Result<()> {
    info!("Starting terminal UI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, &mut controller).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref err) = result {
        error!(error = ?err, "Game loop error");
    }
    result
}

async fn event_loop<S: ScoreStore>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    controller: &mut GameController<S>,
) -> Result<()> {
    let mut app = App::new();
    controller.mount().await;

    loop {
        terminal.draw(|f| ui::draw(f, &app, controller.session(), controller.leaderboard()))?;

        // Poll with a short timeout to keep the loop responsive.
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        // Skip key release events (crossterm fires both press and release).
        if key.kind == KeyEventKind::Release {
            continue;
        }

        let Some(action) = app.handle_key(key, controller.session()) else {
            continue;
        };
        debug!(?action, "Key action");

        let dispatched = match action {
            Action::Quit => {
                info!("Player quit");
                return Ok(());
            }
            Action::Click(index) => controller.click(index).await,
            Action::Rename(player, name) => {
                controller
                    .dispatch(GameEvent::Rename { player, name })
                    .await
            }
            Action::NewGame => controller.dispatch(GameEvent::NewGame).await,
        };
        if dispatched == Dispatched::RecordDropped {
            debug!("Finished game not saved");
        }
    }
}
