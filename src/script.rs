//! Non-interactive play: feed a list of cells through a controller.

use derive_getters::Getters;
use tracing::{info, instrument};
use ttt_game::Outcome;

use crate::controller::{Dispatched, GameController};
use crate::store::ScoreStore;

/// Summary of a scripted game.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ScriptReport {
    /// Cells that placed a mark.
    accepted: Vec<usize>,
    /// Cells that were ignored (occupied, out of range, or after the end).
    ignored: Vec<usize>,
    /// Result, if the script finished the game.
    outcome: Option<Outcome>,
    /// Whether a record reached the store.
    recorded: bool,
}

/// Clicks each cell in order, as a player would.
///
/// Clicks that the game rejects are collected rather than aborting, so a
/// script may run past the end of the game.
#[instrument(skip(controller))]
pub async fn run_script<S: ScoreStore>(
    controller: &mut GameController<S>,
    cells: &[usize],
) -> ScriptReport {
    let mut accepted = Vec::new();
    let mut ignored = Vec::new();
    let mut recorded = false;

    for &index in cells {
        let before = controller.session().move_count();
        let dispatched = controller.click(index).await;
        if controller.session().move_count() > before {
            accepted.push(index);
        } else {
            ignored.push(index);
        }
        recorded |= dispatched == Dispatched::Recorded;
    }

    let outcome = controller.session().outcome();
    info!(accepted = accepted.len(), ignored = ignored.len(), ?outcome, recorded, "Script finished");
    ScriptReport {
        accepted,
        ignored,
        outcome,
        recorded,
    }
}
