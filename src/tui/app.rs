//! Terminal UI state and key handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;
use ttt_game::{Player, Session};

use super::input::{digit_cell, move_cursor};

/// Which widget receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Arrow keys move the cursor, Enter places a mark.
    Board,
    /// Typing edits this player's name.
    Name(Player),
}

/// What the event loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Click a cell.
    Click(usize),
    /// Replace a player's name.
    Rename(Player, String),
    /// Start over with an empty board.
    NewGame,
    /// Leave the application.
    Quit,
}

/// UI-only state. Game state lives in the session.
#[derive(Debug, Clone)]
pub struct App {
    focus: Focus,
    cursor: usize,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates the UI state with the cursor on the center cell.
    pub fn new() -> Self {
        Self {
            focus: Focus::Board,
            cursor: 4,
        }
    }

    /// Focused widget.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Highlighted cell.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Translates a key press into an action.
    ///
    /// Name inputs are read-only once a move has been made, so focus never
    /// stays on them after that.
    pub fn handle_key(&mut self, key: KeyEvent, session: &Session) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }
        if !session.names_editable() {
            self.focus = Focus::Board;
        }

        if key.code == KeyCode::Tab {
            self.focus = self.next_focus(session);
            debug!(focus = ?self.focus, "Focus changed");
            return None;
        }

        match self.focus {
            Focus::Board => self.handle_board_key(key.code),
            Focus::Name(player) => Self::handle_name_key(&mut self.focus, player, key.code, session),
        }
    }

    fn next_focus(&self, session: &Session) -> Focus {
        if !session.names_editable() {
            return Focus::Board;
        }
        match self.focus {
            Focus::Board => Focus::Name(Player::X),
            Focus::Name(Player::X) => Focus::Name(Player::O),
            Focus::Name(Player::O) => Focus::Board,
        }
    }

    fn handle_board_key(&mut self, code: KeyCode) -> Option<Action> {
        match code {
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
                self.cursor = move_cursor(self.cursor, code);
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Click(self.cursor)),
            KeyCode::Char('n') | KeyCode::Char('N') => Some(Action::NewGame),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char(c) => digit_cell(c).map(|cell| {
                self.cursor = cell;
                Action::Click(cell)
            }),
            _ => None,
        }
    }

    fn handle_name_key(
        focus: &mut Focus,
        player: Player,
        code: KeyCode,
        session: &Session,
    ) -> Option<Action> {
        let current = session.names().name(player);
        match code {
            KeyCode::Enter | KeyCode::Esc => {
                *focus = Focus::Board;
                None
            }
            KeyCode::Backspace => {
                let mut name = current.to_string();
                name.pop().map(|_| Action::Rename(player, name))
            }
            KeyCode::Char(c) if !c.is_control() => {
                Some(Action::Rename(player, format!("{}{}", current, c)))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ttt_game::Event;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrows_then_enter_clicks_cursor() {
        let mut app = App::new();
        let session = Session::default();
        assert_eq!(app.handle_key(key(KeyCode::Up), &session), None);
        assert_eq!(app.handle_key(key(KeyCode::Left), &session), None);
        assert_eq!(app.handle_key(key(KeyCode::Enter), &session), Some(Action::Click(0)));
    }

    #[test]
    fn test_digit_clicks_and_moves_cursor() {
        let mut app = App::new();
        let session = Session::default();
        assert_eq!(app.handle_key(key(KeyCode::Char('9')), &session), Some(Action::Click(8)));
        assert_eq!(app.cursor(), 8);
    }

    #[test]
    fn test_tab_edits_names_before_first_move() {
        let mut app = App::new();
        let session = Session::default();
        app.handle_key(key(KeyCode::Tab), &session);
        assert_eq!(app.focus(), Focus::Name(Player::X));
        assert_eq!(
            app.handle_key(key(KeyCode::Char('!')), &session),
            Some(Action::Rename(Player::X, "Player X!".to_string()))
        );
        assert_eq!(
            app.handle_key(key(KeyCode::Backspace), &session),
            Some(Action::Rename(Player::X, "Player ".to_string()))
        );
    }

    #[test]
    fn test_names_locked_after_first_move() {
        let mut app = App::new();
        let session = Session::default()
            .apply(Event::CellClicked {
                index: 4,
                at: Utc::now(),
            })
            .session;
        app.handle_key(key(KeyCode::Tab), &session);
        assert_eq!(app.focus(), Focus::Board);
        assert_eq!(app.handle_key(key(KeyCode::Char('n')), &session), Some(Action::NewGame));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new();
        let session = Session::default();
        assert_eq!(app.handle_key(key(KeyCode::Char('q')), &session), Some(Action::Quit));
        assert_eq!(
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &session),
            Some(Action::Quit)
        );
    }
}
