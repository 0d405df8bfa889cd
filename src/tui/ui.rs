//! Stateless UI rendering: game on the left, leaderboard on the right.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell as TableCell, Paragraph, Row, Table},
};
use ttt_game::{Cell, Player, Session};
use ttt_leaderboard::{Leaderboard, ScoreStore, Winner};

use super::app::{App, Focus};

/// Renders one frame.
pub fn draw<S: ScoreStore>(frame: &mut Frame, app: &App, session: &Session, leaderboard: &Leaderboard<S>) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(frame.area());

    draw_game(frame, columns[0], app, session);
    draw_leaderboard(frame, columns[1], leaderboard);
}

fn draw_game(frame: &mut Frame, area: Rect, app: &App, session: &Session) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Length(3),  // Names
            Constraint::Length(3),  // Status
            Constraint::Min(11),    // Board
            Constraint::Length(3),  // Help
        ])
        .split(area);

    let title = Paragraph::new("Tic-Tac-Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_names(frame, chunks[1], app, session);

    let status = Paragraph::new(session.status_line())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    draw_board(frame, chunks[3], app, session);

    let help = Paragraph::new("Arrows/1-9: move | Enter: place | Tab: names | n: New Game | q: Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[4]);
}

fn draw_names(frame: &mut Frame, area: Rect, app: &App, session: &Session) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (col, player) in cols.iter().zip([Player::X, Player::O]) {
        let focused = app.focus() == Focus::Name(player);
        let style = if !session.names_editable() {
            Style::default().fg(Color::DarkGray)
        } else if focused {
            Style::default().fg(Color::Black).bg(Color::White)
        } else {
            Style::default()
        };
        let input = Paragraph::new(session.names().name(player).to_string())
            .style(style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Player {} Name", player)),
            );
        frame.render_widget(input, *col);
    }
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App, session: &Session) {
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for row in 0..3 {
        draw_row(frame, rows[row * 2], app, session, [row * 3, row * 3 + 1, row * 3 + 2]);
        if row < 2 {
            let sep = Paragraph::new("────────────────────────────────────────")
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(sep, rows[row * 2 + 1]);
        }
    }
}

fn draw_row(frame: &mut Frame, area: Rect, app: &App, session: &Session, cells: [usize; 3]) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(2),
            Constraint::Length(12),
            Constraint::Length(2),
            Constraint::Length(12),
        ])
        .split(area);

    for (i, index) in cells.into_iter().enumerate() {
        draw_cell(frame, cols[i * 2], app, session, index);
        if i < 2 {
            let sep = Paragraph::new("│").style(Style::default().fg(Color::DarkGray));
            frame.render_widget(sep, cols[i * 2 + 1]);
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, app: &App, session: &Session, index: usize) {
    let (symbol, base_style) = match session.board().get(index).unwrap_or_default() {
        Cell::Empty => ("   ", Style::default().fg(Color::DarkGray)),
        Cell::Occupied(Player::X) => (" X ", Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
        Cell::Occupied(Player::O) => (" O ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
    };

    let style = if index == app.cursor() && app.focus() == Focus::Board && session.outcome().is_none() {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(symbol, style))).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_leaderboard<S: ScoreStore>(frame: &mut Frame, area: Rect, leaderboard: &Leaderboard<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    let title = Paragraph::new("Global Leaderboard")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let total = Paragraph::new(format!("Total Games Played: {}", leaderboard.total_games()))
        .style(Style::default().fg(Color::Green))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(total, chunks[1]);

    let header = Row::new(vec![
        TableCell::from("Players").style(Style::default().add_modifier(Modifier::BOLD)),
        TableCell::from("Details").style(Style::default().add_modifier(Modifier::BOLD)),
        TableCell::from("Winner").style(Style::default().add_modifier(Modifier::BOLD)),
    ])
    .style(Style::default().fg(Color::Yellow));

    let rows: Vec<Row> = leaderboard
        .games()
        .iter()
        .map(|game| {
            let winner_color = match game.winner() {
                Winner::X => Color::Blue,
                Winner::O => Color::Red,
                Winner::Draw => Color::Yellow,
            };
            Row::new(vec![
                TableCell::from(format!("{} vs {}", game.player_name(), game.opponent_name())),
                TableCell::from(format!("{} moves • {}", game.moves(), game.duration_display())),
                TableCell::from(game.winner_display().to_string()).style(Style::default().fg(winner_color)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Percentage(45),
        Constraint::Percentage(30),
        Constraint::Percentage(25),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Recent Games"),
    );
    frame.render_widget(table, chunks[2]);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
