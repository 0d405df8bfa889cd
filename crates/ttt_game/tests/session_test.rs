//! Tests for the session reducer lifecycle.

use chrono::{DateTime, Duration, TimeZone, Utc};
use ttt_game::{Board, Effect, Event, Outcome, Phase, Player, PlayerNames, Session, rules};

fn at(secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(secs)
}

/// Feeds clicks one second apart, returning the final session and every effect seen.
fn play(session: Session, cells: &[usize]) -> (Session, Vec<Effect>) {
    let mut effects = Vec::new();
    let session = cells
        .iter()
        .enumerate()
        .fold(session, |session, (i, &index)| {
            let step = session.apply(Event::CellClicked {
                index,
                at: at(i as i64),
            });
            effects.extend(step.effect);
            step.session
        });
    (session, effects)
}

#[test]
fn test_move_count_tracks_accepted_moves() {
    for n in 0..=4 {
        let cells: Vec<usize> = [0, 4, 8, 2].iter().copied().take(n).collect();
        let (session, effects) = play(Session::default(), &cells);
        assert_eq!(usize::from(session.move_count()), n);
        assert_eq!(session.board().occupied(), n);
        assert!(effects.is_empty());
    }
}

#[test]
fn test_repeated_clicks_do_not_count() {
    let (session, _) = play(Session::default(), &[4, 4, 4, 0]);
    assert_eq!(session.move_count(), 2);
    assert_eq!(session.board().get(4).and_then(|c| c.mark()), Some(Player::X));
    assert_eq!(session.board().get(0).and_then(|c| c.mark()), Some(Player::O));
}

#[test]
fn test_no_moves_after_resolution() {
    // X wins on the diagonal: X 0,4,8 ; O 1,2
    let (session, effects) = play(Session::default(), &[0, 1, 4, 2, 8]);
    assert_eq!(session.phase(), Phase::Finished);
    assert_eq!(session.outcome(), Some(Outcome::Winner(Player::X)));
    assert_eq!(effects.len(), 1);

    let (after, more) = play(session.clone(), &[3, 5, 6, 7]);
    assert_eq!(after, session);
    assert!(more.is_empty());
}

#[test]
fn test_draw_is_recorded_once() {
    // X O X / X O O / O X X
    let (session, effects) = play(Session::default(), &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
    assert_eq!(session.outcome(), Some(Outcome::Draw));
    assert_eq!(session.status_line(), "It's a Draw!");
    assert_eq!(
        effects,
        vec![Effect::RecordGame(ttt_game::CompletedGame::new(
            "Player X".to_string(),
            "Player O".to_string(),
            Outcome::Draw,
            9,
            Some(at(0)),
            at(8),
        ))]
    );
}

#[test]
fn test_new_game_resets_everything_but_names() {
    let names = PlayerNames::new("Ann", "Bob");
    let (session, _) = play(Session::new(names.clone()), &[0, 3, 1, 4, 2]);
    assert_eq!(session.phase(), Phase::Finished);

    let session = session.apply(Event::NewGame).session;
    assert_eq!(session.board(), &Board::new());
    assert_eq!(session.move_count(), 0);
    assert_eq!(session.current_player(), Player::X);
    assert_eq!(session.outcome(), None);
    assert_eq!(session.started_at(), None);
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.names(), &names);
}

#[test]
fn test_o_can_win() {
    let (session, effects) = play(Session::new(PlayerNames::new("Ann", "Bob")), &[0, 2, 1, 4, 8, 6]);
    assert_eq!(session.outcome(), Some(Outcome::Winner(Player::O)));
    assert_eq!(session.status_line(), "Bob Wins!");
    let [Effect::RecordGame(game)] = effects.as_slice() else {
        panic!("expected one record effect");
    };
    assert_eq!(*game.moves(), 6);
    assert_eq!(game.duration_seconds(), Some(5));
}

#[test]
fn test_detector_examples() {
    let cases = [
        ("XXX_OO___", Some(Outcome::Winner(Player::X))),
        ("XOXOXOOXO", Some(Outcome::Draw)),
        ("XO_______", None),
    ];
    for (text, expected) in cases {
        let board: Board = text.parse().expect("valid board");
        assert_eq!(rules::evaluate(&board), expected, "board {}", text);
    }
}

#[test]
fn test_session_serializes() {
    let (session, _) = play(Session::default(), &[4, 0]);
    let json = serde_json::to_string(&session).expect("serialize");
    let back: Session = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, session);
}
