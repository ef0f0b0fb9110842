//! Rendering live games through the terminal view

use blocktris::core::{GameSnapshot, Session};
use blocktris::term::{encode_diff_into, FrameBuffer, GameView, Viewport};
use blocktris::types::{GameAction, PlayerId};

fn snapshots(session: &Session) -> Vec<GameSnapshot> {
    session.games().iter().map(|g| g.snapshot()).collect()
}

fn screen_contains(fb: &FrameBuffer, needle: &str) -> bool {
    (0..fb.height()).any(|y| fb.row_text(y).contains(needle))
}

#[test]
fn idle_session_shows_start_hint() {
    let session = Session::new(1, 9);
    let fb = GameView::default().render(&snapshots(&session), Viewport::new(80, 24));
    assert!(screen_contains(&fb, "R: start"));
}

#[test]
fn two_player_session_renders_both_panels() {
    let mut session = Session::new(2, 9);
    session.reset_all();
    session.dispatch(PlayerId::ONE, GameAction::Pause);
    session.dispatch(PlayerId::TWO, GameAction::Pause);

    let fb = GameView::default().render(&snapshots(&session), Viewport::new(100, 24));

    assert!(screen_contains(&fb, "P1"));
    assert!(screen_contains(&fb, "P2"));
    let paused_rows: usize = (0..fb.height())
        .map(|y| fb.row_text(y).matches("PAUSED").count())
        .sum();
    assert_eq!(paused_rows, 2);
}

#[test]
fn moving_a_piece_produces_a_small_diff() {
    let mut session = Session::new(1, 9);
    session.reset_all();
    let view = GameView::default();
    let vp = Viewport::new(80, 24);

    let before = view.render(&snapshots(&session), vp);
    session.dispatch(PlayerId::ONE, GameAction::SoftDrop);
    let after = view.render(&snapshots(&session), vp);

    let mut full = Vec::new();
    blocktris::term::encode_full_into(&after, &mut full).unwrap();
    let mut diff = Vec::new();
    encode_diff_into(&before, &after, &mut diff).unwrap();

    assert!(!diff.is_empty());
    assert!(diff.len() < full.len());
}
