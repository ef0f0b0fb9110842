//! Key mapping from terminal events to game actions.

use crate::types::{GameAction, PlayerId};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions (single player).
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Down => Some(GameAction::SoftDrop),
        KeyCode::Up => Some(GameAction::Rotate),
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),
        _ => None,
    }
}

/// Map keyboard input for a two-player split keyboard to the one game it targets.
///
/// Player one: A/D move, S soft drop, W rotate, Space hard drop, E pause, R restart.
/// Player two: arrows move/drop/rotate, Enter hard drop, P pause, O restart.
pub fn route_key_event(key: KeyEvent) -> Option<(PlayerId, GameAction)> {
    let one = |action| Some((PlayerId::ONE, action));
    let two = |action| Some((PlayerId::TWO, action));

    match key.code {
        KeyCode::Char('a') | KeyCode::Char('A') => one(GameAction::MoveLeft),
        KeyCode::Char('d') | KeyCode::Char('D') => one(GameAction::MoveRight),
        KeyCode::Char('s') | KeyCode::Char('S') => one(GameAction::SoftDrop),
        KeyCode::Char('w') | KeyCode::Char('W') => one(GameAction::Rotate),
        KeyCode::Char(' ') => one(GameAction::HardDrop),
        KeyCode::Char('e') | KeyCode::Char('E') => one(GameAction::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => one(GameAction::Restart),

        KeyCode::Left => two(GameAction::MoveLeft),
        KeyCode::Right => two(GameAction::MoveRight),
        KeyCode::Down => two(GameAction::SoftDrop),
        KeyCode::Up => two(GameAction::Rotate),
        KeyCode::Enter => two(GameAction::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => two(GameAction::Pause),
        KeyCode::Char('o') | KeyCode::Char('O') => two(GameAction::Restart),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
