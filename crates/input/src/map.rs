//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key press to its game action. Letters are case-insensitive.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if is_ctrl_c(key) {
        return Some(GameAction::Quit);
    }

    match key.code {
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Down => Some(GameAction::SoftDrop),

        KeyCode::Char('z') | KeyCode::Char('Z') => Some(GameAction::Rotate),
        KeyCode::Char(' ') => Some(GameAction::Special),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::Pause),

        KeyCode::Char('q') | KeyCode::Char('Q') => Some(GameAction::Quit),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    handle_key_event(key) == Some(GameAction::Quit)
}

// Raw mode delivers Ctrl-C as a key instead of a signal.
fn is_ctrl_c(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
}
