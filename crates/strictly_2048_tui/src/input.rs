//! Key mapping for the terminal game.

use crossterm::event::KeyCode;
use strictly_2048::Direction;

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Slide tiles.
    Move(Direction),
    /// Start over.
    NewGame,
    /// Leave the game.
    Quit,
}

/// Maps a key to an action. Unbound keys return `None`.
///
/// Arrows, `wasd` and vi-style `hjkl` all slide tiles.
pub fn action_for_key(key: KeyCode) -> Option<Action> {
    let action = match key {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Action::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Action::Move(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => Action::Move(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => {
            Action::Move(Direction::Right)
        }
        KeyCode::Char('n') | KeyCode::Char('r') => Action::NewGame,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    Some(action)
}
