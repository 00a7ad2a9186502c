//! Game rules for 2048.
//!
//! Pure functions over a grid that decide when a game ends. They are kept
//! apart from grid storage so the engine and the invariants share them.

pub mod terminal;
pub mod win;

pub use terminal::is_terminal;
pub use win::{has_winning_tile, reaches_goal};
