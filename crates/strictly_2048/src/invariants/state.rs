//! Invariants over a whole game state.

use super::super::rules::is_terminal;
use super::super::{Cell, GameState, is_tile_value};
use super::Invariant;

/// Invariant: every tile is a power of two, at least 2.
pub struct PowerOfTwoTiles;

impl Invariant<GameState> for PowerOfTwoTiles {
    fn holds(state: &GameState) -> bool {
        state.grid().rows().flatten().all(|cell| match cell {
            Cell::Empty => true,
            Cell::Tile(v) => is_tile_value(*v),
        })
    }

    fn description() -> &'static str {
        "Tiles are powers of two"
    }
}

/// Invariant: the best score is never below the current score.
pub struct BestScoreCoversScore;

impl Invariant<GameState> for BestScoreCoversScore {
    fn holds(state: &GameState) -> bool {
        state.best_score() >= state.score()
    }

    fn description() -> &'static str {
        "Best score covers current score"
    }
}

/// Invariant: the game-over flag matches what the grid allows.
pub struct TerminalFlagConsistent;

impl Invariant<GameState> for TerminalFlagConsistent {
    fn holds(state: &GameState) -> bool {
        *state.game_over() == is_terminal(state.grid())
    }

    fn description() -> &'static str {
        "Game-over flag matches the grid"
    }
}
