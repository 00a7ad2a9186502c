//! Headless play with a fixed move priority.
//!
//! Useful as a smoke test of the engine and for filling in a best score.

use serde::Serialize;
use strictly_2048::{Direction, GameEngine, RandomSource, ScoreStore};
use tracing::{debug, info, instrument};

/// Directions tried in order each turn; the first that moves is played.
pub const PRIORITY: [Direction; 4] = [
    Direction::Down,
    Direction::Left,
    Direction::Right,
    Direction::Up,
];

/// Outcome of one headless game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    /// Final score.
    pub score: u64,
    /// Largest tile on the final grid.
    pub max_tile: u32,
    /// Successful moves played.
    pub moves: usize,
    /// The winning tile was made.
    pub won: bool,
    /// The game ended by game over rather than the move cap.
    pub finished: bool,
}

/// Plays the engine's current game until game over or `max_moves`.
#[instrument(skip(engine))]
pub fn play_game<R: RandomSource, S: ScoreStore>(
    engine: &mut GameEngine<R, S>,
    max_moves: usize,
) -> GameSummary {
    let mut moves = 0;

    while moves < max_moves && !engine.is_game_over() {
        let Some(direction) = PRIORITY.into_iter().find(|&d| engine.move_tiles(d)) else {
            debug!("No direction moved");
            break;
        };
        moves += 1;
        debug!(%direction, moves, score = engine.score(), "Autoplay move");
    }

    let summary = GameSummary {
        score: engine.score(),
        max_tile: engine.grid().max_tile(),
        moves,
        won: engine.has_won(),
        finished: engine.is_game_over(),
    };
    info!(?summary, "Autoplay game finished");
    summary
}
