//! Strictly 2048 - the rule engine of the sliding-tile merge puzzle.
//!
//! This crate is pure game logic: grid, slide and merge, scoring, win and
//! game-over detection. Rendering and key handling live in front ends that
//! call [`GameEngine::move_tiles`] and re-render a [`GameState`] snapshot.
//!
//! # Architecture
//!
//! - **Types**: [`Grid`], [`Cell`], [`Direction`], [`Rules`], [`GameState`]
//! - **Line**: the single slide/merge routine every direction reduces to
//! - **Rules**: game-over and win checks
//! - **Seams**: [`RandomSource`] for spawns, [`ScoreStore`] for the best score
//!
//! # Example
//!
//! ```
//! use strictly_2048::{Direction, GameEngine, MemoryStore, RngSource};
//!
//! let mut engine = GameEngine::new(RngSource::seeded(42), MemoryStore::new());
//! engine.move_tiles(Direction::Left);
//! let snapshot = engine.snapshot();
//! assert_eq!(*snapshot.score(), engine.score());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
pub mod invariants;
mod line;
mod random;
pub mod rules;
mod store;
mod types;

pub use engine::GameEngine;
pub use line::{LineSlide, Slide, line_coords, slide_line};
pub use random::{RandomSource, RngSource, StdRngSource};
pub use store::{BEST_SCORE_KEY, MemoryStore, ScoreStore, StoreError};
pub use types::{Cell, Direction, GameState, Grid, GridError, Rules, is_tile_value};
