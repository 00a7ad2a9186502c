//! Game engine for 2048.
//!
//! Owns the one authoritative [`GameState`]. Callers read snapshots and
//! hand in directions; nothing else mutates the grid.

use super::invariants::{GameInvariants, InvariantSet};
use super::random::RandomSource;
use super::rules::{has_winning_tile, is_terminal, reaches_goal};
use super::store::{BEST_SCORE_KEY, ScoreStore, StoreError};
use super::types::{Cell, Direction, GameState, Grid, Rules};
use tracing::{debug, info, instrument, warn};

/// 2048 game engine.
///
/// `R` supplies randomness for spawns and `S` persists the best score.
pub struct GameEngine<R, S> {
    state: GameState,
    rules: Rules,
    rng: R,
    store: S,
    store_warning: Option<StoreError>,
}

impl<R: RandomSource, S: ScoreStore> GameEngine<R, S> {
    /// Creates a classic 4x4 game seeded with two tiles.
    #[instrument(skip_all)]
    pub fn new(rng: R, store: S) -> Self {
        Self::with_rules(Rules::default(), rng, store)
    }

    /// Creates a game under the given rules, seeded with two tiles.
    #[instrument(skip(rng, store))]
    pub fn with_rules(rules: Rules, rng: R, store: S) -> Self {
        let mut engine = Self {
            state: GameState::new(rules.size, 0),
            rules,
            rng,
            store,
            store_warning: None,
        };
        let best = engine.load_best_score();
        engine.state.set_best_score(best);
        engine.reset();
        engine
    }

    /// Resumes play from an existing grid with a zero score.
    ///
    /// The win and game-over flags are derived from the grid. No tiles
    /// are spawned.
    pub fn from_grid(grid: Grid, rng: R, store: S) -> Self {
        Self::from_grid_with_rules(grid, Rules::default(), rng, store)
    }

    /// Resumes play from an existing grid under the given rules.
    ///
    /// `rules.size` is replaced by the grid's own size.
    #[instrument(skip(grid, rng, store), fields(size = grid.size()))]
    pub fn from_grid_with_rules(grid: Grid, rules: Rules, rng: R, store: S) -> Self {
        let rules = Rules {
            size: grid.size(),
            ..rules
        };
        let mut engine = Self {
            state: GameState::new(rules.size, 0),
            rules,
            rng,
            store,
            store_warning: None,
        };
        let best = engine.load_best_score();
        engine.state.set_best_score(best);

        if has_winning_tile(&grid, rules.winning_tile) {
            engine.state.mark_won();
        }
        if is_terminal(&grid) {
            engine.state.mark_game_over();
        }
        engine.state.replace_grid(grid);
        engine
    }

    /// Starts a new game: clears the grid, score and flags, then spawns two tiles.
    ///
    /// The best score carries over.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        let best = *self.state.best_score();
        self.state = GameState::new(self.rules.size, best);
        self.spawn_tile();
        self.spawn_tile();
        info!(best, "New game started");
    }

    /// Slides all tiles toward `direction`.
    ///
    /// Returns `true` if the grid changed. Only then is a tile spawned,
    /// game-over checked, and the best score updated. A move that changes
    /// nothing, or any move after game over, leaves the state untouched.
    #[instrument(skip(self))]
    pub fn move_tiles(&mut self, direction: Direction) -> bool {
        if *self.state.game_over() {
            debug!("Move ignored, game is over");
            return false;
        }

        let slide = self.state.grid().slide(direction);
        if !slide.moved {
            debug!("Nothing moved");
            return false;
        }

        self.state.replace_grid(slide.grid);
        self.state.add_score(slide.gained);
        if reaches_goal(&slide.merged, self.rules.winning_tile) && !*self.state.won() {
            info!(score = *self.state.score(), "Winning tile reached");
            self.state.mark_won();
        }

        self.spawn_tile();

        if is_terminal(self.state.grid()) {
            info!(score = *self.state.score(), "Game over");
            self.state.mark_game_over();
        }

        self.update_best_score();

        debug!(
            gained = slide.gained,
            score = *self.state.score(),
            "Move applied"
        );
        debug_assert!(
            GameInvariants::check_all(&self.state).is_ok(),
            "Game invariants violated after move"
        );
        true
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// Returns a copy of the grid.
    pub fn grid(&self) -> Grid {
        self.state.grid().clone()
    }

    /// Points earned in this game.
    pub fn score(&self) -> u64 {
        *self.state.score()
    }

    /// Highest score seen, including previous sessions read from the store.
    pub fn best_score(&self) -> u64 {
        *self.state.best_score()
    }

    /// Checks if no further move is possible.
    pub fn is_game_over(&self) -> bool {
        *self.state.game_over()
    }

    /// Checks if the winning tile has been made this game.
    pub fn has_won(&self) -> bool {
        *self.state.won()
    }

    /// Rules this engine plays by.
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Takes the most recent store failure, if any.
    ///
    /// Store failures never interrupt play; this is how callers learn of them.
    pub fn take_store_warning(&mut self) -> Option<StoreError> {
        self.store_warning.take()
    }

    /// Places a 2 (or sometimes a 4) on a random empty cell.
    ///
    /// Does nothing on a full grid.
    fn spawn_tile(&mut self) {
        let empty = self.state.grid().empty_cells();
        if empty.is_empty() {
            debug!("No empty cell to spawn into");
            return;
        }

        let (row, col) = empty[self.rng.pick_index(empty.len())];
        let value = if self.rng.roll_unit() < 1.0 - self.rules.four_probability {
            2
        } else {
            4
        };
        self.state.grid_mut().set(row, col, Cell::Tile(value));
        debug!(row, col, value, "Spawned tile");
    }

    fn update_best_score(&mut self) {
        let score = *self.state.score();
        if score <= *self.state.best_score() {
            return;
        }

        self.state.set_best_score(score);
        if let Err(e) = self.store.set(BEST_SCORE_KEY, score) {
            warn!(error = %e, score, "Failed to persist best score");
            self.store_warning = Some(e);
        }
    }

    fn load_best_score(&mut self) -> u64 {
        match self.store.get(BEST_SCORE_KEY) {
            Ok(best) => best.unwrap_or(0),
            Err(e) => {
                warn!(error = %e, "Failed to read best score, starting from 0");
                self.store_warning = Some(e);
                0
            }
        }
    }
}

impl<R, S> std::fmt::Debug for GameEngine<R, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("state", &self.state)
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}
