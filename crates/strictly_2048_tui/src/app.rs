//! Application state and logic.

use crate::input::Action;
use strictly_2048::{GameEngine, GameState, RandomSource, ScoreStore};
use tracing::{debug, instrument, warn};

const PLAYING: &str = "Join the numbers and get to the 2048 tile!";
const WON: &str = "You Win! Keep going, or press n for a new game.";
const GAME_OVER: &str = "Game Over! Press n to try again or q to quit.";

/// Main application state.
pub struct App<R, S> {
    engine: GameEngine<R, S>,
    status_message: String,
    should_quit: bool,
}

impl<R: RandomSource, S: ScoreStore> App<R, S> {
    /// Creates a new application around a started engine.
    #[instrument(skip(engine))]
    pub fn new(engine: GameEngine<R, S>) -> Self {
        let mut app = Self {
            engine,
            status_message: PLAYING.to_string(),
            should_quit: false,
        };
        app.refresh_status(true);
        app
    }

    /// Current engine snapshot for rendering.
    pub fn snapshot(&self) -> GameState {
        self.engine.snapshot()
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Checks if the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Applies one user action.
    #[instrument(skip(self))]
    pub fn handle(&mut self, action: Action) {
        match action {
            Action::Move(direction) => {
                let moved = self.engine.move_tiles(direction);
                debug!(%direction, moved, "Handled move");
                self.refresh_status(moved);
            }
            Action::NewGame => {
                debug!("Restarting game");
                self.engine.reset();
                self.refresh_status(true);
            }
            Action::Quit => self.should_quit = true,
        }
    }

    fn refresh_status(&mut self, moved: bool) {
        if let Some(e) = self.engine.take_store_warning() {
            warn!(error = %e, "Best score not saved");
            self.status_message = format!("Best score not saved: {}", e.message);
            return;
        }

        self.status_message = if self.engine.is_game_over() {
            GAME_OVER.to_string()
        } else if self.engine.has_won() {
            WON.to_string()
        } else if !moved {
            "Nothing moves that way.".to_string()
        } else {
            PLAYING.to_string()
        };
    }
}
