//! Terminal front end for Strictly 2048.
//!
//! Maps keys to directions, renders engine snapshots with ratatui, and
//! keeps the best score in a JSON file between runs.
//!
//! # Architecture
//!
//! - **Input**: key codes to [`Action`]s
//! - **App**: owns the engine and the status line
//! - **UI**: stateless rendering of a [`strictly_2048::GameState`]
//! - **Store**: [`JsonFileStore`], the on-disk best score
//! - **Autoplay**: headless games with a fixed-priority policy

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod app;
pub mod autoplay;
pub mod cli;
pub mod config;
pub mod input;
pub mod store;
pub mod ui;

pub use app::App;
pub use autoplay::{GameSummary, play_game};
pub use cli::{Cli, Command};
pub use config::{AppConfig, ConfigError};
pub use input::{Action, action_for_key};
pub use store::JsonFileStore;
