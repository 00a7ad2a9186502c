//! Win detection for 2048.

use super::super::Grid;
use tracing::instrument;

/// Checks if any merge in a slide produced the winning tile.
#[instrument]
pub fn reaches_goal(merged: &[u32], winning_tile: u32) -> bool {
    merged.iter().any(|&value| value == winning_tile)
}

/// Checks if a grid already holds the winning tile or better.
///
/// Used when resuming a saved position, where no merge history exists.
#[instrument(skip(grid))]
pub fn has_winning_tile(grid: &Grid, winning_tile: u32) -> bool {
    grid.max_tile() >= winning_tile
}
