//! Game-over detection.

use super::super::Grid;
use tracing::instrument;

/// Checks if no direction can change the grid.
///
/// The grid must be full and have no equal horizontal or vertical
/// neighbors. Any empty cell or equal pair ends the scan early.
#[instrument(skip(grid), fields(size = grid.size()))]
pub fn is_terminal(grid: &Grid) -> bool {
    grid.is_full() && !grid.has_adjacent_pair()
}
