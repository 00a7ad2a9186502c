//! Slide and merge along one line, and across the whole grid.
//!
//! A line is a row (left/right) or a column (up/down) read in order from
//! the edge tiles move toward. Every direction reduces to the same
//! left-compaction once the line is read that way.

use super::types::{Cell, Direction, Grid};
use tracing::{instrument, trace};

/// Result of sliding one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSlide {
    /// Line after compaction, same length as the input, target edge first.
    pub cells: Vec<Cell>,
    /// Sum of merged values.
    pub gained: u64,
    /// Value of each tile produced by a merge, in line order.
    pub merged: Vec<u32>,
}

/// Compacts a line toward its first element, merging equal neighbors once.
///
/// A tile produced by a merge never merges again in the same slide, so
/// `[2, 2, 2, 2]` becomes `[4, 4, _, _]`. Pairs whose sum would not fit
/// in a `u32` slide without merging.
pub fn slide_line(cells: &[Cell]) -> LineSlide {
    let tiles: Vec<u32> = cells
        .iter()
        .filter(|c| !c.is_empty())
        .map(|c| c.value())
        .collect();

    let mut out = Vec::with_capacity(cells.len());
    let mut merged = Vec::new();
    let mut gained = 0;
    let mut i = 0;

    while i < tiles.len() {
        let pair = tiles
            .get(i + 1)
            .and_then(|&next| Cell::Tile(tiles[i]).merged_value(Cell::Tile(next)));
        match pair {
            Some(value) => {
                out.push(Cell::Tile(value));
                merged.push(value);
                gained += u64::from(value);
                i += 2;
            }
            None => {
                out.push(Cell::Tile(tiles[i]));
                i += 1;
            }
        }
    }
    out.resize(cells.len(), Cell::Empty);

    LineSlide {
        cells: out,
        gained,
        merged,
    }
}

/// Coordinates of line `index`, ordered from the edge tiles move toward.
pub fn line_coords(size: usize, direction: Direction, index: usize) -> Vec<(usize, usize)> {
    (0..size)
        .map(|k| match direction {
            Direction::Left => (index, k),
            Direction::Right => (index, size - 1 - k),
            Direction::Up => (k, index),
            Direction::Down => (size - 1 - k, index),
        })
        .collect()
}

/// Result of sliding every line of a grid in one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    /// Grid after sliding, before any tile is spawned.
    pub grid: Grid,
    /// Points earned by all merges.
    pub gained: u64,
    /// Values produced by merges across all lines.
    pub merged: Vec<u32>,
    /// At least one cell differs from the original grid.
    pub moved: bool,
}

impl Grid {
    /// Slides and merges all lines toward `direction` without spawning.
    ///
    /// The original grid is untouched; the caller swaps in the result.
    #[instrument(skip(self), fields(size = self.size()))]
    pub fn slide(&self, direction: Direction) -> Slide {
        let size = self.size();
        let mut grid = self.clone();
        let mut gained = 0;
        let mut merged = Vec::new();
        let mut moved = false;

        for index in 0..size {
            let coords = line_coords(size, direction, index);
            let before: Vec<Cell> = coords
                .iter()
                .map(|&(r, c)| self.get(r, c).unwrap_or_default())
                .collect();

            let line = slide_line(&before);
            if line.cells != before {
                moved = true;
                trace!(index, ?before, after = ?line.cells, "Line changed");
            }

            for (&(r, c), &cell) in coords.iter().zip(&line.cells) {
                grid.set(r, c, cell);
            }
            gained += line.gained;
            merged.extend(line.merged);
        }

        Slide {
            grid,
            gained,
            merged,
            moved,
        }
    }
}
