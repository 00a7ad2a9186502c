//! Core domain types for 2048.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Direction tiles slide toward.
///
/// Parsing is case-insensitive so front ends can map user text
/// (`"up"`, `"Left"`) without a hand-written match.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward row 0.
    Up,
    /// Toward the last row.
    Down,
    /// Toward column 0.
    Left,
    /// Toward the last column.
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns true for up/down, whose lines are columns.
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

/// A cell on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// No tile.
    #[default]
    Empty,
    /// A tile holding a power of two (2, 4, 8, ...).
    Tile(u32),
}

impl Cell {
    /// Numeric value of the cell, 0 when empty.
    pub fn value(self) -> u32 {
        match self {
            Cell::Empty => 0,
            Cell::Tile(v) => v,
        }
    }

    /// Checks if the cell is empty.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Value two cells merge into, or `None` when they cannot merge.
    ///
    /// Only equal tiles merge, and only while the doubled value fits in
    /// a `u32`. Two `2^31` tiles stay apart.
    pub fn merged_value(self, other: Cell) -> Option<u32> {
        match (self, other) {
            (Cell::Tile(a), Cell::Tile(b)) if a == b => a.checked_mul(2),
            _ => None,
        }
    }

    /// Builds a cell from its numeric value (0 = empty).
    pub fn from_value(value: u32) -> Self {
        if value == 0 { Cell::Empty } else { Cell::Tile(value) }
    }
}

/// Square grid of cells in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an all-empty grid of `size` x `size`.
    #[instrument]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Builds a grid from numeric rows, where 0 marks an empty cell.
    ///
    /// # Errors
    ///
    /// Fails if the rows do not form a square of side at least 2, or if any
    /// non-zero value is not a power of two of at least 2.
    #[instrument(skip(rows), fields(rows = rows.len()))]
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self, GridError> {
        let size = rows.len();
        if size < 2 {
            return Err(GridError::new(format!(
                "Grid must be at least 2x2, got {} rows",
                size
            )));
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != size {
                return Err(GridError::new(format!(
                    "Row {} has {} cells, expected {}",
                    row,
                    values.len(),
                    size
                )));
            }
            for (col, &value) in values.iter().enumerate() {
                if value != 0 && !is_tile_value(value) {
                    return Err(GridError::new(format!(
                        "Cell ({}, {}) holds {}, which is not a power of two",
                        row, col, value
                    )));
                }
                cells.push(Cell::from_value(value));
            }
        }

        Ok(Self { size, cells })
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Gets the cell at (row, col), or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells.get(row * self.size + col).copied()
    }

    /// Sets the cell at (row, col). Out-of-bounds writes are ignored.
    pub(crate) fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if row < self.size && col < self.size {
            self.cells[row * self.size + col] = cell;
        }
    }

    /// Iterates over rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.max(1))
    }

    /// Returns the grid as numeric rows (0 = empty).
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.rows()
            .map(|row| row.iter().map(|c| c.value()).collect())
            .collect()
    }

    /// Coordinates of all empty cells, in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .map(|(i, _)| (i / self.size, i % self.size))
            .collect()
    }

    /// Number of occupied cells.
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Sum of all tile values.
    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().map(|c| u64::from(c.value())).sum()
    }

    /// Largest tile on the grid, 0 when empty.
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().map(|c| c.value()).max().unwrap_or(0)
    }

    /// Checks if every cell holds a tile.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Checks for two mergeable tiles side by side, horizontally or vertically.
    pub fn has_adjacent_pair(&self) -> bool {
        for row in 0..self.size {
            for col in 0..self.size {
                let cell = self.cells[row * self.size + col];
                if cell.is_empty() {
                    continue;
                }
                if col + 1 < self.size
                    && cell.merged_value(self.cells[row * self.size + col + 1]).is_some()
                {
                    return true;
                }
                if row + 1 < self.size
                    && cell.merged_value(self.cells[(row + 1) * self.size + col]).is_some()
                {
                    return true;
                }
            }
        }
        false
    }

    /// Checks if any direction could change the grid.
    pub fn has_moves(&self) -> bool {
        !self.is_full() || self.has_adjacent_pair()
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self.max_tile().max(1).to_string().len();
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line = row
                .iter()
                .map(|c| match c {
                    Cell::Empty => format!("{:>width$}", ".", width = width),
                    Cell::Tile(v) => format!("{:>width$}", v, width = width),
                })
                .collect::<Vec<_>>()
                .join(" ");
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Checks that a value is a legal tile (a power of two, at least 2).
pub fn is_tile_value(value: u32) -> bool {
    value >= 2 && value.is_power_of_two()
}

/// Tunable rule constants.
///
/// The defaults are the classic game: a 4x4 grid, the 2048 tile wins,
/// and one spawn in ten is a 4.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    /// Side length of the grid.
    pub size: usize,
    /// Merged value that flags a win.
    pub winning_tile: u32,
    /// Chance that a spawned tile is a 4 instead of a 2.
    pub four_probability: f64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            size: 4,
            winning_tile: 2048,
            four_probability: 0.1,
        }
    }
}

/// Complete game state, also used as the read-only snapshot handed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct GameState {
    /// The grid.
    grid: Grid,
    /// Points earned in this game.
    score: u64,
    /// Highest score seen across games.
    best_score: u64,
    /// No move can change the grid.
    game_over: bool,
    /// The winning tile has been made.
    won: bool,
}

impl GameState {
    /// Creates a fresh state with an empty grid.
    #[instrument]
    pub fn new(size: usize, best_score: u64) -> Self {
        Self {
            grid: Grid::new(size),
            score: 0,
            best_score,
            game_over: false,
            won: false,
        }
    }

    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub(crate) fn replace_grid(&mut self, grid: Grid) {
        self.grid = grid;
    }

    pub(crate) fn add_score(&mut self, gained: u64) {
        self.score += gained;
    }

    pub(crate) fn set_best_score(&mut self, best: u64) {
        self.best_score = best;
    }

    pub(crate) fn mark_game_over(&mut self) {
        self.game_over = true;
    }

    pub(crate) fn mark_won(&mut self) {
        self.won = true;
    }
}

/// Error building a grid from raw values.
#[derive(Debug, Clone, Display, Error)]
#[display("Grid error: {} at {}:{}", message, file, line)]
pub struct GridError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GridError {
    /// Creates a new grid error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
