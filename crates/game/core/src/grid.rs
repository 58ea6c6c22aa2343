//! Board geometry.

use std::fmt;

use thiserror::Error;

/// Errors raised when constructing a [`GridSize`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid {rows}x{cols} has no cells")]
    Empty { rows: u32, cols: u32 },

    #[error("grid {rows}x{cols} has an odd number of cells; tiles are dealt in pairs")]
    OddCellCount { rows: u32, cols: u32 },
}

/// Board dimensions for one game.
///
/// The cell count must be even so that every tile has a partner; construction
/// enforces this, so a `GridSize` in hand is always playable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSize {
    rows: u32,
    cols: u32,
}

impl GridSize {
    /// Creates a grid, rejecting empty boards and odd cell counts.
    pub fn new(rows: u32, cols: u32) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty { rows, cols });
        }
        if (rows * cols) % 2 != 0 {
            return Err(GridError::OddCellCount { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Total number of tiles on the board.
    pub fn cells(&self) -> u32 {
        self.rows * self.cols
    }

    /// Number of symbol pairs the board holds.
    pub fn pairs(&self) -> u32 {
        self.cells() / 2
    }
}

impl Default for GridSize {
    /// The classic 4x4 board.
    fn default() -> Self {
        Self { rows: 4, cols: 4 }
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_even_cell_counts() {
        let grid = GridSize::new(3, 4).unwrap();
        assert_eq!(grid.cells(), 12);
        assert_eq!(grid.pairs(), 6);
    }

    #[test]
    fn rejects_odd_cell_counts() {
        assert_eq!(
            GridSize::new(3, 3),
            Err(GridError::OddCellCount { rows: 3, cols: 3 })
        );
    }

    #[test]
    fn rejects_empty_boards() {
        assert_eq!(GridSize::new(0, 4), Err(GridError::Empty { rows: 0, cols: 4 }));
        assert_eq!(GridSize::new(4, 0), Err(GridError::Empty { rows: 4, cols: 0 }));
    }

    #[test]
    fn default_is_four_by_four() {
        let grid = GridSize::default();
        assert_eq!(grid.cells(), 16);
        assert_eq!(grid.to_string(), "4x4");
    }
}
