//! Grid coordinates.
//!
//! A point of the cloth grid is addressed by `(row, col)`. A row is one
//! "rope"; the flat point index is `row * columns + col`.

use serde::{Deserialize, Serialize};

/// A `(row, col)` coordinate in the point grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    /// Rope index.
    pub row: usize,
    /// Position along the rope.
    pub col: usize,
}

impl GridCoord {
    /// Creates a coordinate.
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Flat index of this coordinate in a grid with `columns` points per rope.
    #[inline]
    pub const fn index(self, columns: usize) -> usize {
        self.row * columns + self.col
    }

    /// Inverse of [`GridCoord::index`].
    #[inline]
    pub const fn from_index(index: usize, columns: usize) -> Self {
        Self {
            row: index / columns,
            col: index % columns,
        }
    }
}

impl From<(usize, usize)> for GridCoord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl From<[usize; 2]> for GridCoord {
    fn from([row, col]: [usize; 2]) -> Self {
        Self { row, col }
    }
}
