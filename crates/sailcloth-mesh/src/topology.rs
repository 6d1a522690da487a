//! Grid topology queries.
//!
//! The cloth is a `rows × columns` lattice, so every adjacency query is
//! index arithmetic on `row * columns + col`. Springs and cells are
//! yielded by iterators on demand; nothing is stored per edge, which keeps
//! the force pass a plain double loop and allocation-free.

use sailcloth_types::GridCoord;

/// Row/column adjacency of a point grid.
///
/// A row is a "rope". Two spring families exist:
/// - rope springs: `(r, c)`–`(r, c + 1)`
/// - cross springs: `(r, c)`–`(r + 1, c)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridTopology {
    rows: usize,
    columns: usize,
}

/// One grid cell, named by its four corners.
///
/// ```text
///   p1 = (r, c)      p2 = (r, c + 1)
///   p3 = (r + 1, c)  p4 = (r + 1, c + 1)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub p1: usize,
    pub p2: usize,
    pub p3: usize,
    pub p4: usize,
}

impl GridCell {
    /// The two render triangles of this cell, `[p1, p3, p2]` and `[p2, p3, p4]`.
    ///
    /// For the flat construction-time grid both face normals point along +Y.
    #[inline]
    pub fn triangles(&self) -> [[usize; 3]; 2] {
        [[self.p1, self.p3, self.p2], [self.p2, self.p3, self.p4]]
    }
}

impl GridTopology {
    /// Creates the topology of a `rows × columns` grid.
    pub const fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    /// Number of ropes.
    #[inline]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of points per rope.
    #[inline]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Total point count, `rows × columns`.
    #[inline]
    pub const fn point_count(&self) -> usize {
        self.rows * self.columns
    }

    /// Returns true if `(row, col)` lies inside the grid.
    #[inline]
    pub const fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.columns
    }

    /// Flat index of `(row, col)`. The caller checks [`GridTopology::contains`].
    #[inline]
    pub const fn index(&self, row: usize, col: usize) -> usize {
        row * self.columns + col
    }

    /// Grid coordinate of flat index `i`.
    #[inline]
    pub const fn coord(&self, i: usize) -> GridCoord {
        GridCoord::from_index(i, self.columns)
    }

    /// Number of grid cells, `(rows - 1) × (columns - 1)`, zero for a rope.
    #[inline]
    pub const fn cell_count(&self) -> usize {
        self.rows.saturating_sub(1) * self.columns.saturating_sub(1)
    }

    /// Number of render triangles, two per cell.
    #[inline]
    pub const fn triangle_count(&self) -> usize {
        2 * self.cell_count()
    }

    /// Number of structural springs of both families.
    #[inline]
    pub const fn spring_count(&self) -> usize {
        self.rows * self.columns.saturating_sub(1) + self.columns * self.rows.saturating_sub(1)
    }

    /// Springs along each rope, `(r, c)`–`(r, c + 1)`, as flat index pairs.
    pub fn rope_springs(&self) -> impl Iterator<Item = [usize; 2]> + '_ {
        let columns = self.columns;
        (0..self.rows).flat_map(move |r| {
            (0..columns.saturating_sub(1)).map(move |c| {
                let a = r * columns + c;
                [a, a + 1]
            })
        })
    }

    /// Springs between neighbouring ropes, `(r, c)`–`(r + 1, c)`.
    pub fn cross_springs(&self) -> impl Iterator<Item = [usize; 2]> + '_ {
        let columns = self.columns;
        (0..columns).flat_map(move |c| {
            (0..self.rows.saturating_sub(1)).map(move |r| {
                let a = r * columns + c;
                [a, a + columns]
            })
        })
    }

    /// All structural springs: rope springs first, then cross springs.
    pub fn springs(&self) -> impl Iterator<Item = [usize; 2]> + '_ {
        self.rope_springs().chain(self.cross_springs())
    }

    /// All grid cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        let columns = self.columns;
        (0..self.rows.saturating_sub(1)).flat_map(move |r| {
            (0..columns.saturating_sub(1)).map(move |c| {
                let p1 = r * columns + c;
                GridCell {
                    p1,
                    p2: p1 + 1,
                    p3: p1 + columns,
                    p4: p1 + columns + 1,
                }
            })
        })
    }
}
