//! Grid: a rectangular array of palette colors.

use crate::error::{GridError, TrialFailure};
use serde::{Deserialize, Serialize};

/// Number of colors in the palette (`0..PALETTE_SIZE`).
pub const PALETTE_SIZE: usize = 10;

/// Color used for blank cells and unselected tiles.
pub const BACKGROUND: u8 = 0;

/// A rectangular grid of colors, stored row-major.
///
/// The shape is always at least 1x1. Serialized as a list of rows, which is
/// the layout task files use.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Create a grid filled with a single color.
    pub fn filled(rows: usize, cols: usize, color: u8) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyShape { rows, cols });
        }
        if color as usize >= PALETTE_SIZE {
            return Err(GridError::ColorOutOfRange { row: 0, col: 0, color });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![color; rows * cols],
        })
    }

    /// Create a background-filled grid.
    pub fn blank(rows: usize, cols: usize) -> Result<Self, GridError> {
        Self::filled(rows, cols, BACKGROUND)
    }

    /// Build a grid from a list of rows, validating shape and palette.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(GridError::EmptyShape {
                rows: height,
                cols: width,
            });
        }

        let mut cells = Vec::with_capacity(height * width);
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(GridError::RaggedRow {
                    row: r,
                    expected: width,
                    found: row.len(),
                });
            }
            for (c, &color) in row.iter().enumerate() {
                if color as usize >= PALETTE_SIZE {
                    return Err(GridError::ColorOutOfRange { row: r, col: c, color });
                }
            }
            cells.extend(row);
        }

        Ok(Self {
            rows: height,
            cols: width,
            cells,
        })
    }

    /// Build a grid cell by cell. Callers guarantee a non-empty shape and
    /// in-palette colors.
    pub(crate) fn from_fn(rows: usize, cols: usize, f: impl Fn(usize, usize) -> u8) -> Self {
        debug_assert!(rows > 0 && cols > 0);
        let mut cells = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                cells.push(f(r, c));
            }
        }
        Self { rows, cols, cells }
    }

    /// `(rows, cols)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Color at `(row, col)`. Panics when out of range, like slice indexing.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        assert!(row < self.rows && col < self.cols, "cell ({row}, {col}) out of range");
        self.cells[row * self.cols + col]
    }

    /// Color at `(row, col)`, or `None` when out of range.
    pub fn try_get(&self, row: usize, col: usize) -> Option<u8> {
        (row < self.rows && col < self.cols).then(|| self.cells[row * self.cols + col])
    }

    /// Iterate over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = u8> + '_ {
        self.cells.iter().copied()
    }

    /// Slice of one row.
    pub fn row(&self, row: usize) -> &[u8] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Copy of one column.
    pub fn col(&self, col: usize) -> Vec<u8> {
        (0..self.rows).map(|r| self.cells[r * self.cols + col]).collect()
    }

    /// Overwrite the block whose top-left corner is `(row, col)` with `tile`.
    ///
    /// Fails if the tile does not fit inside this grid.
    pub fn write_block(&mut self, row: usize, col: usize, tile: &Grid) -> Result<(), TrialFailure> {
        let (th, tw) = tile.shape();
        if row + th > self.rows || col + tw > self.cols {
            return Err(TrialFailure::BlockOutOfBounds {
                row,
                col,
                shape: tile.shape(),
                canvas: self.shape(),
            });
        }
        for r in 0..th {
            let dst = (row + r) * self.cols + col;
            self.cells[dst..dst + tw].copy_from_slice(tile.row(r));
        }
        Ok(())
    }

    /// Convert into a list of rows.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells.chunks(self.cols).map(<[u8]>::to_vec).collect()
    }
}

impl TryFrom<Vec<Vec<u8>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<u8>> {
    fn from(grid: Grid) -> Self {
        grid.to_rows()
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for r in 0..self.rows {
            for (c, color) in self.row(r).iter().enumerate() {
                if c > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", color)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
