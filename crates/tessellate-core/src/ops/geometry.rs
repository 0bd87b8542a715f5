//! Geometric grid primitives: flips, quarter turns, rolls, crops, recoloring.

use crate::grid::{Grid, BACKGROUND};
use serde::{Deserialize, Serialize};

/// Grid axis. `Rows` is axis 0 (vertical), `Cols` is axis 1 (horizontal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Axis {
    Rows,
    Cols,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Rows => write!(f, "0"),
            Axis::Cols => write!(f, "1"),
        }
    }
}

/// Reverse the order of rows (`Axis::Rows`) or of columns (`Axis::Cols`).
pub fn flip(grid: &Grid, axis: Axis) -> Grid {
    let (rows, cols) = grid.shape();
    match axis {
        Axis::Rows => Grid::from_fn(rows, cols, |r, c| grid.get(rows - 1 - r, c)),
        Axis::Cols => Grid::from_fn(rows, cols, |r, c| grid.get(r, cols - 1 - c)),
    }
}

/// Reverse both axes (a half turn).
pub fn flip_both(grid: &Grid) -> Grid {
    rot90(grid, 2)
}

/// Rotate counter-clockwise by `k` quarter turns. Negative `k` turns clockwise.
pub fn rot90(grid: &Grid, k: i32) -> Grid {
    let (rows, cols) = grid.shape();
    match k.rem_euclid(4) {
        0 => grid.clone(),
        1 => Grid::from_fn(cols, rows, |r, c| grid.get(c, cols - 1 - r)),
        2 => Grid::from_fn(rows, cols, |r, c| grid.get(rows - 1 - r, cols - 1 - c)),
        _ => Grid::from_fn(cols, rows, |r, c| grid.get(rows - 1 - c, r)),
    }
}

/// Cyclically shift cells by `shift` positions along `axis`.
///
/// A positive shift along `Axis::Rows` moves every row down, wrapping the
/// last row to the top.
pub fn roll(grid: &Grid, shift: i32, axis: Axis) -> Grid {
    let (rows, cols) = grid.shape();
    match axis {
        Axis::Rows => {
            let s = shift.rem_euclid(rows as i32) as usize;
            Grid::from_fn(rows, cols, |r, c| grid.get((r + rows - s) % rows, c))
        }
        Axis::Cols => {
            let s = shift.rem_euclid(cols as i32) as usize;
            Grid::from_fn(rows, cols, |r, c| grid.get(r, (c + cols - s) % cols))
        }
    }
}

/// Swap the two axes.
pub fn transpose(grid: &Grid) -> Grid {
    let (rows, cols) = grid.shape();
    Grid::from_fn(cols, rows, |r, c| grid.get(c, r))
}

/// Bounding box of the cells whose color exceeds `threshold`.
///
/// Returns the whole grid when no cell exceeds the threshold.
pub fn crop_inner(grid: &Grid, threshold: u8) -> Grid {
    let (rows, cols) = grid.shape();
    let mut bounds: Option<(usize, usize, usize, usize)> = None;
    for r in 0..rows {
        for c in 0..cols {
            if grid.get(r, c) > threshold {
                bounds = Some(match bounds {
                    None => (r, r, c, c),
                    Some((r0, r1, c0, c1)) => (r0.min(r), r1.max(r), c0.min(c), c1.max(c)),
                });
            }
        }
    }

    match bounds {
        None => grid.clone(),
        Some((r0, r1, c0, c1)) => {
            Grid::from_fn(r1 - r0 + 1, c1 - c0 + 1, |r, c| grid.get(r0 + r, c0 + c))
        }
    }
}

/// Keep only the rows and columns containing a cell whose color exceeds
/// `threshold`. Returns `None` when nothing is kept.
pub fn crop_outer(grid: &Grid, threshold: u8) -> Option<Grid> {
    let (rows, cols) = grid.shape();
    let keep_rows: Vec<usize> = (0..rows)
        .filter(|&r| grid.row(r).iter().any(|&v| v > threshold))
        .collect();
    let keep_cols: Vec<usize> = (0..cols)
        .filter(|&c| (0..rows).any(|r| grid.get(r, c) > threshold))
        .collect();
    if keep_rows.is_empty() || keep_cols.is_empty() {
        return None;
    }
    Some(Grid::from_fn(keep_rows.len(), keep_cols.len(), |r, c| {
        grid.get(keep_rows[r], keep_cols[c])
    }))
}

/// Swap figure and ground: background cells take `color`, every other cell
/// becomes background.
pub fn invert(grid: &Grid, color: u8) -> Grid {
    let (rows, cols) = grid.shape();
    Grid::from_fn(rows, cols, |r, c| {
        if grid.get(r, c) == BACKGROUND {
            color
        } else {
            BACKGROUND
        }
    })
}

/// Nearest-neighbour upscale: every cell becomes a `row_factor x col_factor`
/// block. Returns `None` for a zero factor.
pub fn upscale(grid: &Grid, row_factor: usize, col_factor: usize) -> Option<Grid> {
    if row_factor == 0 || col_factor == 0 {
        return None;
    }
    let (rows, cols) = grid.shape();
    Some(Grid::from_fn(rows * row_factor, cols * col_factor, |r, c| {
        grid.get(r / row_factor, c / col_factor)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(rows: &[&[u8]]) -> Grid {
        Grid::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn test_flip() {
        let grid = g(&[&[1, 2], &[3, 4]]);
        assert_eq!(flip(&grid, Axis::Rows), g(&[&[3, 4], &[1, 2]]));
        assert_eq!(flip(&grid, Axis::Cols), g(&[&[2, 1], &[4, 3]]));
        assert_eq!(flip_both(&grid), g(&[&[4, 3], &[2, 1]]));
    }

    #[test]
    fn test_rot90() {
        let grid = g(&[&[1, 2], &[3, 4]]);
        assert_eq!(rot90(&grid, 1), g(&[&[2, 4], &[1, 3]]));
        assert_eq!(rot90(&grid, 2), g(&[&[4, 3], &[2, 1]]));
        assert_eq!(rot90(&grid, 3), g(&[&[3, 1], &[4, 2]]));
        assert_eq!(rot90(&grid, -1), rot90(&grid, 3));
        assert_eq!(rot90(&grid, 4), grid);

        let wide = g(&[&[1, 2, 3]]);
        assert_eq!(rot90(&wide, 1), g(&[&[3], &[2], &[1]]));
    }

    #[test]
    fn test_roll() {
        let grid = g(&[&[1, 2, 3], &[4, 5, 6]]);
        assert_eq!(roll(&grid, 1, Axis::Rows), g(&[&[4, 5, 6], &[1, 2, 3]]));
        assert_eq!(roll(&grid, 1, Axis::Cols), g(&[&[3, 1, 2], &[6, 4, 5]]));
        assert_eq!(roll(&grid, -1, Axis::Cols), g(&[&[2, 3, 1], &[5, 6, 4]]));
    }

    #[test]
    fn test_transpose() {
        let grid = g(&[&[1, 2, 3], &[4, 5, 6]]);
        assert_eq!(transpose(&grid), g(&[&[1, 4], &[2, 5], &[3, 6]]));
    }

    #[test]
    fn test_crop_inner() {
        let grid = g(&[&[0, 0, 0, 0], &[0, 5, 0, 0], &[0, 0, 7, 0], &[0, 0, 0, 0]]);
        assert_eq!(crop_inner(&grid, 0), g(&[&[5, 0], &[0, 7]]));
        assert_eq!(crop_inner(&grid, 5), g(&[&[7]]));
        assert_eq!(crop_inner(&grid, 8), grid);
    }

    #[test]
    fn test_crop_outer() {
        let grid = g(&[&[3, 0, 4], &[0, 0, 0], &[6, 0, 1]]);
        assert_eq!(crop_outer(&grid, 0), Some(g(&[&[3, 4], &[6, 1]])));
        assert_eq!(crop_outer(&grid, 9), None);
    }

    #[test]
    fn test_invert_and_upscale() {
        let grid = g(&[&[0, 2], &[2, 0]]);
        assert_eq!(invert(&grid, 7), g(&[&[7, 0], &[0, 7]]));
        assert_eq!(
            upscale(&grid, 2, 1),
            Some(g(&[&[0, 2], &[0, 2], &[2, 0], &[2, 0]]))
        );
        assert_eq!(upscale(&grid, 0, 1), None);
    }
}
