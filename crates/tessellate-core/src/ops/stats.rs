//! Color statistics and structural tests over a single grid.

use super::geometry::{flip, flip_both, transpose, Axis};
use crate::grid::{Grid, BACKGROUND, PALETTE_SIZE};

/// Occurrence count of every palette color.
pub fn bincount(grid: &Grid) -> [usize; PALETTE_SIZE] {
    let mut counts = [0usize; PALETTE_SIZE];
    for color in grid.cells() {
        counts[color as usize] += 1;
    }
    counts
}

/// Number of distinct non-background colors present.
pub fn count_colors(grid: &Grid) -> usize {
    bincount(grid)[1..].iter().filter(|&&n| n > 0).count()
}

/// Number of non-background cells.
pub fn count_squares(grid: &Grid) -> usize {
    grid.cells().filter(|&v| v != BACKGROUND).count()
}

/// Most frequent non-background color. Ties go to the lower color.
pub fn max_color(grid: &Grid) -> Option<u8> {
    let counts = bincount(grid);
    (1..PALETTE_SIZE)
        .filter(|&c| counts[c] > 0)
        .max_by(|&a, &b| counts[a].cmp(&counts[b]).then(b.cmp(&a)))
        .map(|c| c as u8)
}

/// Least frequent non-background color present. Ties go to the lower color.
pub fn min_color(grid: &Grid) -> Option<u8> {
    let counts = bincount(grid);
    (1..PALETTE_SIZE)
        .filter(|&c| counts[c] > 0)
        .min_by(|&a, &b| counts[a].cmp(&counts[b]).then(a.cmp(&b)))
        .map(|c| c as u8)
}

/// Largest non-background color value present.
pub fn max_color_1d(grid: &Grid) -> Option<u8> {
    grid.cells().filter(|&v| v != BACKGROUND).max()
}

/// Smallest non-background color value present.
pub fn min_color_1d(grid: &Grid) -> Option<u8> {
    grid.cells().filter(|&v| v != BACKGROUND).min()
}

/// The `rank`-th most frequent color present (rank 0 is the most frequent),
/// background included. Ties go to the lower color.
pub fn color_by_rank(grid: &Grid, rank: usize) -> Option<u8> {
    let counts = bincount(grid);
    let mut present: Vec<usize> = (0..PALETTE_SIZE).filter(|&c| counts[c] > 0).collect();
    present.sort_by(|&a, &b| counts[b].cmp(&counts[a]).then(a.cmp(&b)));
    present.get(rank).map(|&c| c as u8)
}

/// Smallest period of the row sequence (`Axis::Rows`) or column sequence
/// (`Axis::Cols`). An aperiodic grid has period equal to its length.
pub fn period_length(grid: &Grid, axis: Axis) -> usize {
    let len = match axis {
        Axis::Rows => grid.rows(),
        Axis::Cols => grid.cols(),
    };
    let lines: Vec<Vec<u8>> = (0..len)
        .map(|i| match axis {
            Axis::Rows => grid.row(i).to_vec(),
            Axis::Cols => grid.col(i),
        })
        .collect();

    (1..len)
        .find(|&p| (0..len - p).all(|i| lines[i] == lines[i + p]))
        .unwrap_or(len)
}

/// True if the grid equals one of its mirror images, its transpose, or its
/// half turn.
pub fn is_symmetric(grid: &Grid) -> bool {
    *grid == flip(grid, Axis::Rows)
        || *grid == flip(grid, Axis::Cols)
        || *grid == flip_both(grid)
        || *grid == transpose(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(rows: &[&[u8]]) -> Grid {
        Grid::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn test_color_counts() {
        let grid = g(&[&[0, 3, 3], &[5, 3, 0], &[5, 0, 8]]);
        assert_eq!(bincount(&grid)[3], 3);
        assert_eq!(count_colors(&grid), 3);
        assert_eq!(count_squares(&grid), 6);
        assert_eq!(max_color(&grid), Some(3));
        assert_eq!(min_color(&grid), Some(8));
        assert_eq!(max_color_1d(&grid), Some(8));
        assert_eq!(min_color_1d(&grid), Some(3));
    }

    #[test]
    fn test_empty_grid_has_no_extremes() {
        let grid = Grid::blank(2, 2).unwrap();
        assert_eq!(count_colors(&grid), 0);
        assert_eq!(max_color(&grid), None);
        assert_eq!(min_color_1d(&grid), None);
    }

    #[test]
    fn test_color_by_rank() {
        let grid = g(&[&[0, 0, 0], &[4, 4, 2]]);
        assert_eq!(color_by_rank(&grid, 0), Some(0));
        assert_eq!(color_by_rank(&grid, 1), Some(4));
        assert_eq!(color_by_rank(&grid, 2), Some(2));
        assert_eq!(color_by_rank(&grid, 3), None);
    }

    #[test]
    fn test_period_length() {
        let grid = g(&[&[1, 2, 1, 2], &[3, 4, 3, 4], &[1, 2, 1, 2]]);
        assert_eq!(period_length(&grid, Axis::Cols), 2);
        assert_eq!(period_length(&grid, Axis::Rows), 2);
        let plain = g(&[&[1, 2], &[3, 4]]);
        assert_eq!(period_length(&plain, Axis::Rows), 2);
    }

    #[test]
    fn test_symmetry() {
        assert!(is_symmetric(&g(&[&[1, 2, 1], &[3, 4, 3]])));
        assert!(is_symmetric(&g(&[&[1, 2], &[2, 1]])));
        assert!(!is_symmetric(&g(&[&[1, 2], &[3, 4]])));
    }
}
