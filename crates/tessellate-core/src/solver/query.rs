//! Query stage: decides, per tile, whether the tile gets the transform.
//!
//! A query sees the working grid and a position on it, never the tile index
//! itself; see [`super::trial`].

use crate::error::TrialFailure;
use crate::grid::{Grid, BACKGROUND};
use crate::ops::geometry::Axis;
use crate::ops::stats;
use serde::{Deserialize, Serialize};

/// A bound tile-selection predicate.
///
/// Variant order is catalog order; the derived `Ord` is enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Query {
    True,
    False,
    NotZero,
    MaxColor,
    MinColor,
    MaxColor1d,
    MinColor1d,
    CountColors,
    CountColorsRow,
    CountColorsCol,
    CountSquares,
    CountSquaresRow,
    CountSquaresCol,
    Color(u8),
    PeriodLength0,
    PeriodLength1,
    Bincount(u8),
    BincountSorted(u8),
    Symmetry,
}

impl Query {
    /// Evaluate at position `(x, y)` of `grid`.
    pub fn evaluate(&self, grid: &Grid, x: usize, y: usize) -> Result<bool, TrialFailure> {
        let value = grid
            .try_get(x, y)
            .ok_or(TrialFailure::CellOutOfRange { row: x, col: y })?;
        let (gx, gy) = grid.shape();

        let selected = match *self {
            Query::True => true,
            Query::False => false,
            Query::NotZero => value != BACKGROUND,
            Query::MaxColor => Some(value) == stats::max_color(grid),
            Query::MinColor => Some(value) == stats::min_color(grid),
            Query::MaxColor1d => Some(value) == stats::max_color_1d(grid),
            Query::MinColor1d => Some(value) == stats::min_color_1d(grid),
            Query::CountColors => usize::from(value) >= stats::count_colors(grid),
            Query::CountColorsRow => x + gx * y <= stats::count_colors(grid),
            Query::CountColorsCol => y + gy * x <= stats::count_colors(grid),
            Query::CountSquares => usize::from(value) >= stats::count_squares(grid),
            Query::CountSquaresRow => x + gx * y <= stats::count_squares(grid),
            Query::CountSquaresCol => y + gy * x <= stats::count_squares(grid),
            Query::Color(color) => value == color,
            Query::PeriodLength0 => x % stats::period_length(grid, Axis::Rows) == 0,
            Query::PeriodLength1 => y % stats::period_length(grid, Axis::Cols) == 0,
            Query::Bincount(n) => stats::bincount(grid)[usize::from(value)] == usize::from(n),
            Query::BincountSorted(rank) => {
                stats::color_by_rank(grid, rank.into()) == Some(value)
            }
            Query::Symmetry => stats::is_symmetric(grid),
        };
        Ok(selected)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Query::True => "query_true",
            Query::False => "query_false",
            Query::NotZero => "query_not_zero",
            Query::MaxColor => "query_max_color",
            Query::MinColor => "query_min_color",
            Query::MaxColor1d => "query_max_color_1d",
            Query::MinColor1d => "query_min_color_1d",
            Query::CountColors => "query_count_colors",
            Query::CountColorsRow => "query_count_colors_row",
            Query::CountColorsCol => "query_count_colors_col",
            Query::CountSquares => "query_count_squares",
            Query::CountSquaresRow => "query_count_squares_row",
            Query::CountSquaresCol => "query_count_squares_col",
            Query::Color(_) => "query_color",
            Query::PeriodLength0 => "query_period_length0",
            Query::PeriodLength1 => "query_period_length1",
            Query::Bincount(_) => "query_bincount",
            Query::BincountSorted(_) => "query_bincount_sorted",
            Query::Symmetry => "is_grid_symmetry",
        }
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Query::Color(n) | Query::Bincount(n) | Query::BincountSorted(n) => {
                write!(f, "{}({})", self.name(), n)
            }
            _ => write!(f, "{}", self.name()),
        }
    }
}
