//! Preprocess stage: reshape the input once before tiling.

use crate::error::TrialFailure;
use crate::grid::Grid;
use crate::ops::geometry::{crop_inner, crop_outer};
use serde::{Deserialize, Serialize};

/// A bound preprocess operation.
///
/// Variant order is catalog order; the derived `Ord` is enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Preprocess {
    Identity,
    /// Bounding box of cells brighter than the threshold
    CropInner(u8),
    /// Rows and columns holding a cell brighter than the threshold
    CropOuter(u8),
}

impl Preprocess {
    pub fn apply(&self, grid: &Grid) -> Result<Grid, TrialFailure> {
        match *self {
            Preprocess::Identity => Ok(grid.clone()),
            Preprocess::CropInner(threshold) => Ok(crop_inner(grid, threshold)),
            Preprocess::CropOuter(threshold) => {
                crop_outer(grid, threshold).ok_or(TrialFailure::EmptyPreprocess)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Preprocess::Identity => "identity",
            Preprocess::CropInner(_) => "crop_inner",
            Preprocess::CropOuter(_) => "crop_outer",
        }
    }
}

impl std::fmt::Display for Preprocess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Preprocess::Identity => write!(f, "{}", self.name()),
            Preprocess::CropInner(t) | Preprocess::CropOuter(t) => write!(f, "{}({})", self.name(), t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_outer_failure() {
        let grid = Grid::from_rows(vec![vec![1, 0], vec![0, 2]]).unwrap();
        assert_eq!(Preprocess::Identity.apply(&grid).unwrap(), grid);
        assert_eq!(
            Preprocess::CropOuter(2).apply(&grid),
            Err(TrialFailure::EmptyPreprocess)
        );
        assert_eq!(
            Preprocess::CropInner(1).apply(&grid).unwrap(),
            Grid::from_rows(vec![vec![2]]).unwrap()
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Preprocess::CropInner(3).to_string(), "crop_inner(3)");
        assert_eq!(Preprocess::Identity.to_string(), "identity");
    }
}
