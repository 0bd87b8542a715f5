//! Pure-scaling strategy: outputs are nearest-neighbour upscales of inputs.
//!
//! The tessellation gate consults it so the two strategies never claim the
//! same task.

use crate::error::{ApplyError, TrialFailure};
use crate::grid::Grid;
use crate::ops::geometry::upscale;
use crate::strategy::Strategy;
use crate::task::{Task, TrainingPair};

/// Unit struct solver; the answer depends only on the task.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZoomSolver;

impl ZoomSolver {
    pub fn new() -> Self {
        Self
    }

    /// True when every training output is its input upscaled by that pair's
    /// whole-number ratio.
    pub fn solves(&self, task: &Task) -> bool {
        !task.train.is_empty() && task.train.iter().all(Self::is_upscale)
    }

    fn is_upscale(pair: &TrainingPair) -> bool {
        let (r, c) = pair.shape_ratio();
        if r.fract() != 0.0 || c.fract() != 0.0 {
            return false;
        }
        upscale(&pair.input, r as usize, c as usize).as_ref() == Some(&pair.output)
    }
}

impl Strategy for ZoomSolver {
    fn name(&self) -> &'static str {
        "zoom"
    }

    fn detect(&self, task: &Task) -> bool {
        !task.train.is_empty()
            && task.is_shape_ratio_integer_multiple()
            && !task.is_shape_ratio_unchanged()
    }

    fn solve(&mut self, task: &Task) -> bool {
        self.solves(task)
    }

    fn apply(&self, task: &Task, grid: &Grid) -> Result<Grid, ApplyError> {
        if !self.solves(task) {
            return Err(ApplyError::NotSolved(task.id().to_owned()));
        }
        let (rows, cols) = task.output_ratio().ok_or(TrialFailure::MissingShapeRatio)?;
        upscale(grid, rows, cols)
            .ok_or(TrialFailure::DegenerateTileRatio { rows, cols })
            .map_err(ApplyError::from)
    }
}
