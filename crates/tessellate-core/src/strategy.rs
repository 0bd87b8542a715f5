//! The interface an ensemble uses to drive any solving strategy.

use crate::error::ApplyError;
use crate::grid::Grid;
use crate::task::Task;

/// A solving strategy: gate, search, then apply.
///
/// `detect` is a cheap applicability check. `solve` searches for a rule that
/// reproduces every training pair and remembers it. `apply` runs that rule
/// on a new grid.
pub trait Strategy {
    fn name(&self) -> &'static str;

    /// Whether this strategy should attempt `task` at all.
    fn detect(&self, task: &Task) -> bool;

    /// Search for a rule that reproduces every training pair.
    fn solve(&mut self, task: &Task) -> bool;

    /// Apply the rule found by `solve` to `grid`.
    fn apply(&self, task: &Task, grid: &Grid) -> Result<Grid, ApplyError>;

    /// Predictions for every test input, in order.
    fn predict(&self, task: &Task) -> Vec<Result<Grid, ApplyError>> {
        task.test
            .iter()
            .map(|case| self.apply(task, &case.input))
            .collect()
    }
}
