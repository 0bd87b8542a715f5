//! Task: training pairs plus test inputs, and shape-ratio utilities.

use crate::grid::Grid;
use serde::{Deserialize, Serialize};

/// One training example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingPair {
    pub input: Grid,
    pub output: Grid,
}

impl TrainingPair {
    /// Per-dimension output/input shape ratio.
    pub fn shape_ratio(&self) -> (f64, f64) {
        let (ir, ic) = self.input.shape();
        let (or, oc) = self.output.shape();
        (or as f64 / ir as f64, oc as f64 / ic as f64)
    }
}

/// A test entry. Outputs are optional; evaluation sets carry them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub input: Grid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Grid>,
}

/// On-disk layout of a task file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskFile {
    pub train: Vec<TrainingPair>,
    #[serde(default)]
    pub test: Vec<TestCase>,
}

/// A named puzzle: ordered training pairs plus test inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: String,
    pub train: Vec<TrainingPair>,
    pub test: Vec<TestCase>,
}

impl Task {
    pub fn new(id: impl Into<String>, train: Vec<TrainingPair>, test: Vec<TestCase>) -> Self {
        Self {
            id: id.into(),
            train,
            test,
        }
    }

    pub fn from_file(id: impl Into<String>, file: TaskFile) -> Self {
        Self::new(id, file.train, file.test)
    }

    /// Stable identity used as the solution cache key.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Output/input shape ratio of every training pair, in order.
    pub fn shape_ratios(&self) -> Vec<(f64, f64)> {
        self.train.iter().map(TrainingPair::shape_ratio).collect()
    }

    /// True when every training output has the same shape as its input.
    pub fn is_shape_ratio_unchanged(&self) -> bool {
        !self.train.is_empty() && self.shape_ratios().iter().all(|&r| r == (1.0, 1.0))
    }

    /// True when every training ratio is a whole number of at least one in
    /// both dimensions.
    pub fn is_shape_ratio_integer_multiple(&self) -> bool {
        let whole = |v: f64| v >= 1.0 && v.fract() == 0.0;
        self.shape_ratios()
            .iter()
            .all(|&(r, c)| whole(r) && whole(c))
    }

    /// Ratio of the first training pair, truncated to whole tiles. Used to
    /// size canvases for grids without a known output.
    pub fn output_ratio(&self) -> Option<(usize, usize)> {
        self.train
            .first()
            .map(|pair| {
                let (r, c) = pair.shape_ratio();
                (r as usize, c as usize)
            })
    }

    /// The training output paired with `grid`, if `grid` is one of this
    /// task's training inputs (the same object, not an equal copy).
    pub fn reference_output(&self, grid: &Grid) -> Option<&Grid> {
        self.train
            .iter()
            .find(|pair| std::ptr::eq(&pair.input, grid))
            .map(|pair| &pair.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(input: Vec<Vec<u8>>, output: Vec<Vec<u8>>) -> TrainingPair {
        TrainingPair {
            input: Grid::from_rows(input).unwrap(),
            output: Grid::from_rows(output).unwrap(),
        }
    }

    #[test]
    fn test_shape_ratios() {
        let task = Task::new(
            "ratios",
            vec![
                pair(vec![vec![1, 2]], vec![vec![1, 2, 1, 2], vec![1, 2, 1, 2]]),
                pair(vec![vec![3]], vec![vec![3, 3], vec![3, 3]]),
            ],
            vec![],
        );
        assert_eq!(task.shape_ratios(), vec![(2.0, 2.0), (2.0, 2.0)]);
        assert!(task.is_shape_ratio_integer_multiple());
        assert!(!task.is_shape_ratio_unchanged());
        assert_eq!(task.output_ratio(), Some((2, 2)));
    }

    #[test]
    fn test_fractional_ratio() {
        let task = Task::new(
            "fraction",
            vec![pair(vec![vec![1, 2], vec![3, 4]], vec![vec![1, 2, 3]])],
            vec![],
        );
        assert!(!task.is_shape_ratio_integer_multiple());
        assert_eq!(task.output_ratio(), Some((0, 1)));
    }

    #[test]
    fn test_reference_output_is_by_identity() {
        let task = Task::new(
            "identity",
            vec![pair(vec![vec![1]], vec![vec![1, 1]])],
            vec![],
        );
        let copy = task.train[0].input.clone();
        assert!(task.reference_output(&task.train[0].input).is_some());
        assert!(task.reference_output(&copy).is_none());
    }

    #[test]
    fn test_task_file_json() {
        let json = r#"{"train":[{"input":[[1]],"output":[[1,1]]}],"test":[{"input":[[2]]}]}"#;
        let file: TaskFile = serde_json::from_str(json).unwrap();
        let task = Task::from_file("json", file);
        assert_eq!(task.id(), "json");
        assert_eq!(task.test[0].input.get(0, 0), 2);
        assert!(task.test[0].output.is_none());
    }
}
