//! Tessellation strategy for grid-to-grid puzzles.
//!
//! Given training pairs whose outputs are whole multiples of their inputs,
//! [`TessellationSolver`] searches pipelines of the form
//! *preprocess, then tile, placing a transformed copy wherever a query
//! says so* and keeps the first one that reproduces every pair. The
//! winning pipeline is then applied to test inputs.
//!
//! ```
//! use tessellate_core::{Grid, Task, TessellationSolver, TrainingPair};
//!
//! let input = Grid::from_rows(vec![vec![1, 0], vec![0, 2]]).unwrap();
//! let output = Grid::from_rows(vec![
//!     vec![1, 0, 1, 0],
//!     vec![0, 2, 0, 2],
//!     vec![1, 0, 1, 0],
//!     vec![0, 2, 0, 2],
//! ])
//! .unwrap();
//! let task = Task::new("doc", vec![TrainingPair { input, output }], vec![]);
//!
//! let mut solver = TessellationSolver::new();
//! assert!(solver.detect(&task));
//! assert!(solver.solve(&task));
//! let out = solver.apply(&task, &task.train[0].input).unwrap();
//! assert_eq!(out, task.train[0].output);
//! ```

pub mod error;
pub mod grid;
pub mod ops;
pub mod solver;
pub mod strategy;
pub mod task;
pub mod zoom;

pub use error::{ApplyError, GridError, TrialFailure};
pub use grid::{Grid, BACKGROUND, PALETTE_SIZE};
pub use solver::{
    Candidate, Catalog, CatalogVariant, Preprocess, Query, SearchBudget, SearchOutcome,
    SearchStats, SolutionCache, TessellationSolver, Transform,
};
pub use strategy::Strategy;
pub use task::{Task, TaskFile, TestCase, TrainingPair};
pub use zoom::ZoomSolver;
