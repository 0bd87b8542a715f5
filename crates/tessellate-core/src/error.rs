//! Error types for grid construction, trials, and applying solutions.

use thiserror::Error;

/// Reasons a grid could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A grid must have at least one row and one column
    #[error("grid shape {rows}x{cols} is empty")]
    EmptyShape { rows: usize, cols: usize },
    /// Rows of differing lengths
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    /// Cell value outside the palette
    #[error("color {color} at ({row}, {col}) is outside the palette")]
    ColorOutOfRange { row: usize, col: usize, color: u8 },
}

/// A fault raised while running one candidate against one grid.
///
/// The search driver treats every variant exactly like a wrong answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrialFailure {
    #[error(transparent)]
    Grid(#[from] GridError),
    /// Preprocessing removed every row or column
    #[error("preprocessing produced an empty grid")]
    EmptyPreprocess,
    /// Canvas is smaller than the working grid in some dimension
    #[error("tile ratio {rows}x{cols} is degenerate")]
    DegenerateTileRatio { rows: usize, cols: usize },
    /// Transformed tile does not fit its block
    #[error("tile shape {found:?} does not match block shape {expected:?}")]
    TileShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// Block extends past the canvas edge
    #[error("block at ({row}, {col}) of shape {shape:?} exceeds canvas {canvas:?}")]
    BlockOutOfBounds {
        row: usize,
        col: usize,
        shape: (usize, usize),
        canvas: (usize, usize),
    },
    /// Query position outside the working grid
    #[error("cell ({row}, {col}) is outside the working grid")]
    CellOutOfRange { row: usize, col: usize },
    /// No reference output and no usable task ratio to size a canvas
    #[error("task has no training pair to derive an output shape ratio")]
    MissingShapeRatio,
}

/// Reasons `apply` could not produce an output grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("no solution cached for task '{0}'")]
    NotSolved(String),
    #[error("cached candidate failed: {0}")]
    Trial(#[from] TrialFailure),
}
