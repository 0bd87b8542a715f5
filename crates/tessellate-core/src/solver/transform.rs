//! Transform stage: what each selected tile receives.
//!
//! Most transforms are pure functions of the working grid. The `*Loop*`
//! variants are resumable sequences instead: each selected tile consumes the
//! next state (successive quarter turns or flips). A sequence is created
//! fresh for every trial through [`Transform::start`].

use crate::error::{GridError, TrialFailure};
use crate::grid::{Grid, PALETTE_SIZE};
use crate::ops::geometry::{flip, flip_both, invert, rot90, roll, transpose, Axis};
use crate::ops::stats;
use serde::{Deserialize, Serialize};

/// Where `Invert` takes its fill color from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ColorSource {
    MaxColor,
    MinColor,
    MaxColor1d,
    CountColors,
    CountSquares,
    Fixed(u8),
}

impl ColorSource {
    /// Resolve to a palette color for `grid`. Counts above the palette fail
    /// the trial.
    pub fn resolve(&self, grid: &Grid) -> Result<u8, TrialFailure> {
        let value = match *self {
            ColorSource::MaxColor => stats::max_color(grid).map_or(0, usize::from),
            ColorSource::MinColor => stats::min_color(grid).map_or(0, usize::from),
            ColorSource::MaxColor1d => stats::max_color_1d(grid).map_or(0, usize::from),
            ColorSource::CountColors => stats::count_colors(grid),
            ColorSource::CountSquares => stats::count_squares(grid),
            ColorSource::Fixed(color) => usize::from(color),
        };
        if value >= PALETTE_SIZE {
            return Err(GridError::ColorOutOfRange {
                row: 0,
                col: 0,
                color: value.min(u8::MAX as usize) as u8,
            }
            .into());
        }
        Ok(value as u8)
    }
}

impl std::fmt::Display for ColorSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorSource::MaxColor => write!(f, "max_color"),
            ColorSource::MinColor => write!(f, "min_color"),
            ColorSource::MaxColor1d => write!(f, "max_color_1d"),
            ColorSource::CountColors => write!(f, "count_colors"),
            ColorSource::CountSquares => write!(f, "count_squares"),
            ColorSource::Fixed(c) => write!(f, "{}", c),
        }
    }
}

/// A bound transform.
///
/// Variant order is catalog order; the derived `Ord` is enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Transform {
    Identity,
    Flip(Axis),
    /// Counter-clockwise quarter turns
    Rot90(u8),
    Roll { shift: i8, axis: Axis },
    SwapAxes,
    RotateLoop(i8),
    RotateLoopRows(i8),
    RotateLoopCols(i8),
    FlipLoop(u8),
    FlipLoopRows(u8),
    FlipLoopCols(u8),
    /// Fill the background with the most frequent color, clear the rest
    InvertColor,
    /// Fill the background with a resolved color, clear the rest
    Invert(ColorSource),
}

impl Transform {
    /// True for the resumable-sequence variants.
    pub fn is_sequence(&self) -> bool {
        matches!(
            self,
            Transform::RotateLoop(_)
                | Transform::RotateLoopRows(_)
                | Transform::RotateLoopCols(_)
                | Transform::FlipLoop(_)
                | Transform::FlipLoopRows(_)
                | Transform::FlipLoopCols(_)
        )
    }

    /// Prepare this transform for one trial on `grid`.
    pub fn start<'a>(&'a self, grid: &'a Grid) -> TileSource<'a> {
        let (rows, cols) = grid.shape();
        let rows = rows as i32;
        let cols = cols as i32;
        let sequence = |kind, start: i32, step: i32| {
            TileSource::Sequence(TransformSequence::new(kind, start, step, grid.clone()))
        };
        match *self {
            Transform::RotateLoop(s) => sequence(LoopKind::Rotate, s.into(), 1),
            Transform::RotateLoopRows(s) => sequence(LoopKind::Rotate, s.into(), rows % 4),
            Transform::RotateLoopCols(s) => sequence(LoopKind::Rotate, s.into(), cols % 4),
            Transform::FlipLoop(s) => sequence(LoopKind::Flip, s.into(), 1),
            Transform::FlipLoopRows(s) => sequence(LoopKind::Flip, s.into(), rows % 2),
            Transform::FlipLoopCols(s) => sequence(LoopKind::Flip, s.into(), cols % 2),
            _ => TileSource::Pure {
                transform: self,
                grid,
                memo: None,
            },
        }
    }

    /// Apply a pure transform. A sequence variant yields its first state.
    pub fn apply(&self, grid: &Grid) -> Result<Grid, TrialFailure> {
        let result = match *self {
            Transform::Identity => grid.clone(),
            Transform::Flip(axis) => flip(grid, axis),
            Transform::Rot90(k) => rot90(grid, k.into()),
            Transform::Roll { shift, axis } => roll(grid, shift.into(), axis),
            Transform::SwapAxes => transpose(grid),
            Transform::InvertColor => {
                invert(grid, ColorSource::MaxColor.resolve(grid)?)
            }
            Transform::Invert(source) => invert(grid, source.resolve(grid)?),
            _ => return self.start(grid).next_tile(),
        };
        Ok(result)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Transform::Identity => "none",
            Transform::Flip(_) => "flip",
            Transform::Rot90(_) => "rot90",
            Transform::Roll { .. } => "roll",
            Transform::SwapAxes => "swapaxes",
            Transform::RotateLoop(_) => "rotate_loop",
            Transform::RotateLoopRows(_) => "rotate_loop_rows",
            Transform::RotateLoopCols(_) => "rotate_loop_cols",
            Transform::FlipLoop(_) => "flip_loop",
            Transform::FlipLoopRows(_) => "flip_loop_rows",
            Transform::FlipLoopCols(_) => "flip_loop_cols",
            Transform::InvertColor => "grid_invert_color",
            Transform::Invert(_) => "invert",
        }
    }
}

impl std::fmt::Display for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self.name();
        match *self {
            Transform::Identity | Transform::InvertColor => write!(f, "{}", name),
            Transform::SwapAxes => write!(f, "{}(0, 1)", name),
            Transform::Flip(axis) => write!(f, "{}({})", name, axis),
            Transform::Rot90(k) => write!(f, "{}({})", name, k),
            Transform::Roll { shift, axis } => write!(f, "{}({}, {})", name, shift, axis),
            Transform::RotateLoop(s) | Transform::RotateLoopRows(s) | Transform::RotateLoopCols(s) => {
                write!(f, "{}({})", name, s)
            }
            Transform::FlipLoop(s) | Transform::FlipLoopRows(s) | Transform::FlipLoopCols(s) => {
                write!(f, "{}({})", name, s)
            }
            Transform::Invert(source) => write!(f, "{}({})", name, source),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopKind {
    /// Phase `p` yields `rot90(grid, p)`
    Rotate,
    /// Odd phases yield the half-turn flip, even phases the grid itself
    Flip,
}

/// Resumable sequence of grid states. Phase `start + i * step` is yielded on
/// the `i`-th call to `next`.
#[derive(Debug, Clone)]
pub struct TransformSequence {
    kind: LoopKind,
    start: i32,
    step: i32,
    consumed: i32,
    grid: Grid,
}

impl TransformSequence {
    pub fn new(kind: LoopKind, start: i32, step: i32, grid: Grid) -> Self {
        Self {
            kind,
            start,
            step,
            consumed: 0,
            grid,
        }
    }

    /// Rewind to the first state.
    pub fn reset(&mut self) {
        self.consumed = 0;
    }

    /// Number of states consumed since the last reset.
    pub fn consumed(&self) -> usize {
        self.consumed as usize
    }

    fn phase(&self) -> i32 {
        self.start + self.consumed * self.step
    }

    /// Yield the current state and move to the next one.
    pub fn advance(&mut self) -> Grid {
        let phase = self.phase();
        self.consumed += 1;
        match self.kind {
            LoopKind::Rotate => rot90(&self.grid, phase),
            LoopKind::Flip if phase.rem_euclid(2) == 1 => flip_both(&self.grid),
            LoopKind::Flip => self.grid.clone(),
        }
    }
}

/// Never ends; callers take as many states as they have tiles.
impl Iterator for TransformSequence {
    type Item = Grid;

    fn next(&mut self) -> Option<Grid> {
        Some(self.advance())
    }
}

/// Per-trial supplier of tile contents.
pub enum TileSource<'a> {
    /// Same result for every tile, computed on first use
    Pure {
        transform: &'a Transform,
        grid: &'a Grid,
        memo: Option<Grid>,
    },
    /// Advances once per selected tile
    Sequence(TransformSequence),
}

impl TileSource<'_> {
    /// Content for the next selected tile.
    pub fn next_tile(&mut self) -> Result<Grid, TrialFailure> {
        match self {
            TileSource::Pure {
                transform,
                grid,
                memo,
            } => {
                if let Some(tile) = memo {
                    return Ok(tile.clone());
                }
                let tile = transform.apply(grid)?;
                *memo = Some(tile.clone());
                Ok(tile)
            }
            TileSource::Sequence(sequence) => Ok(sequence.advance()),
        }
    }
}
