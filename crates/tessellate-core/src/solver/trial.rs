//! Trial executor: compose an output canvas from tiles of the working grid.
//!
//! The canvas is cut into blocks shaped like the preprocessed grid `G`
//! (`gx x gy`). Tiles are visited row-major; for tile `(x, y)` the query is
//! asked about cell `(x mod gx, y mod gy)` of `G`, and a selected tile takes
//! the transform's next result while an unselected one stays background.
//!
//! Two behaviors are kept as they are rather than corrected:
//!
//! - The query is indexed by position on `G`, not by tile index, so when
//!   the tile grid is larger than `G` along an axis, tiles with the same
//!   residue always get the same decision. This looks unintended.
//! - The tile ratio is an integer division with no remainder check. A canvas
//!   that is not an exact multiple of `G` is silently under-tiled, and with
//!   a reference canvas the uncovered cells keep their reference values.

use super::enumerate::Candidate;
use crate::error::TrialFailure;
use crate::grid::Grid;

/// Where the output canvas comes from.
#[derive(Debug, Clone, Copy)]
pub enum Canvas<'a> {
    /// Known output of a training input, cloned as the starting canvas
    Reference(&'a Grid),
    /// Background canvas sized as `G` scaled by the task's shape ratio
    Scaled { rows: usize, cols: usize },
}

/// Run `candidate` on `grid`. Every fault is returned as a `TrialFailure`.
pub fn run_trial(candidate: &Candidate, grid: &Grid, canvas: Canvas<'_>) -> Result<Grid, TrialFailure> {
    let working = candidate.preprocess.apply(grid)?;
    let (gx, gy) = working.shape();

    let mut output = match canvas {
        Canvas::Reference(reference) => reference.clone(),
        Canvas::Scaled { rows, cols } => {
            if rows == 0 || cols == 0 {
                return Err(TrialFailure::DegenerateTileRatio { rows, cols });
            }
            Grid::blank(gx * rows, gy * cols)?
        }
    };

    let ratio = (output.rows() / gx, output.cols() / gy);
    if ratio.0 == 0 || ratio.1 == 0 {
        return Err(TrialFailure::DegenerateTileRatio {
            rows: ratio.0,
            cols: ratio.1,
        });
    }

    // One source per trial; a sequence restarts here every time.
    let mut tiles = candidate.transform.start(&working);
    let blank = Grid::blank(gx, gy)?;

    for x in 0..ratio.0 {
        for y in 0..ratio.1 {
            let selected = candidate.query.evaluate(&working, x % gx, y % gy)?;
            if selected {
                let tile = tiles.next_tile()?;
                if tile.shape() != (gx, gy) {
                    return Err(TrialFailure::TileShapeMismatch {
                        expected: (gx, gy),
                        found: tile.shape(),
                    });
                }
                output.write_block(x * gx, y * gy, &tile)?;
            } else {
                output.write_block(x * gx, y * gy, &blank)?;
            }
        }
    }

    Ok(output)
}
