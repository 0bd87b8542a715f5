//! Grid primitives the catalogs are built from.
//!
//! `geometry` reshapes and recolors grids; `stats` measures them.

pub mod geometry;
pub mod stats;

pub use geometry::Axis;
