//! Option catalogs: the ordered registries each pipeline stage draws from.
//!
//! Every entry is an operation name plus its parameter domain, already bound
//! into stage values. An operation without extra arguments has a domain of
//! exactly one value. Catalogs are built once per process and shared.

use super::enumerate::Candidates;
use super::preprocess::Preprocess;
use super::query::Query;
use super::transform::{ColorSource, Transform};
use crate::ops::geometry::Axis;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Which historical catalog membership to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CatalogVariant {
    #[default]
    Standard,
    /// Earlier membership: parameterized `invert`, fewer queries
    Legacy,
}

impl std::fmt::Display for CatalogVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogVariant::Standard => write!(f, "standard"),
            CatalogVariant::Legacy => write!(f, "legacy"),
        }
    }
}

/// One named operation and its ordered parameter domain.
#[derive(Debug, Clone)]
pub struct CatalogEntry<Op> {
    pub name: &'static str,
    pub domain: Vec<Op>,
}

impl<Op> CatalogEntry<Op> {
    fn new(name: &'static str, domain: impl IntoIterator<Item = Op>) -> Self {
        Self {
            name,
            domain: domain.into_iter().collect(),
        }
    }

    /// Entry whose operation takes no extra arguments.
    fn unit(name: &'static str, op: Op) -> Self {
        Self {
            name,
            domain: vec![op],
        }
    }
}

/// The three stage catalogs.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub variant: CatalogVariant,
    pub preprocess: Vec<CatalogEntry<Preprocess>>,
    pub transform: Vec<CatalogEntry<Transform>>,
    pub query: Vec<CatalogEntry<Query>>,
}

static STANDARD: OnceLock<Catalog> = OnceLock::new();
static LEGACY: OnceLock<Catalog> = OnceLock::new();

impl Catalog {
    /// Shared catalog for `variant`.
    pub fn get(variant: CatalogVariant) -> &'static Catalog {
        match variant {
            CatalogVariant::Standard => STANDARD.get_or_init(|| Self::build(CatalogVariant::Standard)),
            CatalogVariant::Legacy => LEGACY.get_or_init(|| Self::build(CatalogVariant::Legacy)),
        }
    }

    pub fn standard() -> &'static Catalog {
        Self::get(CatalogVariant::Standard)
    }

    pub fn legacy() -> &'static Catalog {
        Self::get(CatalogVariant::Legacy)
    }

    fn build(variant: CatalogVariant) -> Self {
        Self {
            variant,
            preprocess: preprocess_entries(),
            transform: transform_entries(variant),
            query: query_entries(variant),
        }
    }

    /// A fresh, restartable enumeration of every candidate, in order.
    pub fn candidates(&self) -> Candidates<'_> {
        Candidates::new(self)
    }

    /// Size of the cross product.
    pub fn candidate_count(&self) -> usize {
        stage_len(&self.preprocess) * stage_len(&self.transform) * stage_len(&self.query)
    }
}

/// Number of bound values across all entries of one stage.
pub(crate) fn stage_len<Op>(entries: &[CatalogEntry<Op>]) -> usize {
    entries.iter().map(|e| e.domain.len()).sum()
}

fn preprocess_entries() -> Vec<CatalogEntry<Preprocess>> {
    vec![
        CatalogEntry::unit("identity", Preprocess::Identity),
        CatalogEntry::new("crop_inner", (0..=8).map(Preprocess::CropInner)),
        CatalogEntry::new("crop_outer", (0..=8).map(Preprocess::CropOuter)),
    ]
}

fn transform_entries(variant: CatalogVariant) -> Vec<CatalogEntry<Transform>> {
    let rolls = [-1i8, 1].into_iter().flat_map(|shift| {
        [Axis::Rows, Axis::Cols]
            .into_iter()
            .map(move |axis| Transform::Roll { shift, axis })
    });

    let mut entries = vec![
        CatalogEntry::unit("none", Transform::Identity),
        CatalogEntry::new("flip", [Axis::Rows, Axis::Cols].map(Transform::Flip)),
        CatalogEntry::new("rot90", [1, 2, 3].map(Transform::Rot90)),
        CatalogEntry::new("roll", rolls),
        CatalogEntry::unit("swapaxes", Transform::SwapAxes),
        CatalogEntry::new("rotate_loop", (-4..4).map(Transform::RotateLoop)),
        CatalogEntry::new("rotate_loop_rows", (-4..4).map(Transform::RotateLoopRows)),
        CatalogEntry::new("rotate_loop_cols", (-4..4).map(Transform::RotateLoopCols)),
        CatalogEntry::new("flip_loop", (0..2).map(Transform::FlipLoop)),
        CatalogEntry::new("flip_loop_rows", (0..2).map(Transform::FlipLoopRows)),
        CatalogEntry::new("flip_loop_cols", (0..2).map(Transform::FlipLoopCols)),
    ];

    match variant {
        CatalogVariant::Standard => {
            entries.push(CatalogEntry::unit("grid_invert_color", Transform::InvertColor));
        }
        CatalogVariant::Legacy => {
            let sources = [
                ColorSource::MaxColor,
                ColorSource::MinColor,
                ColorSource::MaxColor1d,
                ColorSource::CountColors,
                ColorSource::CountSquares,
            ]
            .into_iter()
            .chain((1..=8).map(ColorSource::Fixed));
            entries.push(CatalogEntry::new("invert", sources.map(Transform::Invert)));
        }
    }
    entries
}

fn query_entries(variant: CatalogVariant) -> Vec<CatalogEntry<Query>> {
    let standard = variant == CatalogVariant::Standard;
    let mut entries = vec![CatalogEntry::unit("query_true", Query::True)];
    if standard {
        entries.push(CatalogEntry::unit("query_false", Query::False));
    }
    entries.extend([
        CatalogEntry::unit("query_not_zero", Query::NotZero),
        CatalogEntry::unit("query_max_color", Query::MaxColor),
        CatalogEntry::unit("query_min_color", Query::MinColor),
        CatalogEntry::unit("query_max_color_1d", Query::MaxColor1d),
        CatalogEntry::unit("query_min_color_1d", Query::MinColor1d),
        CatalogEntry::unit("query_count_colors", Query::CountColors),
        CatalogEntry::unit("query_count_colors_row", Query::CountColorsRow),
        CatalogEntry::unit("query_count_colors_col", Query::CountColorsCol),
        CatalogEntry::unit("query_count_squares", Query::CountSquares),
        CatalogEntry::unit("query_count_squares_row", Query::CountSquaresRow),
        CatalogEntry::unit("query_count_squares_col", Query::CountSquaresCol),
        CatalogEntry::new("query_color", (0..10).map(Query::Color)),
    ]);
    if standard {
        entries.extend([
            CatalogEntry::unit("query_period_length0", Query::PeriodLength0),
            CatalogEntry::unit("query_period_length1", Query::PeriodLength1),
            CatalogEntry::new("query_bincount", (0..10).map(Query::Bincount)),
            CatalogEntry::new("query_bincount_sorted", (0..10).map(Query::BincountSorted)),
            CatalogEntry::unit("is_grid_symmetry", Query::Symmetry),
        ]);
    }
    entries
}
