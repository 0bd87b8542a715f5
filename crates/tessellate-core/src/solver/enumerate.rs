//! Candidate enumeration: the lazy cross product of the three catalogs.

use super::catalog::Catalog;
use super::preprocess::Preprocess;
use super::query::Query;
use super::transform::Transform;
use serde::{Deserialize, Serialize};

/// One fully bound pipeline: exactly one value from each stage.
///
/// The derived ordering compares preprocess, then transform, then query,
/// which is the order [`Candidates`] yields them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Candidate {
    pub preprocess: Preprocess,
    pub transform: Transform,
    pub query: Query,
}

impl Candidate {
    pub fn new(preprocess: Preprocess, transform: Transform, query: Query) -> Self {
        Self {
            preprocess,
            transform,
            query,
        }
    }
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} | {} | {}", self.preprocess, self.transform, self.query)
    }
}

/// Lazy, ordered cross product over a catalog.
///
/// Preprocess varies slowest and query fastest; within a stage, entries keep
/// declaration order and each entry its domain order.
pub struct Candidates<'a> {
    preprocess: Vec<&'a Preprocess>,
    transform: Vec<&'a Transform>,
    query: Vec<&'a Query>,
    /// Odometer over the three flattened stages
    cursor: [usize; 3],
    emitted: usize,
    done: bool,
}

impl<'a> Candidates<'a> {
    pub(crate) fn new(catalog: &'a Catalog) -> Self {
        let preprocess: Vec<_> = catalog.preprocess.iter().flat_map(|e| &e.domain).collect();
        let transform: Vec<_> = catalog.transform.iter().flat_map(|e| &e.domain).collect();
        let query: Vec<_> = catalog.query.iter().flat_map(|e| &e.domain).collect();
        let done = preprocess.is_empty() || transform.is_empty() || query.is_empty();
        Self {
            preprocess,
            transform,
            query,
            cursor: [0; 3],
            emitted: 0,
            done,
        }
    }

    fn total(&self) -> usize {
        self.preprocess.len() * self.transform.len() * self.query.len()
    }
}

impl Iterator for Candidates<'_> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        if self.done {
            return None;
        }
        let [p, t, q] = self.cursor;
        let candidate = Candidate::new(*self.preprocess[p], *self.transform[t], *self.query[q]);

        // Advance the odometer, query fastest.
        self.cursor[2] += 1;
        if self.cursor[2] == self.query.len() {
            self.cursor[2] = 0;
            self.cursor[1] += 1;
            if self.cursor[1] == self.transform.len() {
                self.cursor[1] = 0;
                self.cursor[0] += 1;
                if self.cursor[0] == self.preprocess.len() {
                    self.done = true;
                }
            }
        }
        self.emitted += 1;
        Some(candidate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.done { 0 } else { self.total() - self.emitted };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Candidates<'_> {}

impl std::iter::FusedIterator for Candidates<'_> {}
