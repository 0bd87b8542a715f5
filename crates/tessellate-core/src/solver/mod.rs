//! Tessellation solver: gate, search, cache, apply.
//!
//! The search walks the cross product of the preprocess, transform, and
//! query catalogs in a fixed order and keeps the first candidate that
//! reproduces every training pair of a task.

mod cache;
mod catalog;
mod enumerate;
mod preprocess;
mod query;
mod transform;
mod trial;
mod types;

pub use cache::SolutionCache;
pub use catalog::{Catalog, CatalogEntry, CatalogVariant};
pub use enumerate::{Candidate, Candidates};
pub use preprocess::Preprocess;
pub use query::Query;
pub use transform::{ColorSource, LoopKind, TileSource, Transform, TransformSequence};
pub use trial::{run_trial, Canvas};
pub use types::{SearchBudget, SearchOutcome, SearchStats};

use crate::error::{ApplyError, TrialFailure};
use crate::grid::Grid;
use crate::ops::stats::count_colors;
use crate::strategy::Strategy;
use crate::task::Task;
use crate::zoom::ZoomSolver;
use std::time::Instant;
use tracing::{debug, info, trace};

/// Search driver. Owns the solution cache for one solving session.
#[derive(Debug, Clone)]
pub struct TessellationSolver {
    catalog: &'static Catalog,
    budget: SearchBudget,
    cache: SolutionCache,
    /// Entries from an earlier session, checked against the task before use
    seeded: SolutionCache,
    stats: SearchStats,
}

impl Default for TessellationSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TessellationSolver {
    /// Solver over the standard catalog with no budget.
    pub fn new() -> Self {
        Self::with_catalog(CatalogVariant::Standard)
    }

    pub fn with_catalog(variant: CatalogVariant) -> Self {
        Self {
            catalog: Catalog::get(variant),
            budget: SearchBudget::unlimited(),
            cache: SolutionCache::new(),
            seeded: SolutionCache::new(),
            stats: SearchStats::default(),
        }
    }

    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Seed the cache, e.g. with solutions saved by an earlier session.
    ///
    /// A seeded entry is only trusted once it reproduces every training pair
    /// of the task it is looked up for; otherwise it is dropped and the
    /// search runs.
    pub fn with_cache(mut self, cache: SolutionCache) -> Self {
        self.seeded.merge(cache);
        self
    }

    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    pub fn cache(&self) -> &SolutionCache {
        &self.cache
    }

    /// Verified entries plus seeded entries not yet looked up, for saving.
    /// Seeded entries that failed verification are gone.
    pub fn into_cache(self) -> SolutionCache {
        self.snapshot()
    }

    pub fn snapshot(&self) -> SolutionCache {
        let mut all = self.cache.clone();
        all.merge(self.seeded.clone());
        all
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// The candidate cached for `task`, if any.
    pub fn cached(&self, task: &Task) -> Option<&Candidate> {
        self.cache.get(task.id())
    }

    /// Applicability gate. Rejects shape-preserving tasks, non-integer or
    /// inconsistent color tasks, and tasks a pure upscale already solves.
    pub fn detect(&self, task: &Task) -> bool {
        if task.train.is_empty() {
            debug!(task = task.id(), "no training pairs");
            return false;
        }
        if task.is_shape_ratio_unchanged() {
            debug!(task = task.id(), "shape unchanged");
            return false;
        }
        if !task.is_shape_ratio_integer_multiple() {
            debug!(task = task.id(), ratios = ?task.shape_ratios(), "shape ratio is not a whole multiple");
            return false;
        }
        if !task
            .train
            .iter()
            .all(|pair| count_colors(&pair.input) == count_colors(&pair.output))
        {
            debug!(task = task.id(), "color count differs between input and output");
            return false;
        }
        if ZoomSolver::new().solves(task) {
            debug!(task = task.id(), "solved by pure scaling");
            return false;
        }
        true
    }

    /// Search for the first candidate reproducing every training pair.
    ///
    /// A cached task returns its cached candidate without searching; a seeded
    /// one does too once it checks out against the training pairs. Only a
    /// `Solved` outcome touches the cache.
    pub fn search(&mut self, task: &Task) -> SearchOutcome {
        if let Some(candidate) = self.cache.get(task.id()) {
            return SearchOutcome::Solved(*candidate);
        }
        if let Some(candidate) = self.seeded.remove(task.id()) {
            if self.is_valid(&candidate, task) {
                self.cache.insert(task.id(), candidate);
                debug!(task = task.id(), %candidate, "seeded candidate verified");
                return SearchOutcome::Solved(candidate);
            }
            info!(task = task.id(), %candidate, "discarding stale seeded candidate");
        }

        let catalog = self.catalog;
        let started = Instant::now();
        let mut evaluated: u64 = 0;

        for candidate in catalog.candidates() {
            if self.budget_spent(evaluated, started) {
                info!(task = task.id(), evaluated, "search budget exceeded");
                return SearchOutcome::BudgetExceeded { evaluated };
            }
            evaluated += 1;
            self.stats.candidates += 1;

            if self.is_valid(&candidate, task) {
                self.cache.insert(task.id(), candidate);
                self.stats.solved += 1;
                info!(
                    task = task.id(),
                    %candidate,
                    evaluated,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "cached tessellation candidate"
                );
                return SearchOutcome::Solved(candidate);
            }
        }

        debug!(task = task.id(), evaluated, "no candidate matched");
        SearchOutcome::Exhausted { evaluated }
    }

    /// `search`, reduced to whether a candidate is now cached.
    pub fn solve(&mut self, task: &Task) -> bool {
        self.search(task).is_solved()
    }

    /// Run the cached candidate for `task` on `grid`.
    ///
    /// When `grid` is one of the task's training inputs (the same object),
    /// its training output seeds the canvas; otherwise the canvas is sized
    /// from the task's first shape ratio.
    pub fn apply(&self, task: &Task, grid: &Grid) -> Result<Grid, ApplyError> {
        let candidate = self
            .cache
            .get(task.id())
            .ok_or_else(|| ApplyError::NotSolved(task.id().to_owned()))?;
        Ok(run_trial(candidate, grid, Self::canvas_for(task, grid)?)?)
    }

    fn canvas_for<'a>(task: &'a Task, grid: &Grid) -> Result<Canvas<'a>, TrialFailure> {
        if let Some(reference) = task.reference_output(grid) {
            return Ok(Canvas::Reference(reference));
        }
        let (rows, cols) = task.output_ratio().ok_or(TrialFailure::MissingShapeRatio)?;
        Ok(Canvas::Scaled { rows, cols })
    }

    /// A candidate is valid when every training pair reproduces exactly.
    /// Trial failures count as mismatches.
    fn is_valid(&mut self, candidate: &Candidate, task: &Task) -> bool {
        for pair in &task.train {
            self.stats.trials += 1;
            match run_trial(candidate, &pair.input, Canvas::Reference(&pair.output)) {
                Ok(output) if output == pair.output => {}
                Ok(_) => return false,
                Err(failure) => {
                    self.stats.failures += 1;
                    trace!(task = task.id(), %candidate, %failure, "trial failed");
                    return false;
                }
            }
        }
        true
    }

    fn budget_spent(&self, evaluated: u64, started: Instant) -> bool {
        if let Some(max) = self.budget.max_candidates {
            if evaluated >= max {
                return true;
            }
        }
        if let Some(limit) = self.budget.time_limit {
            if started.elapsed() >= limit {
                return true;
            }
        }
        false
    }
}

impl Strategy for TessellationSolver {
    fn name(&self) -> &'static str {
        "tessellation"
    }

    fn detect(&self, task: &Task) -> bool {
        TessellationSolver::detect(self, task)
    }

    fn solve(&mut self, task: &Task) -> bool {
        TessellationSolver::solve(self, task)
    }

    fn apply(&self, task: &Task, grid: &Grid) -> Result<Grid, ApplyError> {
        TessellationSolver::apply(self, task, grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{TestCase, TrainingPair};
    use std::time::Duration;

    fn grid(rows: &[&[u8]]) -> Grid {
        Grid::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    /// Output is four copies of the input.
    fn tiling_task() -> Task {
        Task::new(
            "tiling",
            vec![TrainingPair {
                input: grid(&[&[1, 0], &[0, 2]]),
                output: grid(&[&[1, 0, 1, 0], &[0, 2, 0, 2], &[1, 0, 1, 0], &[0, 2, 0, 2]]),
            }],
            vec![TestCase {
                input: grid(&[&[3, 3], &[0, 4]]),
                output: None,
            }],
        )
    }

    #[test]
    fn test_detect_tiling() {
        assert!(TessellationSolver::new().detect(&tiling_task()));
    }

    #[test]
    fn test_detect_rejects_unchanged_shape() {
        let task = Task::new(
            "same",
            vec![TrainingPair {
                input: grid(&[&[1, 2]]),
                output: grid(&[&[2, 1]]),
            }],
            vec![],
        );
        assert!(!TessellationSolver::new().detect(&task));
    }

    #[test]
    fn test_detect_rejects_color_change() {
        let task = Task::new(
            "colors",
            vec![TrainingPair {
                input: grid(&[&[1, 0]]),
                output: grid(&[&[1, 0, 5, 0]]),
            }],
            vec![],
        );
        assert!(!TessellationSolver::new().detect(&task));
    }

    #[test]
    fn test_detect_rejects_zoom() {
        let task = Task::new(
            "zoom",
            vec![TrainingPair {
                input: grid(&[&[1, 2]]),
                output: grid(&[&[1, 1, 2, 2]]),
            }],
            vec![],
        );
        assert!(!TessellationSolver::new().detect(&task));
    }

    #[test]
    fn test_solve_caches_first_match() {
        let task = tiling_task();
        let mut solver = TessellationSolver::new();
        assert!(solver.solve(&task));
        assert_eq!(
            solver.cached(&task),
            Some(&Candidate::new(Preprocess::Identity, Transform::Identity, Query::True))
        );
        assert_eq!(solver.stats().candidates, 1);

        // Second call is a cache hit.
        assert!(solver.solve(&task));
        assert_eq!(solver.stats().candidates, 1);
    }

    #[test]
    fn test_apply_test_input() {
        let task = tiling_task();
        let mut solver = TessellationSolver::new();
        assert!(solver.solve(&task));
        let out = solver.apply(&task, &task.test[0].input).unwrap();
        assert_eq!(
            out,
            grid(&[&[3, 3, 3, 3], &[0, 4, 0, 4], &[3, 3, 3, 3], &[0, 4, 0, 4]])
        );
        assert_eq!(solver.predict(&task), vec![Ok(out)]);
    }

    #[test]
    fn test_apply_requires_solution() {
        let task = tiling_task();
        let solver = TessellationSolver::new();
        assert_eq!(
            solver.apply(&task, &task.test[0].input),
            Err(ApplyError::NotSolved("tiling".into()))
        );
    }

    #[test]
    fn test_budget_stops_without_caching() {
        // Needs a crop, so the first candidate cannot match.
        let task = Task::new(
            "cropped",
            vec![TrainingPair {
                input: grid(&[&[0, 0, 0], &[0, 7, 0], &[0, 0, 0]]),
                output: grid(&[&[7, 7]]),
            }],
            vec![],
        );
        let mut solver =
            TessellationSolver::new().with_budget(SearchBudget::unlimited().with_max_candidates(5));
        assert_eq!(solver.search(&task), SearchOutcome::BudgetExceeded { evaluated: 5 });
        assert!(solver.cached(&task).is_none());
    }

    #[test]
    fn test_exhausted_when_nothing_matches() {
        let task = Task::new(
            "impossible",
            vec![TrainingPair {
                input: grid(&[&[1, 2]]),
                output: grid(&[&[9, 9, 9, 9]]),
            }],
            vec![],
        );
        let mut solver = TessellationSolver::with_catalog(CatalogVariant::Legacy);
        let outcome = solver.search(&task);
        assert_eq!(
            outcome,
            SearchOutcome::Exhausted {
                evaluated: Catalog::legacy().candidate_count() as u64
            }
        );
        assert!(!solver.solve(&task));
        assert!(solver.cache().is_empty());
    }

    #[test]
    fn test_seeded_cache_skips_search() {
        let task = tiling_task();
        let mut seeded = SolutionCache::new();
        let chosen = Candidate::new(Preprocess::CropInner(0), Transform::Identity, Query::True);
        seeded.insert(task.id(), chosen);
        let mut solver = TessellationSolver::new().with_cache(seeded);
        assert_eq!(solver.search(&task), SearchOutcome::Solved(chosen));
        assert_eq!(solver.stats().candidates, 0);
    }

    #[test]
    fn test_stale_seeded_entry_is_searched_again() {
        // An earlier session cached the plain tiling under the same id.
        let mut earlier = TessellationSolver::new();
        let first = Task::new(
            "t",
            vec![TrainingPair {
                input: grid(&[&[1, 2]]),
                output: grid(&[&[1, 2, 1, 2]]),
            }],
            vec![],
        );
        assert!(earlier.solve(&first));
        let saved: SolutionCache =
            serde_json::from_str(&serde_json::to_string(earlier.cache()).unwrap()).unwrap();

        let second = Task::new(
            "t",
            vec![TrainingPair {
                input: grid(&[&[1, 2]]),
                output: grid(&[&[2, 1, 2, 1]]),
            }],
            vec![],
        );
        let mut solver = TessellationSolver::new().with_cache(saved);
        assert!(solver.solve(&second));
        let cached = *solver.cached(&second).unwrap();
        assert_ne!(
            cached,
            Candidate::new(Preprocess::Identity, Transform::Identity, Query::True)
        );
        assert!(solver.stats().candidates > 0);
        assert_eq!(
            solver.apply(&second, &second.train[0].input.clone()).unwrap(),
            second.train[0].output
        );
        assert_eq!(solver.snapshot().get("t"), Some(&cached));
    }

    #[test]
    fn test_unused_seeded_entries_are_kept_for_saving() {
        let mut seeded = SolutionCache::new();
        let chosen = Candidate::new(Preprocess::Identity, Transform::Identity, Query::NotZero);
        seeded.insert("elsewhere", chosen);
        let mut solver = TessellationSolver::new().with_cache(seeded);
        assert!(solver.solve(&tiling_task()));
        let saved = solver.into_cache();
        assert_eq!(saved.get("elsewhere"), Some(&chosen));
        assert!(saved.contains("tiling"));
    }

    #[test]
    fn test_time_limit_stops_search() {
        let task = tiling_task();
        let mut solver = TessellationSolver::new()
            .with_budget(SearchBudget::unlimited().with_time_limit(Duration::ZERO));
        assert_eq!(solver.search(&task), SearchOutcome::BudgetExceeded { evaluated: 0 });
        assert!(solver.cache().is_empty());
        assert!(!solver.solve(&task));
    }
}
