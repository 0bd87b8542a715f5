use super::enumerate::Candidate;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Limits on a single search. The default is unlimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBudget {
    /// Stop after evaluating this many candidates
    pub max_candidates: Option<u64>,
    /// Stop once this much wall-clock time has passed
    pub time_limit: Option<Duration>,
}

impl SearchBudget {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_candidates(mut self, max: u64) -> Self {
        self.max_candidates = Some(max);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A candidate reproduced every training pair and is now cached
    Solved(Candidate),
    /// Every candidate was tried and none matched
    Exhausted { evaluated: u64 },
    /// The budget ran out first; nothing was cached
    BudgetExceeded { evaluated: u64 },
}

impl SearchOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, SearchOutcome::Solved(_))
    }
}

impl std::fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchOutcome::Solved(candidate) => write!(f, "solved by {}", candidate),
            SearchOutcome::Exhausted { evaluated } => {
                write!(f, "unsolved after {} candidates", evaluated)
            }
            SearchOutcome::BudgetExceeded { evaluated } => {
                write!(f, "budget exceeded after {} candidates", evaluated)
            }
        }
    }
}

/// Counters accumulated over the searches of one solver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Candidates evaluated
    pub candidates: u64,
    /// Trials run (one per candidate per training pair reached)
    pub trials: u64,
    /// Trials that ended in a `TrialFailure`
    pub failures: u64,
    /// Tasks solved by search (cache hits excluded)
    pub solved: u64,
}
