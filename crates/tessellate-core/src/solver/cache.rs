//! Solution cache: first winning candidate per task, never replaced.

use super::enumerate::Candidate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Map from task id to the first candidate found valid for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SolutionCache {
    entries: BTreeMap<String, Candidate>,
}

impl SolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, task_id: &str) -> Option<&Candidate> {
        self.entries.get(task_id)
    }

    pub fn contains(&self, task_id: &str) -> bool {
        self.entries.contains_key(task_id)
    }

    /// Record `candidate` for `task_id` unless one is already stored.
    /// Returns whether it was stored.
    pub fn insert(&mut self, task_id: &str, candidate: Candidate) -> bool {
        if self.entries.contains_key(task_id) {
            return false;
        }
        self.entries.insert(task_id.to_owned(), candidate);
        true
    }

    pub fn remove(&mut self, task_id: &str) -> Option<Candidate> {
        self.entries.remove(task_id)
    }

    /// Fold in entries from another cache without replacing existing ones.
    pub fn merge(&mut self, other: SolutionCache) {
        for (task_id, candidate) in other.entries {
            self.entries.entry(task_id).or_insert(candidate);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Candidate)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
