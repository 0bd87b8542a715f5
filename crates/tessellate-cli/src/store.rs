//! Reading task files and persisting the solution cache.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tessellate_core::{SolutionCache, Task, TaskFile};
use tracing::{debug, warn};

/// Load a task JSON file. The task id is the file stem.
pub fn load_task(path: &Path) -> Result<Task> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read task file {}", path.display()))?;
    let file: TaskFile = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse task file {}", path.display()))?;
    let id = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Task::from_file(id, file))
}

/// Load the solution cache. A missing file is an empty cache; an unreadable
/// one is logged and ignored.
pub fn load_cache(path: &Path) -> SolutionCache {
    match fs::read_to_string(path) {
        Ok(json) => match serde_json::from_str(&json) {
            Ok(cache) => cache,
            Err(err) => {
                warn!(path = %path.display(), %err, "ignoring corrupt solution cache");
                SolutionCache::new()
            }
        },
        Err(_) => {
            debug!(path = %path.display(), "no solution cache yet");
            SolutionCache::new()
        }
    }
}

pub fn save_cache(path: &Path, cache: &SolutionCache) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(cache)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), entries = cache.len(), "saved solution cache");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tessellate_core::{Candidate, Preprocess, Query, Transform};

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("tessellate-store-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_load_task_uses_file_stem() {
        let path = scratch("0a1b2c3d.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            r#"{"train":[{"input":[[1,0]],"output":[[1,0,1,0]]}],"test":[{"input":[[2,2]]}]}"#,
        )
        .unwrap();
        let task = load_task(&path).unwrap();
        assert_eq!(task.id(), "0a1b2c3d");
        assert_eq!(task.train.len(), 1);
        assert_eq!(task.test.len(), 1);
        assert!(task.test[0].output.is_none());
    }

    #[test]
    fn test_load_task_reports_bad_grid() {
        let path = scratch("ragged.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"train":[{"input":[[1,0],[1]],"output":[[1]]}]}"#).unwrap();
        assert!(load_task(&path).is_err());
    }

    #[test]
    fn test_cache_round_trip() {
        let path = scratch("nested/solutions.json");
        let mut cache = SolutionCache::new();
        cache.insert(
            "task",
            Candidate::new(Preprocess::CropInner(0), Transform::Identity, Query::NotZero),
        );
        save_cache(&path, &cache).unwrap();
        assert_eq!(load_cache(&path), cache);
    }

    #[test]
    fn test_missing_cache_is_empty() {
        assert!(load_cache(&scratch("absent.json")).is_empty());
    }
}
