//! Session stats snapshot persistence.
//!
//! The scheduling core never persists its `StatsTracker`; keeping the
//! counters across CLI invocations is this collaborator's concern. The
//! snapshot is a single JSON file written atomically (temp file + rename).

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{CadenceError, Result};
use crate::stats::StatsTracker;

/// Load the tracker snapshot, or a fresh tracker when none exists.
pub fn load_tracker(path: &Path) -> Result<StatsTracker> {
    if !path.exists() {
        return Ok(StatsTracker::new());
    }

    let content = fs::read_to_string(path).map_err(|e| CadenceError::storage(path, e))?;
    let tracker: StatsTracker = serde_json::from_str(&content)?;

    Ok(tracker)
}

/// Save the tracker snapshot atomically.
pub fn save_tracker(path: &Path, tracker: &StatsTracker) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| CadenceError::storage(parent, e))?;
        }
    }

    let json = serde_json::to_string_pretty(tracker)?;

    let temp_path = path.with_extension("json.tmp");
    {
        let mut file =
            fs::File::create(&temp_path).map_err(|e| CadenceError::storage(&temp_path, e))?;
        file.write_all(json.as_bytes())
            .map_err(|e| CadenceError::storage(&temp_path, e))?;
        file.sync_all()
            .map_err(|e| CadenceError::storage(&temp_path, e))?;
    }

    fs::rename(&temp_path, path).map_err(|e| CadenceError::storage(path, e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_returns_fresh_tracker() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("stats.json");

        let tracker = load_tracker(&path).unwrap();
        assert_eq!(tracker, StatsTracker::new());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("stats.json");

        let mut tracker = StatsTracker::new();
        tracker.record_outcome(true, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        tracker.record_outcome(false, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());

        save_tracker(&path, &tracker).unwrap();
        let loaded = load_tracker(&path).unwrap();

        assert_eq!(loaded, tracker);
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("stats.json");

        save_tracker(&path, &StatsTracker::new()).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_load_corrupt_snapshot_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("stats.json");
        fs::write(&path, "{broken").unwrap();

        assert!(load_tracker(&path).is_err());
    }
}
