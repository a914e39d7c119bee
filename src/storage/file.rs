//! File-based item storage for Cadence.
//!
//! Items are stored as JSON files in `~/.cadence/items/`, one file per item
//! id. Atomic writes are achieved via temp file + rename, which also makes
//! `upsert` atomic per id.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::config::items_dir;
use crate::core::ReviewItem;
use crate::error::{CadenceError, Result};
use crate::storage::ReviewStore;

/// File-based item storage.
///
/// Stores items as JSON files in a configurable directory. Uses atomic
/// writes via temp file + rename pattern.
#[derive(Debug, Clone)]
pub struct FileReviewStore {
    /// Directory where item files are stored.
    items_dir: PathBuf,
}

impl FileReviewStore {
    /// Create a new file store with the default directory.
    ///
    /// Uses `~/.cadence/items/` or `$CADENCE_HOME/items/`.
    pub fn new() -> Result<Self> {
        let dir = items_dir().ok_or_else(|| {
            CadenceError::config("Could not determine items directory (no home directory)")
        })?;
        Self::with_dir(dir)
    }

    /// Create a new file store with a custom directory.
    pub fn with_dir(items_dir: impl Into<PathBuf>) -> Result<Self> {
        let items_dir = items_dir.into();

        if !items_dir.exists() {
            fs::create_dir_all(&items_dir).map_err(|e| CadenceError::storage(&items_dir, e))?;
        }

        Ok(Self { items_dir })
    }

    /// Get the path for an item file.
    fn item_path(&self, id: &str) -> PathBuf {
        self.items_dir.join(format!("{}.json", id))
    }

    /// Get the path for a temp file used during atomic writes.
    fn temp_path(&self, id: &str) -> PathBuf {
        self.items_dir.join(format!(".{}.json.tmp", id))
    }

    /// Write an item atomically using temp file + rename.
    fn atomic_write(&self, item: &ReviewItem) -> Result<()> {
        let final_path = self.item_path(&item.id);
        let temp_path = self.temp_path(&item.id);

        let json = serde_json::to_string_pretty(item)?;

        {
            let mut file =
                fs::File::create(&temp_path).map_err(|e| CadenceError::storage(&temp_path, e))?;
            file.write_all(json.as_bytes())
                .map_err(|e| CadenceError::storage(&temp_path, e))?;
            file.sync_all()
                .map_err(|e| CadenceError::storage(&temp_path, e))?;
        }

        // Rename temp file to final path (atomic on POSIX)
        fs::rename(&temp_path, &final_path).map_err(|e| CadenceError::storage(&final_path, e))?;

        Ok(())
    }
}

impl ReviewStore for FileReviewStore {
    fn fetch_all(&self) -> Result<Vec<ReviewItem>> {
        if !self.items_dir.exists() {
            return Ok(Vec::new());
        }

        let mut items: Vec<ReviewItem> = Vec::new();

        let entries =
            fs::read_dir(&self.items_dir).map_err(|e| CadenceError::storage(&self.items_dir, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| CadenceError::storage(&self.items_dir, e))?;
            let path = entry.path();

            // Skip non-JSON files and temp files
            if path.extension().map(|e| e != "json").unwrap_or(true) {
                continue;
            }
            if path
                .file_name()
                .map(|n| n.to_string_lossy().starts_with('.'))
                .unwrap_or(true)
            {
                continue;
            }

            match fs::read_to_string(&path) {
                Ok(content) => match serde_json::from_str::<ReviewItem>(&content) {
                    Ok(item) => items.push(item),
                    Err(e) => {
                        tracing::warn!("skipping unreadable item file {}: {}", path.display(), e);
                    }
                },
                Err(e) => {
                    tracing::warn!("skipping unreadable item file {}: {}", path.display(), e);
                }
            }
        }

        // Oldest first, then id, so the ordering is deterministic.
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(items)
    }

    fn fetch_one(&self, id: &str) -> Result<Option<ReviewItem>> {
        let path = self.item_path(id);

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).map_err(|e| CadenceError::storage(&path, e))?;
        let item: ReviewItem = serde_json::from_str(&content)?;

        Ok(Some(item))
    }

    fn upsert(&self, item: &ReviewItem) -> Result<()> {
        self.atomic_write(item)
    }

    fn delete(&self, id: &str) -> Result<()> {
        let path = self.item_path(id);

        if path.exists() {
            fs::remove_file(&path).map_err(|e| CadenceError::storage(&path, e))?;
        }

        Ok(())
    }
}
