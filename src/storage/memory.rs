//! In-memory item storage for testing.
//!
//! This module provides a thread-safe in-memory implementation of the
//! ReviewStore trait, primarily for use in unit tests.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::core::ReviewItem;
use crate::error::Result;
use crate::storage::ReviewStore;

/// In-memory item store for testing.
///
/// Thread-safe implementation using `RwLock<HashMap>`. Items are stored in
/// memory and lost when the store is dropped.
#[derive(Debug, Default)]
pub struct MemoryReviewStore {
    /// Item storage keyed by id.
    items: RwLock<HashMap<String, ReviewItem>>,
}

impl MemoryReviewStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
        }
    }

    /// Get the number of items in the store.
    pub fn len(&self) -> usize {
        self.items.read().unwrap().len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.items.read().unwrap().is_empty()
    }

    /// Clear all items from the store.
    pub fn clear(&self) {
        self.items.write().unwrap().clear();
    }
}

impl ReviewStore for MemoryReviewStore {
    fn fetch_all(&self) -> Result<Vec<ReviewItem>> {
        let items = self.items.read().unwrap();
        let mut result: Vec<ReviewItem> = items.values().cloned().collect();

        // Oldest first, then id, so the ordering is deterministic.
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(result)
    }

    fn fetch_one(&self, id: &str) -> Result<Option<ReviewItem>> {
        let items = self.items.read().unwrap();
        Ok(items.get(id).cloned())
    }

    fn upsert(&self, item: &ReviewItem) -> Result<()> {
        let mut items = self.items.write().unwrap();
        items.insert(item.id.clone(), item.clone());
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<()> {
        let mut items = self.items.write().unwrap();
        items.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DifficultyTier;
    use crate::storage::traits::tests::test_review_store_crud;
    use chrono::{Duration, Utc};

    #[test]
    fn test_memory_store_crud() {
        let store = MemoryReviewStore::new();
        test_review_store_crud(&store);
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = MemoryReviewStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_len_and_clear() {
        let store = MemoryReviewStore::new();

        store
            .upsert(&ReviewItem::new("uno", "one", DifficultyTier::Easy, Utc::now()))
            .unwrap();
        store
            .upsert(&ReviewItem::new("dos", "two", DifficultyTier::Easy, Utc::now()))
            .unwrap();

        assert_eq!(store.len(), 2);

        store.clear();

        assert!(store.is_empty());
    }

    #[test]
    fn test_fetch_all_ordering() {
        let store = MemoryReviewStore::new();
        let now = Utc::now();

        let mut older = ReviewItem::new("older", "x", DifficultyTier::Medium, now);
        older.created_at = now - Duration::days(2);
        let newer = ReviewItem::new("newer", "y", DifficultyTier::Medium, now);

        store.upsert(&newer).unwrap();
        store.upsert(&older).unwrap();

        let all = store.fetch_all().unwrap();
        assert_eq!(all[0].id, "older");
        assert_eq!(all[1].id, "newer");
    }

    #[test]
    fn test_upsert_replaces_existing() {
        let store = MemoryReviewStore::new();

        let mut item = ReviewItem::new("uno", "one", DifficultyTier::Easy, Utc::now());
        store.upsert(&item).unwrap();

        item.meaning = "one (numeral)".to_string();
        store.upsert(&item).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.fetch_one("uno").unwrap().unwrap().meaning,
            "one (numeral)"
        );
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(MemoryReviewStore::new());
        let mut handles = vec![];

        for i in 0..10 {
            let store_clone = Arc::clone(&store);
            let handle = thread::spawn(move || {
                let item = ReviewItem::new(
                    format!("word{}", i),
                    "meaning",
                    DifficultyTier::Medium,
                    Utc::now(),
                );
                store_clone.upsert(&item).unwrap();
                store_clone.fetch_one(&item.id).unwrap();
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 10);
    }
}
