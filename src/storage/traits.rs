//! Item storage traits for Cadence.
//!
//! This module defines the `ReviewStore` trait for item persistence.

use std::sync::Arc;

use crate::core::ReviewItem;
use crate::error::Result;

/// Trait for item storage backends.
///
/// Implementations own the authoritative copy of each item. A scheduling
/// decision is computed from the most recently fetched state and the
/// returned state applied via `upsert`, which is atomic per item id.
pub trait ReviewStore: Send + Sync {
    /// Retrieve every item in the learning set.
    fn fetch_all(&self) -> Result<Vec<ReviewItem>>;

    /// Retrieve an item by id.
    ///
    /// Returns `Ok(None)` if the item doesn't exist.
    fn fetch_one(&self, id: &str) -> Result<Option<ReviewItem>>;

    /// Save an item, creating or replacing it under its id.
    fn upsert(&self, item: &ReviewItem) -> Result<()>;

    /// Delete an item.
    ///
    /// Returns `Ok(())` even if the item doesn't exist.
    fn delete(&self, id: &str) -> Result<()>;

    /// Check if an item exists.
    fn exists(&self, id: &str) -> Result<bool> {
        Ok(self.fetch_one(id)?.is_some())
    }
}

/// Blanket implementation of ReviewStore for Arc-wrapped stores.
///
/// This allows using `Arc<T>` where `T: ReviewStore` is expected, which is
/// useful for sharing stores between tests and commands.
impl<T: ReviewStore + ?Sized> ReviewStore for Arc<T> {
    fn fetch_all(&self) -> Result<Vec<ReviewItem>> {
        (**self).fetch_all()
    }

    fn fetch_one(&self, id: &str) -> Result<Option<ReviewItem>> {
        (**self).fetch_one(id)
    }

    fn upsert(&self, item: &ReviewItem) -> Result<()> {
        (**self).upsert(item)
    }

    fn delete(&self, id: &str) -> Result<()> {
        (**self).delete(id)
    }
}
