//! Due command for Cadence.
//!
//! Lists the items due for review right now, forced reviews first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::ReviewItem;
use crate::queue::due_items;
use crate::storage::ReviewStore;

/// Options for the due command.
#[derive(Debug, Clone, Default)]
pub struct DueOptions {
    /// Maximum number of results.
    pub limit: Option<usize>,
}

/// Simplified item info for output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DueItemInfo {
    /// Item id.
    pub id: String,
    /// The term.
    pub term: String,
    /// Its meaning.
    pub meaning: String,
    /// Content difficulty.
    pub difficulty: String,
    /// Current mastery level.
    pub mastery_level: f64,
    /// Successful passes so far.
    pub review_count: u32,
    /// Whether this item is under forced review.
    pub forced: bool,
}

impl DueItemInfo {
    /// Create from a ReviewItem.
    fn from_item(item: &ReviewItem) -> Self {
        Self {
            id: item.id.clone(),
            term: item.term.clone(),
            meaning: item.meaning.clone(),
            difficulty: item.state.difficulty.to_string(),
            mastery_level: item.state.mastery_level,
            review_count: item.state.review_count,
            forced: item.state.force_review_at.is_some(),
        }
    }
}

/// Output format for the due command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DueOutput {
    /// Whether the listing succeeded.
    pub success: bool,
    /// Number of due items (before the limit).
    pub count: usize,
    /// The due items, forced-first.
    pub items: Vec<DueItemInfo>,
    /// Error message if listing failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DueOutput {
    /// Create a failed output.
    fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            count: 0,
            items: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// The due command implementation.
pub struct DueCommand<S> {
    store: S,
}

impl<S: ReviewStore> DueCommand<S> {
    /// Create a new due command.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Run the due command.
    pub fn run(&self, options: &DueOptions, now: DateTime<Utc>) -> DueOutput {
        let all = match self.store.fetch_all() {
            Ok(items) => items,
            Err(e) => return DueOutput::failure(e.to_string()),
        };

        let mut due = due_items(&all, now);
        let count = due.len();

        if let Some(limit) = options.limit {
            due.truncate(limit);
        }

        DueOutput {
            success: true,
            count,
            items: due.iter().map(DueItemInfo::from_item).collect(),
            error: None,
        }
    }
}
