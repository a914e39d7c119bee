//! Add command for Cadence.
//!
//! Adds an item to the learning set with a fresh scheduling record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{DifficultyTier, ReviewItem};
use crate::storage::ReviewStore;

/// Options for the add command.
#[derive(Debug, Clone, Default)]
pub struct AddOptions {
    /// The term to learn.
    pub term: String,
    /// Its meaning or translation.
    pub meaning: String,
    /// Content difficulty (defaults to medium).
    pub difficulty: Option<String>,
    /// Optional grouping category.
    pub category: Option<String>,
}

/// Output format for the add command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddOutput {
    /// Whether the add succeeded.
    pub success: bool,
    /// The assigned item id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The term.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    /// The assigned difficulty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    /// When the item first comes up for review.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review: Option<String>,
    /// Error message if the add failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AddOutput {
    /// Create a successful output.
    fn success(item: &ReviewItem) -> Self {
        Self {
            success: true,
            id: Some(item.id.clone()),
            term: Some(item.term.clone()),
            difficulty: Some(item.state.difficulty.to_string()),
            next_review: Some(item.state.next_review_at.format("%Y-%m-%d").to_string()),
            error: None,
        }
    }

    /// Create a failed output.
    fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            id: None,
            term: None,
            difficulty: None,
            next_review: None,
            error: Some(error.into()),
        }
    }
}

/// The add command implementation.
pub struct AddCommand<S> {
    store: S,
}

impl<S: ReviewStore> AddCommand<S> {
    /// Create a new add command.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Run the add command.
    pub fn run(&self, options: &AddOptions, now: DateTime<Utc>) -> AddOutput {
        if options.term.trim().is_empty() {
            return AddOutput::failure("term must not be empty");
        }

        let difficulty = match options.difficulty.as_deref() {
            Some(text) => match text.parse::<DifficultyTier>() {
                Ok(tier) => tier,
                Err(e) => return AddOutput::failure(e.to_string()),
            },
            None => DifficultyTier::default(),
        };

        let mut item = ReviewItem::new(&options.term, &options.meaning, difficulty, now);
        if item.id.is_empty() {
            return AddOutput::failure(format!(
                "term '{}' contains no usable characters for an id",
                options.term
            ));
        }
        if let Some(category) = &options.category {
            item = item.with_category(category);
        }

        match self.store.upsert(&item) {
            Ok(()) => AddOutput::success(&item),
            Err(e) => AddOutput::failure(e.to_string()),
        }
    }
}
