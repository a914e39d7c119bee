//! Grade command for Cadence.
//!
//! Applies a graded response to an item: the SM-2 pass always runs, and the
//! Leitner escalation pass is layered on top when requested. The session
//! stats snapshot is updated alongside the grading event.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cli::session::{load_tracker, save_tracker};
use crate::core::{Quality, ReviewItem};
use crate::scheduler::{apply_override, grade};
use crate::storage::ReviewStore;

/// Options for the grade command.
#[derive(Debug, Clone, Default)]
pub struct GradeOptions {
    /// The item id to grade.
    pub id: String,
    /// Response quality: again, hard, good, or easy.
    pub quality: String,
    /// Also run the Leitner escalation pass after grading.
    pub escalate: bool,
}

/// Output format for the grade command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeOutput {
    /// Whether the grade succeeded.
    pub success: bool,
    /// The graded item id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The recorded quality.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    /// Updated ease factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ease_factor: Option<f64>,
    /// Updated mastery level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mastery_level: Option<f64>,
    /// Updated review count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    /// When the item comes up next.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review: Option<String>,
    /// Whether a forced review is pending after escalation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_review: Option<bool>,
    /// Error message if the grade failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GradeOutput {
    /// Create a successful output.
    fn success(item: &ReviewItem, quality: Quality) -> Self {
        Self {
            success: true,
            id: Some(item.id.clone()),
            quality: Some(quality.to_string()),
            ease_factor: Some(item.state.ease_factor),
            mastery_level: Some(item.state.mastery_level),
            review_count: Some(item.state.review_count),
            next_review: Some(item.state.next_review_at.format("%Y-%m-%d").to_string()),
            force_review: Some(item.state.force_review_at.is_some()),
            error: None,
        }
    }

    /// Create a failed output.
    fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            id: None,
            quality: None,
            ease_factor: None,
            mastery_level: None,
            review_count: None,
            next_review: None,
            force_review: None,
            error: Some(error.into()),
        }
    }
}

/// The grade command implementation.
pub struct GradeCommand<S> {
    store: S,
    /// Where the session stats snapshot lives; `None` disables tracking.
    snapshot_path: Option<PathBuf>,
}

impl<S: ReviewStore> GradeCommand<S> {
    /// Create a new grade command.
    pub fn new(store: S, snapshot_path: Option<PathBuf>) -> Self {
        Self {
            store,
            snapshot_path,
        }
    }

    /// Run the grade command.
    pub fn run(&self, options: &GradeOptions, now: DateTime<Utc>) -> GradeOutput {
        let quality = match options.quality.parse::<Quality>() {
            Ok(quality) => quality,
            Err(e) => return GradeOutput::failure(e.to_string()),
        };

        let item = match self.store.fetch_one(&options.id) {
            Ok(Some(item)) => item,
            Ok(None) => return GradeOutput::failure(format!("item not found: {}", options.id)),
            Err(e) => return GradeOutput::failure(e.to_string()),
        };

        // The SM-2 pass always runs; escalation composes on top when asked.
        let mut state = grade(&item.state, quality, now);
        if options.escalate {
            state = apply_override(&state, quality.is_correct(), now);
        }

        let updated = item.with_state(state);
        if let Err(e) = self.store.upsert(&updated) {
            return GradeOutput::failure(e.to_string());
        }

        if let Err(e) = self.record_outcome(quality, now) {
            // The item update already landed; a snapshot failure only costs
            // the session counters.
            tracing::warn!("failed to update stats snapshot: {}", e);
        }

        GradeOutput::success(&updated, quality)
    }

    /// Record the outcome in the session stats snapshot.
    fn record_outcome(&self, quality: Quality, now: DateTime<Utc>) -> crate::error::Result<()> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };

        let mut tracker = load_tracker(path)?;
        tracker.record_outcome(quality.is_correct(), now.date_naive());
        save_tracker(path, &tracker)
    }
}
