//! Recommend command for Cadence.
//!
//! Builds a bounded review session: due items ranked by priority score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::queue::{recommend, ScoredItem};
use crate::storage::ReviewStore;

/// Options for the recommend command.
#[derive(Debug, Clone, Default)]
pub struct RecommendOptions {
    /// Session size override; falls back to the configured maximum.
    pub count: Option<usize>,
}

/// A recommended item with its score, for output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationInfo {
    /// Item id.
    pub id: String,
    /// The term.
    pub term: String,
    /// Current mastery level.
    pub mastery_level: f64,
    /// Priority score.
    pub score: f64,
    /// Whether this item is under forced review.
    pub forced: bool,
}

impl RecommendationInfo {
    /// Create from a scored item.
    fn from_scored(scored: &ScoredItem) -> Self {
        Self {
            id: scored.item.id.clone(),
            term: scored.item.term.clone(),
            mastery_level: scored.item.state.mastery_level,
            score: scored.score,
            forced: scored.item.state.force_review_at.is_some(),
        }
    }
}

/// Output format for the recommend command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendOutput {
    /// Whether the recommendation succeeded.
    pub success: bool,
    /// Number of recommended items.
    pub count: usize,
    /// The session, highest priority first.
    pub recommendations: Vec<RecommendationInfo>,
    /// Error message if recommendation failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RecommendOutput {
    /// Create a failed output.
    fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            count: 0,
            recommendations: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// The recommend command implementation.
pub struct RecommendCommand<S> {
    store: S,
    config: Config,
}

impl<S: ReviewStore> RecommendCommand<S> {
    /// Create a new recommend command.
    pub fn new(store: S, config: Config) -> Self {
        Self { store, config }
    }

    /// Run the recommend command.
    pub fn run(&self, options: &RecommendOptions, now: DateTime<Utc>) -> RecommendOutput {
        let all = match self.store.fetch_all() {
            Ok(items) => items,
            Err(e) => return RecommendOutput::failure(e.to_string()),
        };

        let max_count = options
            .count
            .unwrap_or(self.config.review.max_recommendations as usize);

        let session = recommend(&all, now, max_count);

        RecommendOutput {
            success: true,
            count: session.len(),
            recommendations: session.iter().map(RecommendationInfo::from_scored).collect(),
            error: None,
        }
    }
}
