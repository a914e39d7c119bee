//! Progress prediction.
//!
//! Derives a snapshot of the learning set from the item collection and the
//! current streak: how much has been touched, how much is mastered, and a
//! rough estimate of the days remaining at the observed learning rate. The
//! rate is capped at 20 items/day so a short streak over a large collection
//! cannot produce an absurdly optimistic estimate.

use serde::{Deserialize, Serialize};

use crate::core::ReviewItem;

/// Mastery level at or above which an item counts as mastered.
pub const MASTERY_THRESHOLD: f64 = 4.0;

/// Cap on the inferred daily learning rate, in items per day.
pub const MAX_DAILY_LEARNING_RATE: f64 = 20.0;

/// Predicted learning progress over an item collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Total items in the collection.
    pub total_words: usize,
    /// Items reviewed at least once.
    pub learned_words: usize,
    /// Items at or above the mastery threshold.
    pub mastered_words: usize,
    /// Rounded percentage of mastered items (0 for an empty collection).
    pub progress_percentage: u32,
    /// Mean review count over learned items, to one decimal (0 if none).
    pub avg_review_count: f64,
    /// Inferred items learned per streak day, to one decimal, capped at 20.
    pub daily_learning_rate: f64,
    /// Estimated days until everything is mastered; `None` when the rate is
    /// zero (nothing learned yet), meaning the estimate is unbounded rather
    /// than a division by zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_days_to_master: Option<f64>,
}

/// Round to one decimal place for reporting.
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Predict progress from the item collection and the current streak.
pub fn predict(items: &[ReviewItem], streak: u32) -> Prediction {
    let total_words = items.len();
    let learned_words = items.iter().filter(|i| i.state.review_count > 0).count();
    let mastered_words = items.iter().filter(|i| i.state.is_mastered()).count();

    let avg_review_count = if learned_words > 0 {
        let sum: u32 = items
            .iter()
            .filter(|i| i.state.review_count > 0)
            .map(|i| i.state.review_count)
            .sum();
        round_to_tenth(sum as f64 / learned_words as f64)
    } else {
        0.0
    };

    // The estimate uses the unrounded rate; only the report rounds.
    let rate = (learned_words as f64 / streak.max(1) as f64).min(MAX_DAILY_LEARNING_RATE);

    let remaining = (total_words - mastered_words) as f64;
    let estimated_days_to_master = if rate > 0.0 {
        Some(remaining / rate)
    } else {
        None
    };

    let progress_percentage = if total_words > 0 {
        (mastered_words as f64 / total_words as f64 * 100.0).round() as u32
    } else {
        0
    };

    Prediction {
        total_words,
        learned_words,
        mastered_words,
        progress_percentage,
        avg_review_count,
        daily_learning_rate: round_to_tenth(rate),
        estimated_days_to_master,
    }
}
