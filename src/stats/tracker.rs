//! Session-scoped outcome counters.
//!
//! Tracks totals, consecutive runs, and the learning streak (consecutive
//! calendar days with at least one recorded outcome). Streak logic:
//!
//! 1. Same calendar day as the last outcome → unchanged.
//! 2. Exactly one day later → streak + 1.
//! 3. Any larger gap, or no prior record → reset to 1.
//!
//! The tracker is constructed per learner session and never shared across
//! sessions. The core does not persist it; a collaborator may snapshot it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Session-lifetime outcome counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsTracker {
    /// Total graded outcomes recorded.
    pub total_reviews: u32,
    /// Outcomes recorded as correct.
    pub correct_reviews: u32,
    /// Current run of correct outcomes.
    pub consecutive_correct: u32,
    /// Current run of incorrect outcomes.
    pub consecutive_incorrect: u32,
    /// Calendar date of the last recorded outcome.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_review_date: Option<NaiveDate>,
    /// Consecutive calendar days with at least one outcome.
    pub learning_streak: u32,
}

/// Derived efficiency view over a tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Efficiency {
    /// Rounded accuracy percentage (0 when nothing is recorded).
    pub accuracy_percent: u32,
    /// Total graded outcomes.
    pub total_reviews: u32,
    /// Correct outcomes.
    pub correct_reviews: u32,
    /// Current correct run.
    pub consecutive_correct: u32,
    /// Current incorrect run.
    pub consecutive_incorrect: u32,
    /// Current learning streak in days.
    pub learning_streak: u32,
    /// Date of the last recorded outcome.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_review_date: Option<NaiveDate>,
}

impl StatsTracker {
    /// Create a fresh tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one graded outcome on the given calendar day.
    ///
    /// The streak is updated against the previous `last_review_date` before
    /// the date is overwritten.
    pub fn record_outcome(&mut self, was_correct: bool, today: NaiveDate) {
        self.total_reviews += 1;

        if was_correct {
            self.correct_reviews += 1;
            self.consecutive_correct += 1;
            self.consecutive_incorrect = 0;
        } else {
            self.consecutive_incorrect += 1;
            self.consecutive_correct = 0;
        }

        self.update_streak(today);
        self.last_review_date = Some(today);
    }

    /// Update the learning streak by calendar-date comparison.
    fn update_streak(&mut self, today: NaiveDate) {
        match self.last_review_date {
            Some(last) if last == today => {
                // Already counted today.
            }
            Some(last) if last.succ_opt() == Some(today) => {
                self.learning_streak += 1;
            }
            _ => {
                self.learning_streak = 1;
            }
        }
    }

    /// Pure derived view over the current counters.
    pub fn efficiency(&self) -> Efficiency {
        let accuracy_percent = if self.total_reviews > 0 {
            (self.correct_reviews as f64 / self.total_reviews as f64 * 100.0).round() as u32
        } else {
            0
        };

        Efficiency {
            accuracy_percent,
            total_reviews: self.total_reviews,
            correct_reviews: self.correct_reviews,
            consecutive_correct: self.consecutive_correct,
            consecutive_incorrect: self.consecutive_incorrect,
            learning_streak: self.learning_streak,
            last_review_date: self.last_review_date,
        }
    }
}
