//! SM-2-style grading engine.
//!
//! [`grade`] applies a response quality to a scheduling record:
//!
//! 1. Adjust the ease factor per quality (always re-clamped to the floor).
//! 2. Adjust the review count (reset on failure, hold on `hard`, increment
//!    otherwise) and the mastery level (clamped to its bounds).
//! 3. Compute the next interval from the post-update count and ease, and
//!    stamp the due and last-review times.
//!
//! The ease deltas for `good` and `easy` shrink as the review count grows,
//! so well-rehearsed items plateau instead of inflating without bound.

use chrono::{DateTime, Duration, Utc};

use crate::core::{Quality, ReviewState, MAX_MASTERY_LEVEL, MIN_EASE_FACTOR};
use crate::scheduler::interval::compute_interval;

/// Apply a graded response to a scheduling record.
///
/// Returns a new, fully-specified record; the input is untouched. The
/// Leitner fields pass through unchanged; escalation is the separate
/// [`apply_override`](crate::scheduler::apply_override) policy.
///
/// Deterministic and side-effect-free: the same state, quality, and `now`
/// always produce the same result.
pub fn grade(state: &ReviewState, quality: Quality, now: DateTime<Utc>) -> ReviewState {
    // The ease deltas read the pre-update review count.
    let count = state.review_count;

    let (ease_factor, review_count, mastery_level) = match quality {
        Quality::Again => (
            state.ease_factor * 0.8 - 0.15,
            0,
            (state.mastery_level - 1.0).max(0.0),
        ),
        Quality::Hard => (
            state.ease_factor * 0.85 - 0.05,
            state.review_count.max(1),
            (state.mastery_level - 0.5).max(0.0),
        ),
        Quality::Good => (
            state.ease_factor + 0.1 - (0.08 + 0.02 * count as f64),
            state.review_count + 1,
            (state.mastery_level + 0.5).min(MAX_MASTERY_LEVEL),
        ),
        Quality::Easy => (
            state.ease_factor + 0.15 - (0.15 + 0.01 * count as f64),
            state.review_count + 1,
            (state.mastery_level + 1.0).min(MAX_MASTERY_LEVEL),
        ),
    };

    let ease_factor = ease_factor.max(MIN_EASE_FACTOR);

    // Interval from the post-update count and ease.
    let interval = compute_interval(review_count, ease_factor, state.difficulty);

    ReviewState {
        ease_factor,
        review_count,
        mastery_level,
        next_review_at: now + Duration::days(interval as i64),
        last_review_at: Some(now),
        ..state.clone()
    }
}
