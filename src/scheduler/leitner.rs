//! Leitner-box escalation policy.
//!
//! An alternate/supplementary update path for repeatedly failed items:
//!
//! 1. A wrong answer demotes the box and schedules a forced review one day
//!    out, overriding the normal schedule.
//! 2. Three consecutive wrong answers give up on escalation: review count
//!    and mastery reset and the item restarts normal learning.
//! 3. A right answer promotes the box; once above the bottom box the item
//!    "escapes" back to the interval model and the forced time is cleared.
//!
//! This policy is independent of [`grade`](crate::scheduler::grade); call
//! sites choose whether to layer it on top.

use chrono::{DateTime, Duration, Utc};

use crate::core::{ReviewState, MAX_LEITNER_BOX, MIN_LEITNER_BOX};
use crate::scheduler::interval::compute_interval;

/// Consecutive failures before escalation gives up and resets the item.
pub const MAX_HARD_BOX_ATTEMPTS: u32 = 3;

/// Days until a forced review after a failure.
pub const FORCE_REVIEW_INTERVAL_DAYS: u32 = 1;

/// Apply the escalation policy to a scheduling record.
///
/// Returns a new, fully-specified record; the input is untouched.
pub fn apply_override(state: &ReviewState, was_correct: bool, now: DateTime<Utc>) -> ReviewState {
    let mut next = state.clone();

    if !was_correct {
        next.leitner_box = state.leitner_box.saturating_sub(1).max(MIN_LEITNER_BOX);
        next.hard_box_attempts = state.hard_box_attempts + 1;
        next.force_review_at = Some(now + Duration::days(FORCE_REVIEW_INTERVAL_DAYS as i64));

        // Escalation gives up: demote fully and restart normal learning.
        if next.hard_box_attempts >= MAX_HARD_BOX_ATTEMPTS {
            next.review_count = 0;
            next.mastery_level = 0.0;
            next.hard_box_attempts = 0;
        }
    } else {
        next.leitner_box = (state.leitner_box + 1).min(MAX_LEITNER_BOX);
        next.hard_box_attempts = 0;

        // Out of the bottom box: return to normal scheduling.
        if next.leitner_box > MIN_LEITNER_BOX {
            let interval =
                compute_interval(next.review_count, next.ease_factor, next.difficulty);
            next.next_review_at = now + Duration::days(interval as i64);
            next.force_review_at = None;
        }
    }

    next
}
