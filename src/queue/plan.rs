//! Review horizon planning.
//!
//! Buckets the whole collection by the days until each item's effective due
//! time (the earlier of its normal and forced schedules): due now, within a
//! week, within a month, later.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::ReviewItem;
use crate::queue::selector::days_until;

/// Horizon for the "this week" bucket, in days.
pub const WEEK_HORIZON_DAYS: i64 = 7;

/// Horizon for the "this month" bucket, in days.
pub const MONTH_HORIZON_DAYS: i64 = 30;

/// Upcoming reviews bucketed by horizon.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewPlan {
    /// Items due right now.
    pub today: Vec<ReviewItem>,
    /// Items due within the next week.
    pub this_week: Vec<ReviewItem>,
    /// Items due within the next month.
    pub this_month: Vec<ReviewItem>,
    /// Items due further out.
    pub later: Vec<ReviewItem>,
}

impl ReviewPlan {
    /// Total number of items across all buckets.
    pub fn total(&self) -> usize {
        self.today.len() + self.this_week.len() + self.this_month.len() + self.later.len()
    }

    /// Whether the plan holds no items at all.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Bucket every item by the days until its effective due time.
pub fn review_plan(items: &[ReviewItem], now: DateTime<Utc>) -> ReviewPlan {
    let mut plan = ReviewPlan::default();

    for item in items {
        let days = days_until(item.state.effective_due_at(), now);
        if days <= 0 {
            plan.today.push(item.clone());
        } else if days <= WEEK_HORIZON_DAYS {
            plan.this_week.push(item.clone());
        } else if days <= MONTH_HORIZON_DAYS {
            plan.this_month.push(item.clone());
        } else {
            plan.later.push(item.clone());
        }
    }

    plan
}
