//! Review queue selection for Cadence.
//!
//! Read-only views over a collection of items: which are due right now,
//! which a bounded session should contain, and what the upcoming horizon
//! looks like.

pub mod plan;
pub mod selector;

pub use plan::{review_plan, ReviewPlan, MONTH_HORIZON_DAYS, WEEK_HORIZON_DAYS};
pub use selector::{days_until, due_items, priority_score, recommend, weights, ScoredItem};
