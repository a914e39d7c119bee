//! Scheduling algorithms for Cadence.
//!
//! Two independent update policies operate on a [`ReviewState`]:
//!
//! - [`grade`]: the SM-2-style pass. Ease factor, review count, and mastery
//!   updates from a graded response quality, with the next interval from the
//!   interval model.
//! - [`apply_override`]: the Leitner escalation pass. Box movement and
//!   forced near-term re-review on repeated failure.
//!
//! They compose: callers may run the override after grading, or use either
//! alone. Neither touches shared state; both take a state and return a new
//! one.
//!
//! [`ReviewState`]: crate::core::ReviewState

pub mod engine;
pub mod interval;
pub mod leitner;

pub use engine::grade;
pub use interval::{
    compute_interval, BASE_INTERVAL_DAYS, GRADUATION_INTERVAL_DAYS, MAX_INTERVAL_DAYS,
    MIN_INTERVAL_DAYS,
};
pub use leitner::{apply_override, FORCE_REVIEW_INTERVAL_DAYS, MAX_HARD_BOX_ATTEMPTS};
