//! Session statistics and progress prediction for Cadence.
//!
//! [`StatsTracker`] holds the session-scoped counters (accuracy, streaks);
//! one tracker is constructed per learner session and passed explicitly,
//! never shared as a process-wide singleton. [`predict`] derives an
//! estimated time-to-mastery from the item collection and the current
//! streak.

pub mod progress;
pub mod tracker;

pub use progress::{predict, Prediction, MASTERY_THRESHOLD, MAX_DAILY_LEARNING_RATE};
pub use tracker::{Efficiency, StatsTracker};
