//! Cadence - Spaced-Repetition Review Scheduler
//!
//! Cadence decides, for each learnable item, when it must next be shown,
//! how mastered it is, and which items should be surfaced for review right
//! now. The core is a hybrid of an SM-2-style ease/interval model, a
//! Leitner-box escalation path, a priority-scoring queue selector, and
//! session statistics feeding a progress predictor. All of it is pure
//! functions over immutable state, with persistence and presentation at
//! the edges.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod queue;
pub mod scheduler;
pub mod stats;
pub mod storage;

pub use config::Config;
pub use core::{DifficultyTier, Quality, ReviewItem, ReviewState};
pub use error::{CadenceError, Result};
pub use queue::{due_items, recommend, review_plan, ReviewPlan, ScoredItem};
pub use scheduler::{apply_override, compute_interval, grade};
pub use stats::{predict, Efficiency, Prediction, StatsTracker};
pub use storage::{FileReviewStore, MemoryReviewStore, ReviewStore};

// CLI commands
pub use cli::{
    AddCommand, DueCommand, GradeCommand, PlanCommand, PredictCommand, RecommendCommand,
    StatsCommand,
};
