//! CLI commands for Cadence.
//!
//! This module provides CLI commands organized into:
//! - **Authoring**: add (build the learning set)
//! - **Review**: grade, due, recommend (run a session)
//! - **Reporting**: plan, stats, predict (inspect progress)
//!
//! Commands follow the Options/Output pattern: each takes an options struct
//! and returns a serializable output with an embedded success flag, leaving
//! printing and exit codes to the binary.

pub mod add;
pub mod due;
pub mod grade;
pub mod plan;
pub mod predict;
pub mod recommend;
pub mod session;
pub mod stats;

pub use add::AddCommand;
pub use due::DueCommand;
pub use grade::GradeCommand;
pub use plan::PlanCommand;
pub use predict::PredictCommand;
pub use recommend::RecommendCommand;
pub use session::{load_tracker, save_tracker};
pub use stats::StatsCommand;
