//! Stats command for Cadence.
//!
//! Reports session efficiency from the stats snapshot: accuracy, totals,
//! consecutive runs, and the learning streak.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cli::session::load_tracker;
use crate::stats::Efficiency;

/// Output format for the stats command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsOutput {
    /// Whether the report succeeded.
    pub success: bool,
    /// The efficiency report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<Efficiency>,
    /// Error message if reporting failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatsOutput {
    /// Create a successful output.
    fn success(efficiency: Efficiency) -> Self {
        Self {
            success: true,
            efficiency: Some(efficiency),
            error: None,
        }
    }

    /// Create a failed output.
    fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            efficiency: None,
            error: Some(error.into()),
        }
    }
}

/// The stats command implementation.
pub struct StatsCommand {
    snapshot_path: PathBuf,
}

impl StatsCommand {
    /// Create a new stats command.
    pub fn new(snapshot_path: PathBuf) -> Self {
        Self { snapshot_path }
    }

    /// Run the stats command.
    pub fn run(&self) -> StatsOutput {
        match load_tracker(&self.snapshot_path) {
            Ok(tracker) => StatsOutput::success(tracker.efficiency()),
            Err(e) => StatsOutput::failure(e.to_string()),
        }
    }
}
