//! Predict command for Cadence.
//!
//! Reports learning progress and the estimated days to mastery, combining
//! the item collection with the streak from the stats snapshot.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cli::session::load_tracker;
use crate::stats::{predict, Prediction};
use crate::storage::ReviewStore;

/// Output format for the predict command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictOutput {
    /// Whether the prediction succeeded.
    pub success: bool,
    /// The progress prediction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<Prediction>,
    /// Error message if prediction failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PredictOutput {
    /// Create a successful output.
    fn success(prediction: Prediction) -> Self {
        Self {
            success: true,
            prediction: Some(prediction),
            error: None,
        }
    }

    /// Create a failed output.
    fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            prediction: None,
            error: Some(error.into()),
        }
    }
}

/// The predict command implementation.
pub struct PredictCommand<S> {
    store: S,
    snapshot_path: PathBuf,
}

impl<S: ReviewStore> PredictCommand<S> {
    /// Create a new predict command.
    pub fn new(store: S, snapshot_path: PathBuf) -> Self {
        Self {
            store,
            snapshot_path,
        }
    }

    /// Run the predict command.
    pub fn run(&self) -> PredictOutput {
        let items = match self.store.fetch_all() {
            Ok(items) => items,
            Err(e) => return PredictOutput::failure(e.to_string()),
        };

        let streak = match load_tracker(&self.snapshot_path) {
            Ok(tracker) => tracker.learning_streak,
            Err(e) => return PredictOutput::failure(e.to_string()),
        };

        PredictOutput::success(predict(&items, streak))
    }
}
