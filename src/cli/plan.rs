//! Plan command for Cadence.
//!
//! Shows the review horizon: how many items come due today, this week, this
//! month, and later.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::ReviewItem;
use crate::queue::review_plan;
use crate::storage::ReviewStore;

/// Output format for the plan command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanOutput {
    /// Whether planning succeeded.
    pub success: bool,
    /// Total items in the collection.
    pub total: usize,
    /// Terms due right now.
    pub today: Vec<String>,
    /// Terms due within a week.
    pub this_week: Vec<String>,
    /// Terms due within a month.
    pub this_month: Vec<String>,
    /// Terms due further out.
    pub later: Vec<String>,
    /// Error message if planning failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlanOutput {
    /// Create a failed output.
    fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            total: 0,
            today: Vec::new(),
            this_week: Vec::new(),
            this_month: Vec::new(),
            later: Vec::new(),
            error: Some(error.into()),
        }
    }
}

fn terms(items: &[ReviewItem]) -> Vec<String> {
    items.iter().map(|i| i.term.clone()).collect()
}

/// The plan command implementation.
pub struct PlanCommand<S> {
    store: S,
}

impl<S: ReviewStore> PlanCommand<S> {
    /// Create a new plan command.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Run the plan command.
    pub fn run(&self, now: DateTime<Utc>) -> PlanOutput {
        let all = match self.store.fetch_all() {
            Ok(items) => items,
            Err(e) => return PlanOutput::failure(e.to_string()),
        };

        let plan = review_plan(&all, now);

        PlanOutput {
            success: true,
            total: plan.total(),
            today: terms(&plan.today),
            this_week: terms(&plan.this_week),
            this_month: terms(&plan.this_month),
            later: terms(&plan.later),
            error: None,
        }
    }
}
