//! Review entity types for Cadence.
//!
//! A [`ReviewState`] is the per-item scheduling record: ease factor, review
//! count, mastery level, due timestamps, and the Leitner escalation fields.
//! A [`ReviewItem`] pairs one of these records with the content identity the
//! scheduler itself never looks at (id, term, meaning).
//!
//! States are only ever transformed through the scheduler functions, which
//! take a state and return a new, fully-specified one. Callers persist the
//! returned value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CadenceError;

/// Ease factor assigned to an item that has never been graded.
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Floor for the ease factor. Every update re-clamps to this value.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Upper bound for the mastery level (lower bound is 0).
pub const MAX_MASTERY_LEVEL: f64 = 5.0;

/// Lowest Leitner box (hardest, reviewed most often).
pub const MIN_LEITNER_BOX: u8 = 1;

/// Highest Leitner box (best known).
pub const MAX_LEITNER_BOX: u8 = 5;

/// Response quality for a graded review.
///
/// A closed enumeration: an unrecognized quality is impossible once a value
/// of this type exists. Textual input goes through [`FromStr`], which is the
/// only fallible entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    /// Failed to recall; the item restarts its learning pass.
    Again,
    /// Recalled with significant effort.
    Hard,
    /// Recalled correctly.
    Good,
    /// Recalled effortlessly.
    Easy,
}

impl Quality {
    /// Get all quality variants.
    pub fn all() -> &'static [Quality] {
        &[Quality::Again, Quality::Hard, Quality::Good, Quality::Easy]
    }

    /// Whether this quality counts as a correct answer.
    ///
    /// Only `Again` is a failure; `Hard` is a successful (if strained)
    /// recall.
    pub fn is_correct(&self) -> bool {
        !matches!(self, Quality::Again)
    }

    /// Get the display name for this quality.
    pub fn display_name(&self) -> &'static str {
        match self {
            Quality::Again => "again",
            Quality::Hard => "hard",
            Quality::Good => "good",
            Quality::Easy => "easy",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Quality {
    type Err = CadenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "again" => Ok(Quality::Again),
            "hard" => Ok(Quality::Hard),
            "good" => Ok(Quality::Good),
            "easy" => Ok(Quality::Easy),
            other => Err(CadenceError::invalid_argument(format!(
                "unknown quality '{}' (expected one of: again, hard, good, easy)",
                other
            ))),
        }
    }
}

/// Fixed content difficulty of an item, set at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyTier {
    /// Easy content; intervals grow slower than the base rate.
    Easy,
    /// Standard content.
    #[default]
    Medium,
    /// Hard content; intervals grow faster and reviews rank higher.
    Hard,
}

impl DifficultyTier {
    /// Get all tier variants.
    pub fn all() -> &'static [DifficultyTier] {
        &[
            DifficultyTier::Easy,
            DifficultyTier::Medium,
            DifficultyTier::Hard,
        ]
    }

    /// Multiplier applied to the computed review interval.
    pub fn interval_multiplier(&self) -> f64 {
        match self {
            DifficultyTier::Easy => 0.8,
            DifficultyTier::Medium => 1.0,
            DifficultyTier::Hard => 1.5,
        }
    }

    /// Additive weight in the review priority score.
    pub fn priority_weight(&self) -> f64 {
        match self {
            DifficultyTier::Easy => 1.0,
            DifficultyTier::Medium => 2.0,
            DifficultyTier::Hard => 3.0,
        }
    }

    /// Get the display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            DifficultyTier::Easy => "easy",
            DifficultyTier::Medium => "medium",
            DifficultyTier::Hard => "hard",
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for DifficultyTier {
    type Err = CadenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(DifficultyTier::Easy),
            "medium" => Ok(DifficultyTier::Medium),
            "hard" => Ok(DifficultyTier::Hard),
            other => Err(CadenceError::invalid_argument(format!(
                "unknown difficulty '{}' (expected one of: easy, medium, hard)",
                other
            ))),
        }
    }
}

/// Per-item scheduling record.
///
/// Invariants (maintained by the scheduler functions, never by callers):
/// - `ease_factor >= 1.3`
/// - `0.0 <= mastery_level <= 5.0`
/// - `1 <= leitner_box <= 5`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
    /// Fixed content difficulty.
    pub difficulty: DifficultyTier,
    /// Ease factor controlling interval growth.
    pub ease_factor: f64,
    /// Successful scheduling passes since the last reset.
    pub review_count: u32,
    /// Bounded mastery scalar (0 to 5).
    pub mastery_level: f64,
    /// When the item next becomes due under normal scheduling.
    pub next_review_at: DateTime<Utc>,
    /// When the item was last graded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_review_at: Option<DateTime<Utc>>,
    /// Leitner escalation box (1 = hardest).
    pub leitner_box: u8,
    /// Consecutive failures while in escalation.
    pub hard_box_attempts: u32,
    /// Forced review time; overrides `next_review_at` for due-ness and
    /// ranking while set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_review_at: Option<DateTime<Utc>>,
}

impl ReviewState {
    /// Create the scheduling record for an item entering the learning set.
    ///
    /// A new item is immediately due: `next_review_at` is the creation time.
    pub fn new(difficulty: DifficultyTier, now: DateTime<Utc>) -> Self {
        Self {
            difficulty,
            ease_factor: INITIAL_EASE_FACTOR,
            review_count: 0,
            mastery_level: 0.0,
            next_review_at: now,
            last_review_at: None,
            leitner_box: MIN_LEITNER_BOX,
            hard_box_attempts: 0,
            force_review_at: None,
        }
    }

    /// Set the ease factor.
    pub fn with_ease_factor(mut self, ease_factor: f64) -> Self {
        self.ease_factor = ease_factor;
        self
    }

    /// Set the review count.
    pub fn with_review_count(mut self, review_count: u32) -> Self {
        self.review_count = review_count;
        self
    }

    /// Set the mastery level.
    pub fn with_mastery_level(mut self, mastery_level: f64) -> Self {
        self.mastery_level = mastery_level;
        self
    }

    /// Set the normal due time.
    pub fn with_next_review_at(mut self, next_review_at: DateTime<Utc>) -> Self {
        self.next_review_at = next_review_at;
        self
    }

    /// Set the forced review time.
    pub fn with_force_review_at(mut self, force_review_at: DateTime<Utc>) -> Self {
        self.force_review_at = Some(force_review_at);
        self
    }

    /// Set the Leitner box.
    pub fn with_leitner_box(mut self, leitner_box: u8) -> Self {
        self.leitner_box = leitner_box;
        self
    }

    /// Whether the item is due at `now`.
    ///
    /// Due iff the normal schedule has elapsed, or a forced review time is
    /// set and has elapsed.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_at <= now
            || self
                .force_review_at
                .is_some_and(|force_at| force_at <= now)
    }

    /// The earliest time at which this item becomes due.
    ///
    /// The forced review time takes part when set; it is usually (but not
    /// necessarily) earlier than the normal schedule.
    pub fn effective_due_at(&self) -> DateTime<Utc> {
        match self.force_review_at {
            Some(force_at) => force_at.min(self.next_review_at),
            None => self.next_review_at,
        }
    }

    /// Whether the item counts as mastered for progress reporting.
    pub fn is_mastered(&self) -> bool {
        self.mastery_level >= crate::stats::MASTERY_THRESHOLD
    }
}

/// A learnable item: content identity plus its scheduling record.
///
/// The content fields are opaque to the scheduler, which reads and writes
/// only `state`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewItem {
    /// Unique identifier (the slugified term).
    pub id: String,
    /// The term being learned.
    pub term: String,
    /// Meaning or translation shown on the answer side.
    pub meaning: String,
    /// Optional grouping category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// When the item entered the learning set.
    pub created_at: DateTime<Utc>,
    /// The scheduling record.
    pub state: ReviewState,
}

impl ReviewItem {
    /// Create a new item with a fresh scheduling record.
    ///
    /// The id is derived from the term via [`slug_id`], making the term the
    /// natural key: re-adding an existing term overwrites it in the store.
    pub fn new(
        term: impl Into<String>,
        meaning: impl Into<String>,
        difficulty: DifficultyTier,
        now: DateTime<Utc>,
    ) -> Self {
        let term = term.into();
        Self {
            id: slug_id(&term),
            term,
            meaning: meaning.into(),
            category: None,
            created_at: now,
            state: ReviewState::new(difficulty, now),
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Replace the scheduling record, keeping the content identity.
    pub fn with_state(mut self, state: ReviewState) -> Self {
        self.state = state;
        self
    }
}

/// Derive a stable item id from a term.
///
/// Lowercases and maps every non-alphanumeric run to a single `-`, so that
/// "Guten Tag!" and "guten tag" collapse to the same id.
pub fn slug_id(term: &str) -> String {
    let mut slug = String::with_capacity(term.len());
    let mut last_dash = true;
    for ch in term.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    // Quality tests

    #[test]
    fn test_quality_from_str() {
        assert_eq!("again".parse::<Quality>().unwrap(), Quality::Again);
        assert_eq!("hard".parse::<Quality>().unwrap(), Quality::Hard);
        assert_eq!("good".parse::<Quality>().unwrap(), Quality::Good);
        assert_eq!("easy".parse::<Quality>().unwrap(), Quality::Easy);
    }

    #[test]
    fn test_quality_from_str_rejects_unknown() {
        let err = "meh".parse::<Quality>().unwrap_err();
        assert!(err.is_contract_violation());
        assert!(err.to_string().contains("unknown quality 'meh'"));
    }

    #[test]
    fn test_quality_from_str_is_case_sensitive() {
        assert!("Good".parse::<Quality>().is_err());
        assert!("AGAIN".parse::<Quality>().is_err());
    }

    #[test]
    fn test_quality_is_correct() {
        assert!(!Quality::Again.is_correct());
        assert!(Quality::Hard.is_correct());
        assert!(Quality::Good.is_correct());
        assert!(Quality::Easy.is_correct());
    }

    #[test]
    fn test_quality_all() {
        assert_eq!(Quality::all().len(), 4);
    }

    #[test]
    fn test_quality_display_roundtrip() {
        for &quality in Quality::all() {
            let parsed: Quality = quality.to_string().parse().unwrap();
            assert_eq!(parsed, quality);
        }
    }

    // DifficultyTier tests

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("easy".parse::<DifficultyTier>().unwrap(), DifficultyTier::Easy);
        assert_eq!(
            "medium".parse::<DifficultyTier>().unwrap(),
            DifficultyTier::Medium
        );
        assert_eq!("hard".parse::<DifficultyTier>().unwrap(), DifficultyTier::Hard);
    }

    #[test]
    fn test_difficulty_from_str_rejects_unknown() {
        let err = "extreme".parse::<DifficultyTier>().unwrap_err();
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_difficulty_default_is_medium() {
        assert_eq!(DifficultyTier::default(), DifficultyTier::Medium);
    }

    #[test]
    fn test_difficulty_interval_multipliers() {
        assert!((DifficultyTier::Easy.interval_multiplier() - 0.8).abs() < f64::EPSILON);
        assert!((DifficultyTier::Medium.interval_multiplier() - 1.0).abs() < f64::EPSILON);
        assert!((DifficultyTier::Hard.interval_multiplier() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_difficulty_priority_weights() {
        assert!((DifficultyTier::Easy.priority_weight() - 1.0).abs() < f64::EPSILON);
        assert!((DifficultyTier::Medium.priority_weight() - 2.0).abs() < f64::EPSILON);
        assert!((DifficultyTier::Hard.priority_weight() - 3.0).abs() < f64::EPSILON);
    }

    // ReviewState tests

    #[test]
    fn test_new_state_defaults() {
        let t = now();
        let state = ReviewState::new(DifficultyTier::Medium, t);

        assert_eq!(state.difficulty, DifficultyTier::Medium);
        assert!((state.ease_factor - INITIAL_EASE_FACTOR).abs() < f64::EPSILON);
        assert_eq!(state.review_count, 0);
        assert!(state.mastery_level.abs() < f64::EPSILON);
        assert_eq!(state.next_review_at, t);
        assert!(state.last_review_at.is_none());
        assert_eq!(state.leitner_box, MIN_LEITNER_BOX);
        assert_eq!(state.hard_box_attempts, 0);
        assert!(state.force_review_at.is_none());
    }

    #[test]
    fn test_new_state_is_immediately_due() {
        let t = now();
        let state = ReviewState::new(DifficultyTier::Easy, t);
        assert!(state.is_due(t));
    }

    #[test]
    fn test_is_due_by_normal_schedule() {
        let t = now();
        let state = ReviewState::new(DifficultyTier::Medium, t)
            .with_next_review_at(t + chrono::Duration::days(3));

        assert!(!state.is_due(t));
        assert!(state.is_due(t + chrono::Duration::days(3)));
    }

    #[test]
    fn test_is_due_by_forced_review() {
        let t = now();
        let state = ReviewState::new(DifficultyTier::Medium, t)
            .with_next_review_at(t + chrono::Duration::days(10))
            .with_force_review_at(t + chrono::Duration::days(1));

        assert!(!state.is_due(t));
        // Forced time elapsed, normal schedule still far away.
        assert!(state.is_due(t + chrono::Duration::days(1)));
    }

    #[test]
    fn test_effective_due_at_prefers_earlier_time() {
        let t = now();
        let state = ReviewState::new(DifficultyTier::Medium, t)
            .with_next_review_at(t + chrono::Duration::days(10))
            .with_force_review_at(t + chrono::Duration::days(1));

        assert_eq!(state.effective_due_at(), t + chrono::Duration::days(1));

        let unforced = ReviewState::new(DifficultyTier::Medium, t)
            .with_next_review_at(t + chrono::Duration::days(10));
        assert_eq!(unforced.effective_due_at(), t + chrono::Duration::days(10));
    }

    #[test]
    fn test_state_serialization_roundtrip() {
        let t = now();
        let state = ReviewState::new(DifficultyTier::Hard, t)
            .with_ease_factor(2.1)
            .with_review_count(4)
            .with_mastery_level(3.5)
            .with_force_review_at(t + chrono::Duration::days(1));

        let json = serde_json::to_string(&state).unwrap();
        let parsed: ReviewState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, parsed);
    }

    #[test]
    fn test_state_serde_uses_snake_case_tiers() {
        let t = now();
        let state = ReviewState::new(DifficultyTier::Medium, t);
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"medium\""));
    }

    // ReviewItem tests

    #[test]
    fn test_new_item() {
        let t = now();
        let item = ReviewItem::new("Serendipity", "happy accident", DifficultyTier::Hard, t);

        assert_eq!(item.id, "serendipity");
        assert_eq!(item.term, "Serendipity");
        assert_eq!(item.meaning, "happy accident");
        assert!(item.category.is_none());
        assert_eq!(item.created_at, t);
        assert_eq!(item.state.difficulty, DifficultyTier::Hard);
    }

    #[test]
    fn test_item_with_category() {
        let item = ReviewItem::new("hola", "hello", DifficultyTier::Easy, now())
            .with_category("greetings");
        assert_eq!(item.category.as_deref(), Some("greetings"));
    }

    #[test]
    fn test_item_serialization_roundtrip() {
        let item = ReviewItem::new("guten Tag", "good day", DifficultyTier::Medium, now())
            .with_category("greetings");

        let json = serde_json::to_string(&item).unwrap();
        let parsed: ReviewItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item, parsed);
    }

    // slug_id tests

    #[test]
    fn test_slug_id_lowercases() {
        assert_eq!(slug_id("Serendipity"), "serendipity");
    }

    #[test]
    fn test_slug_id_collapses_punctuation() {
        assert_eq!(slug_id("Guten Tag!"), "guten-tag");
        assert_eq!(slug_id("s'il vous plaît"), "s-il-vous-plaît");
    }

    #[test]
    fn test_slug_id_same_term_same_id() {
        assert_eq!(slug_id("Guten Tag!"), slug_id("guten tag"));
    }

    #[test]
    fn test_slug_id_strips_leading_and_trailing_separators() {
        assert_eq!(slug_id("  hello  "), "hello");
        assert_eq!(slug_id("...dots..."), "dots");
    }
}
