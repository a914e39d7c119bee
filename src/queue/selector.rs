//! Due-item selection and priority ranking.
//!
//! An item is due when its normal schedule has elapsed or a forced review
//! time has elapsed. Due items are ordered forced-first (ascending forced
//! time), then ranked for a bounded session by a composite priority score:
//!
//! - Forced review: flat 100-point boost.
//! - Mastery gap: `(5 - mastery) * 10`.
//! - Rehearsal gap: `(10 - review count) * 5`.
//! - Content difficulty: easy = 1, medium = 2, hard = 3.
//! - Urgency: `max(0, 20 - days until due)`; overdue items earn more than
//!   the 20-point window.
//!
//! Scores are combined via sum. Ties keep input order (stable sort).

use chrono::{DateTime, Utc};

use crate::core::{ReviewItem, ReviewState, MAX_MASTERY_LEVEL};

/// Score weights for priority ranking.
pub mod weights {
    /// Flat boost for items under forced review.
    pub const FORCED_REVIEW: f64 = 100.0;
    /// Multiplier on the mastery gap.
    pub const MASTERY_GAP: f64 = 10.0;
    /// Multiplier on the rehearsal gap.
    pub const REHEARSAL_GAP: f64 = 5.0;
    /// Review count at which the rehearsal gap bottoms out.
    pub const REHEARSAL_TARGET: f64 = 10.0;
    /// Days-until-due window inside which urgency points accrue.
    pub const URGENCY_WINDOW_DAYS: f64 = 20.0;
}

/// Signed days until `at`, rounded up.
///
/// Zero when `at` has just arrived, negative when it is overdue.
pub fn days_until(at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let seconds = (at - now).num_seconds() as f64;
    (seconds / 86_400.0).ceil() as i64
}

/// Items due at `now`, ordered forced-first.
///
/// Forced items sort ascending by forced time; items without a forced time
/// follow, keeping their input order. Idempotent: the same input and time
/// always yield the same ordered result.
pub fn due_items(items: &[ReviewItem], now: DateTime<Utc>) -> Vec<ReviewItem> {
    let mut due: Vec<ReviewItem> = items
        .iter()
        .filter(|item| item.state.is_due(now))
        .cloned()
        .collect();

    // Unforced items sort after every forced one.
    due.sort_by_key(|item| {
        item.state
            .force_review_at
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    });

    due
}

/// Composite priority score for a due item.
pub fn priority_score(state: &ReviewState, now: DateTime<Utc>) -> f64 {
    let mut score = 0.0;

    if state.force_review_at.is_some() {
        score += weights::FORCED_REVIEW;
    }

    score += (MAX_MASTERY_LEVEL - state.mastery_level) * weights::MASTERY_GAP;
    score += (weights::REHEARSAL_TARGET - state.review_count as f64) * weights::REHEARSAL_GAP;
    score += state.difficulty.priority_weight();

    let until_due = days_until(state.next_review_at, now) as f64;
    score += (weights::URGENCY_WINDOW_DAYS - until_due).max(0.0);

    score
}

/// An item paired with its computed priority score.
#[derive(Debug, Clone)]
pub struct ScoredItem {
    /// The item.
    pub item: ReviewItem,
    /// The priority score.
    pub score: f64,
}

impl ScoredItem {
    /// Create a new scored item.
    pub fn new(item: ReviewItem, score: f64) -> Self {
        Self { item, score }
    }
}

/// The top `max_count` due items, ranked by priority.
///
/// Sorted descending by score; ties keep the forced-first due ordering
/// (stable sort).
pub fn recommend(items: &[ReviewItem], now: DateTime<Utc>, max_count: usize) -> Vec<ScoredItem> {
    let mut scored: Vec<ScoredItem> = due_items(items, now)
        .into_iter()
        .map(|item| {
            let score = priority_score(&item.state, now);
            ScoredItem::new(item, score)
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    scored.truncate(max_count);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DifficultyTier;
    use chrono::Duration;

    fn make_item(id: &str, now: DateTime<Utc>) -> ReviewItem {
        ReviewItem::new(id, "meaning", DifficultyTier::Medium, now)
    }

    fn due_item(id: &str, now: DateTime<Utc>) -> ReviewItem {
        let mut item = make_item(id, now);
        item.state.next_review_at = now - Duration::hours(1);
        item
    }

    fn forced_item(id: &str, now: DateTime<Utc>, forced_at: DateTime<Utc>) -> ReviewItem {
        let mut item = make_item(id, now);
        item.state.next_review_at = now + Duration::days(10);
        item.state.force_review_at = Some(forced_at);
        item
    }

    // days_until tests

    #[test]
    fn test_days_until_future() {
        let now = Utc::now();
        assert_eq!(days_until(now + Duration::days(3), now), 3);
        // Partial days round up.
        assert_eq!(days_until(now + Duration::hours(30), now), 2);
    }

    #[test]
    fn test_days_until_now_is_zero() {
        let now = Utc::now();
        assert_eq!(days_until(now, now), 0);
    }

    #[test]
    fn test_days_until_past_is_negative() {
        let now = Utc::now();
        assert_eq!(days_until(now - Duration::days(3), now), -3);
    }

    // due_items tests

    #[test]
    fn test_due_items_filters_by_schedule() {
        let now = Utc::now();
        let mut not_due = make_item("later", now);
        not_due.state.next_review_at = now + Duration::days(5);

        let items = vec![due_item("ready", now), not_due];
        let due = due_items(&items, now);

        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, "ready");
    }

    #[test]
    fn test_due_items_includes_elapsed_forced_time() {
        let now = Utc::now();
        // Normal schedule far out, forced time already elapsed.
        let item = forced_item("escalated", now, now - Duration::hours(2));

        let due = due_items(&[item], now);

        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, "escalated");
    }

    #[test]
    fn test_due_items_excludes_pending_forced_time() {
        let now = Utc::now();
        let item = forced_item("pending", now, now + Duration::hours(2));

        assert!(due_items(&[item], now).is_empty());
    }

    #[test]
    fn test_forced_items_precede_unforced() {
        let now = Utc::now();
        let items = vec![
            due_item("plain", now),
            forced_item("forced", now, now - Duration::hours(1)),
        ];

        let due = due_items(&items, now);

        assert_eq!(due.len(), 2);
        assert_eq!(due[0].id, "forced");
        assert_eq!(due[1].id, "plain");
    }

    #[test]
    fn test_forced_items_sort_by_forced_time() {
        let now = Utc::now();
        let items = vec![
            forced_item("second", now, now - Duration::hours(1)),
            forced_item("first", now, now - Duration::hours(5)),
        ];

        let due = due_items(&items, now);

        assert_eq!(due[0].id, "first");
        assert_eq!(due[1].id, "second");
    }

    #[test]
    fn test_unforced_ties_keep_input_order() {
        let now = Utc::now();
        let items = vec![due_item("a", now), due_item("b", now), due_item("c", now)];

        let due = due_items(&items, now);

        let ids: Vec<&str> = due.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_due_items_is_idempotent() {
        let now = Utc::now();
        let items = vec![
            due_item("a", now),
            forced_item("f", now, now - Duration::hours(1)),
            due_item("b", now),
        ];

        let first = due_items(&items, now);
        let second = due_items(&items, now);

        assert_eq!(first, second);
    }

    // priority_score tests

    #[test]
    fn test_score_fresh_due_item() {
        let now = Utc::now();
        let item = due_item("fresh", now);

        // mastery gap 50 + rehearsal gap 50 + medium weight 2 + urgency 20
        // (just overdue, days_until = 0).
        let score = priority_score(&item.state, now);
        assert!((score - 122.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_forced_boost() {
        let now = Utc::now();
        let plain = due_item("plain", now);
        let mut forced = due_item("forced", now);
        forced.state.force_review_at = Some(now - Duration::hours(1));

        let plain_score = priority_score(&plain.state, now);
        let forced_score = priority_score(&forced.state, now);

        assert!((forced_score - plain_score - weights::FORCED_REVIEW).abs() < 1e-9);
    }

    #[test]
    fn test_score_rewards_low_mastery() {
        let now = Utc::now();
        let mut novice = due_item("novice", now);
        novice.state.mastery_level = 0.0;
        let mut adept = due_item("adept", now);
        adept.state.mastery_level = 4.0;

        assert!(priority_score(&novice.state, now) > priority_score(&adept.state, now));
    }

    #[test]
    fn test_score_rewards_overdue_items_beyond_window() {
        let now = Utc::now();
        let mut overdue = due_item("overdue", now);
        overdue.state.next_review_at = now - Duration::days(5);
        let just_due = due_item("just", now);

        // Five days overdue buys five extra urgency points.
        let diff = priority_score(&overdue.state, now) - priority_score(&just_due.state, now);
        assert!((diff - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_hard_tier_outranks_easy() {
        let now = Utc::now();
        let mut hard = due_item("hard", now);
        hard.state.difficulty = DifficultyTier::Hard;
        let mut easy = due_item("easy", now);
        easy.state.difficulty = DifficultyTier::Easy;

        let diff = priority_score(&hard.state, now) - priority_score(&easy.state, now);
        assert!((diff - 2.0).abs() < 1e-9);
    }

    // recommend tests

    #[test]
    fn test_recommend_only_due_items() {
        let now = Utc::now();
        let mut not_due = make_item("later", now);
        not_due.state.next_review_at = now + Duration::days(5);

        let items = vec![due_item("ready", now), not_due];
        let recs = recommend(&items, now, 10);

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].item.id, "ready");
    }

    #[test]
    fn test_recommend_sorts_by_score_descending() {
        let now = Utc::now();
        let mut low = due_item("low", now);
        low.state.mastery_level = 4.5;
        low.state.review_count = 9;
        let high = due_item("high", now); // fresh: max gaps

        let recs = recommend(&[low, high], now, 10);

        assert_eq!(recs[0].item.id, "high");
        assert_eq!(recs[1].item.id, "low");
        assert!(recs[0].score > recs[1].score);
    }

    #[test]
    fn test_recommend_forced_items_first() {
        let now = Utc::now();
        let plain = due_item("plain", now);
        let forced = forced_item("forced", now, now - Duration::hours(1));

        let recs = recommend(&[plain, forced], now, 10);

        assert_eq!(recs[0].item.id, "forced");
    }

    #[test]
    fn test_recommend_respects_max_count() {
        let now = Utc::now();
        let items: Vec<ReviewItem> = (0..8)
            .map(|i| due_item(&format!("w{}", i), now))
            .collect();

        let recs = recommend(&items, now, 3);

        assert_eq!(recs.len(), 3);
    }

    #[test]
    fn test_recommend_empty_input() {
        assert!(recommend(&[], Utc::now(), 5).is_empty());
    }

    // Property-based tests

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_items() -> impl Strategy<Value = Vec<ReviewItem>> {
            prop::collection::vec(
                (0i64..40, prop::option::of(-5i64..5), 0.0f64..=5.0, 0u32..20),
                0..12,
            )
            .prop_map(|specs| {
                let now = Utc::now();
                specs
                    .into_iter()
                    .enumerate()
                    .map(|(i, (due_offset, force_offset, mastery, count))| {
                        let mut item = make_item(&format!("w{}", i), now);
                        item.state.next_review_at = now + Duration::days(due_offset - 20);
                        item.state.force_review_at =
                            force_offset.map(|d| now + Duration::days(d));
                        item.state.mastery_level = mastery;
                        item.state.review_count = count;
                        item
                    })
                    .collect()
            })
        }

        proptest! {
            // Property: due_items is idempotent over the same input and time.
            #[test]
            fn prop_due_items_idempotent(items in arb_items()) {
                let now = Utc::now();
                prop_assert_eq!(due_items(&items, now), due_items(&items, now));
            }

            // Property: every due forced item precedes every due unforced one.
            #[test]
            fn prop_forced_precede_unforced(items in arb_items()) {
                let now = Utc::now();
                let due = due_items(&items, now);
                let first_unforced = due
                    .iter()
                    .position(|i| i.state.force_review_at.is_none());
                if let Some(pos) = first_unforced {
                    for item in &due[pos..] {
                        prop_assert!(item.state.force_review_at.is_none());
                    }
                }
            }

            // Property: recommend never exceeds the cap and scores are
            // non-increasing.
            #[test]
            fn prop_recommend_capped_and_sorted(items in arb_items(), cap in 0usize..10) {
                let now = Utc::now();
                let recs = recommend(&items, now, cap);
                prop_assert!(recs.len() <= cap);
                for pair in recs.windows(2) {
                    prop_assert!(pair[0].score >= pair[1].score);
                }
            }
        }
    }
}
