//! Review interval computation.
//!
//! Maps (review count, ease factor, difficulty tier) to the next interval in
//! days:
//!
//! 1. Count 0 → the base interval (1 day).
//! 2. Count 1 → the fixed graduation step (6 days), bypassing the formula.
//! 3. Otherwise → `round(base * ease * count * tier multiplier)`.
//! 4. Result clamped to `[1, 365]`.

use crate::core::DifficultyTier;

/// Interval for an item with no successful passes, in days.
pub const BASE_INTERVAL_DAYS: u32 = 1;

/// Fixed interval for the first successful pass, in days.
///
/// The graduation step: the ease-factor formula only takes over from the
/// second pass on.
pub const GRADUATION_INTERVAL_DAYS: u32 = 6;

/// Shortest interval ever scheduled, in days.
pub const MIN_INTERVAL_DAYS: u32 = 1;

/// Longest interval ever scheduled, in days.
pub const MAX_INTERVAL_DAYS: u32 = 365;

/// Compute the next review interval in days.
///
/// Pure and total: never fails for finite, non-negative inputs, and the
/// result always lies in `[MIN_INTERVAL_DAYS, MAX_INTERVAL_DAYS]`.
pub fn compute_interval(review_count: u32, ease_factor: f64, difficulty: DifficultyTier) -> u32 {
    let interval = match review_count {
        0 => BASE_INTERVAL_DAYS,
        1 => GRADUATION_INTERVAL_DAYS,
        count => {
            let days = BASE_INTERVAL_DAYS as f64
                * ease_factor
                * count as f64
                * difficulty.interval_multiplier();
            days.round() as u32
        }
    };

    interval.clamp(MIN_INTERVAL_DAYS, MAX_INTERVAL_DAYS)
}
