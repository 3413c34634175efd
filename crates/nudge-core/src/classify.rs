//! Pure functions mapping raw clock values onto the state vocabulary.
//!
//! Nothing here holds state; every function is safe to call from any thread
//! and from any component (behavior models, the record loaders, the tick
//! loop).

use crate::{CoreError, CoreResult, DayState, RecencyState, StateKey, TimeState};

/// Minutes in one simulated day.  Every day is exactly this long.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Largest "minutes since last notification" still classified as recent.
pub const RECENT_THRESHOLD_MINUTES: i64 = 60;

/// Bucket an hour of the day.
///
/// `hour < 8` is `Sleeping`, `8..12` `Morning`, `12..18` `Afternoon`, and
/// everything else `Evening`.  The chronometer usually skips the sleeping
/// hours, but historical records may still fall into them.
pub fn classify_time_of_day(hour: u32) -> TimeState {
    match hour {
        0..8   => TimeState::Sleeping,
        8..12  => TimeState::Morning,
        12..18 => TimeState::Afternoon,
        _      => TimeState::Evening,
    }
}

/// Map a day index (0 = Monday … 6 = Sunday) to its tag.
///
/// Returns [`CoreError::Lookup`] for any index outside `0..=6`.
pub fn classify_day_of_week(day: u32) -> CoreResult<DayState> {
    DayState::ALL
        .get(day as usize)
        .copied()
        .ok_or_else(|| CoreError::Lookup(format!("day-of-week index {day} outside 0..=6")))
}

/// `Within1Hour` if `minutes_since_last <= 60`, otherwise `Long`.
#[inline]
pub fn classify_notification_recency(minutes_since_last: i64) -> RecencyState {
    if minutes_since_last <= RECENT_THRESHOLD_MINUTES {
        RecencyState::Within1Hour
    } else {
        RecencyState::Long
    }
}

/// Classify a full context into its [`StateKey`].
pub fn classify_state(hour: u32, day: u32, minutes_since_last: i64) -> CoreResult<StateKey> {
    Ok(StateKey {
        time:    classify_time_of_day(hour),
        day:     classify_day_of_week(day)?,
        recency: classify_notification_recency(minutes_since_last),
    })
}

/// Signed distance in minutes from `(day2, hour2, minute2)` to
/// `(day1, hour1, minute1)`, treating every day as 1440 minutes.
///
/// Antisymmetric: swapping the two timestamps negates the result.  Take
/// `.abs()` when only the magnitude matters.
#[inline]
pub fn elapsed_minutes(
    day1: i64, hour1: i64, minute1: i64,
    day2: i64, hour2: i64, minute2: i64,
) -> i64 {
    (day1 - day2) * MINUTES_PER_DAY + (hour1 - hour2) * 60 + (minute1 - minute2)
}

/// Divide every value by the sum of all values.
///
/// Fails with [`CoreError::Distribution`] when the sum is zero, negative or
/// not finite, or when any value is negative.  No fallback is substituted.
pub fn normalize<const N: usize>(values: [f64; N]) -> CoreResult<[f64; N]> {
    let sum: f64 = values.iter().sum();
    if !(sum.is_finite() && sum > 0.0) || values.iter().any(|v| *v < 0.0) {
        return Err(CoreError::Distribution { weights: values.to_vec() });
    }
    Ok(values.map(|v| v / sum))
}
