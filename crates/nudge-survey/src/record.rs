//! `BehaviorRecord`: one historical observation of a notification response.

use nudge_core::{classify_state, CoreResult, Outcome, StateKey};

/// A single observed response, immutable once built.
///
/// `hour`/`minute` are kept raw because the history-weighted model ranks
/// records inside a bucket by their time-of-day distance to the query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BehaviorRecord {
    pub hour:    u32,
    pub minute:  u32,
    /// Derived from `hour`, the record's weekday and its recency.
    pub key:     StateKey,
    pub outcome: Outcome,
    /// Who produced the record, when the source identifies respondents.
    pub respondent: Option<String>,
}

impl BehaviorRecord {
    /// Build a record and derive its state key.
    ///
    /// Fails with `CoreError::Lookup` if `day_of_week` is outside `0..=6`.
    pub fn new(
        hour:               u32,
        minute:             u32,
        day_of_week:        u32,
        minutes_since_last: i64,
        outcome:            Outcome,
    ) -> CoreResult<Self> {
        Ok(Self {
            hour,
            minute,
            key: classify_state(hour, day_of_week, minutes_since_last)?,
            outcome,
            respondent: None,
        })
    }

    pub fn with_respondent(mut self, respondent: impl Into<String>) -> Self {
        self.respondent = Some(respondent.into());
        self
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minute_of_day(&self) -> i64 {
        self.hour as i64 * 60 + self.minute as i64
    }
}
