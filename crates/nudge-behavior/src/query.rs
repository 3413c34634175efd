//! The context a response model is queried with.

use nudge_core::{classify_state, CoreResult, SimClock, StateKey};

/// A read-only description of the moment a notification might be sent.
///
/// Built once per tick by the simulation loop.  `minutes_since_last` is
/// `i64::MAX` when no notification has been sent yet, which classifies as
/// `RecencyState::Long`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ResponseQuery {
    pub hour:               u32,
    pub minute:             u32,
    /// 0 = Monday … 6 = Sunday.
    pub day_of_week:        u32,
    pub minutes_since_last: i64,
}

impl ResponseQuery {
    #[inline]
    pub fn new(hour: u32, minute: u32, day_of_week: u32, minutes_since_last: i64) -> Self {
        Self { hour, minute, day_of_week, minutes_since_last }
    }

    /// Query for the tick `clock` points at.
    #[inline]
    pub fn at(clock: &SimClock, minutes_since_last: i64) -> Self {
        Self::new(clock.hour, clock.minute, clock.day_of_week, minutes_since_last)
    }

    /// Classify this context.  Fails with `CoreError::Lookup` for a weekday
    /// outside `0..=6`.
    #[inline]
    pub fn state_key(&self) -> CoreResult<StateKey> {
        classify_state(self.hour, self.day_of_week, self.minutes_since_last)
    }
}
