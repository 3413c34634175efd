//! When the last notification was actually sent.

use nudge_core::{elapsed_minutes, SimClock};

/// Recency reported to the response model before anything has been sent.
/// Larger than any threshold, so it always classifies as `Long`.
pub const NEVER_SENT_MINUTES: i64 = i64::MAX;

/// The tick of the most recent *sent* notification.
///
/// Only updated when the agent actually sends; ticks where sending was merely
/// considered leave it untouched.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct NotificationHistory {
    last_sent: Option<SimClock>,
}

impl NotificationHistory {
    /// Nothing sent yet.
    pub fn never() -> Self {
        Self { last_sent: None }
    }

    /// Pretend a notification went out at `clock`.
    pub fn sent_at(clock: SimClock) -> Self {
        Self { last_sent: Some(clock) }
    }

    pub fn last_sent(&self) -> Option<SimClock> {
        self.last_sent
    }

    pub fn record(&mut self, clock: SimClock) {
        self.last_sent = Some(clock);
    }

    /// Minutes from the last send to `now`; `None` if nothing was sent.
    pub fn minutes_since(&self, now: &SimClock) -> Option<i64> {
        self.last_sent.map(|last| {
            elapsed_minutes(
                now.days_elapsed as i64, now.hour as i64, now.minute as i64,
                last.days_elapsed as i64, last.hour as i64, last.minute as i64,
            )
        })
    }
}
