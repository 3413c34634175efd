//! Simulated wall-clock time.
//!
//! # Design
//!
//! Time is a `(days_elapsed, hour, minute, day_of_week)` tuple held in
//! [`SimClock`].  Every simulated day is exactly 1,440 minutes long (no DST,
//! no leap seconds) so all arithmetic is exact integer arithmetic.
//!
//! [`Chronometer`] owns the clock and is the only thing that moves it.  Each
//! call to [`Chronometer::advance`] steps forward by the configured step
//! width and keeps going until it lands on an hour the [`SkipRule`] accepts.
//! While the clock sits in a skipped hour it is fast-forwarded to the top of
//! the next hour, so a run always resumes at minute 0 of the first active
//! hour (08:00 with the default quiet hours).

use std::fmt;

use crate::classify::MINUTES_PER_DAY;
use crate::{CoreError, CoreResult};

const HOURS_PER_WEEK: usize = 24 * 7;

// ── SimClock ──────────────────────────────────────────────────────────────────

/// A point in simulated time.
///
/// `SimClock` is `Copy` and holds no heap data; the tick loop snapshots it
/// freely.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Whole days since the start of the run.
    pub days_elapsed: u64,
    /// 0–23.
    pub hour: u32,
    /// 0–59.
    pub minute: u32,
    /// 0 = Monday … 6 = Sunday.
    pub day_of_week: u32,
}

impl SimClock {
    /// Monday 00:00 of day 0.
    pub const START: SimClock = SimClock { days_elapsed: 0, hour: 0, minute: 0, day_of_week: 0 };

    pub fn new(days_elapsed: u64, hour: u32, minute: u32, day_of_week: u32) -> CoreResult<Self> {
        if hour > 23 || minute > 59 || day_of_week > 6 {
            return Err(CoreError::Lookup(format!(
                "invalid clock {hour:02}:{minute:02} on day-of-week {day_of_week}"
            )));
        }
        Ok(Self { days_elapsed, hour, minute, day_of_week })
    }

    /// Minutes since midnight of the current day.
    #[inline]
    pub fn minute_of_day(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// Move forward by `minutes`, rolling days and the weekday over.
    fn add_minutes(&mut self, minutes: u32) {
        let total = self.minute_of_day() as u64 + minutes as u64;
        let days = total / MINUTES_PER_DAY as u64;
        let rem = (total % MINUTES_PER_DAY as u64) as u32;
        self.days_elapsed += days;
        self.day_of_week = ((self.day_of_week as u64 + days) % 7) as u32;
        self.hour = rem / 60;
        self.minute = rem % 60;
    }

    /// Jump to minute 0 of the next hour.
    fn next_hour(&mut self) {
        let to_next = 60 - self.minute;
        self.add_minutes(to_next);
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Day {} {}:{:02}", self.days_elapsed, self.hour, self.minute)
    }
}

// ── QuietHours ────────────────────────────────────────────────────────────────

/// A half-open window of hours `[start_hour, end_hour)` during which no
/// decision ticks are produced.  The window wraps past midnight when
/// `start_hour > end_hour`; `start_hour == end_hour` skips nothing.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuietHours {
    pub start_hour: u32,
    /// Exclusive.  `24` is accepted and means "until midnight".
    pub end_hour: u32,
}

impl Default for QuietHours {
    /// 23:00 – 08:00.
    fn default() -> Self {
        Self { start_hour: 23, end_hour: 8 }
    }
}

impl QuietHours {
    pub fn validate(&self) -> CoreResult<()> {
        if self.start_hour > 23 || self.end_hour > 24 {
            return Err(CoreError::Config(format!(
                "quiet hours {}..{} outside 0..24",
                self.start_hour, self.end_hour
            )));
        }
        Ok(())
    }

    /// `true` if `hour` falls inside the quiet window.
    pub fn contains(&self, hour: u32) -> bool {
        if self.start_hour <= self.end_hour {
            (self.start_hour..self.end_hour).contains(&hour)
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }

    pub fn to_skip_rule(self) -> SkipRule {
        SkipRule::new(move |hour, _day| self.contains(hour))
    }
}

// ── SkipRule ──────────────────────────────────────────────────────────────────

/// Predicate `(hour, day_of_week) -> skip?` deciding which whole hours
/// never produce a tick.
///
/// Rules are hour-granular: the chronometer leaves a skipped hour by jumping
/// straight to the next one, and its hang check probes one position per hour.
pub struct SkipRule(Box<dyn Fn(u32, u32) -> bool + Send + Sync>);

impl SkipRule {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(u32, u32) -> bool + Send + Sync + 'static,
    {
        SkipRule(Box::new(f))
    }

    /// A rule that never skips.
    pub fn never() -> Self {
        SkipRule::new(|_, _| false)
    }

    #[inline]
    pub fn skips_hour(&self, hour: u32, day_of_week: u32) -> bool {
        (self.0)(hour, day_of_week)
    }

    #[inline]
    pub fn skips(&self, clock: &SimClock) -> bool {
        self.skips_hour(clock.hour, clock.day_of_week)
    }
}

impl Default for SkipRule {
    fn default() -> Self {
        QuietHours::default().to_skip_rule()
    }
}

impl fmt::Debug for SkipRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SkipRule(..)")
    }
}

// ── Chronometer ───────────────────────────────────────────────────────────────

/// Produces successive decision ticks, skipping quiet hours.
#[derive(Debug)]
pub struct Chronometer {
    clock: SimClock,
    skip:  SkipRule,
}

impl Chronometer {
    /// A chronometer positioned at Monday 00:00 of day 0.
    ///
    /// Fails with [`CoreError::Config`] if `skip` rejects every hour of the
    /// week, which would make [`advance`][Self::advance] spin forever.
    pub fn new(skip: SkipRule) -> CoreResult<Self> {
        Self::starting_at(SimClock::START, skip)
    }

    pub fn starting_at(clock: SimClock, skip: SkipRule) -> CoreResult<Self> {
        let probe_active = (0..HOURS_PER_WEEK)
            .any(|h| !skip.skips_hour((h % 24) as u32, (h / 24) as u32));
        if !probe_active {
            return Err(CoreError::Config(
                "skip rule rejects every hour of the week; the chronometer would never yield a tick"
                    .into(),
            ));
        }
        Ok(Self { clock, skip })
    }

    /// The current clock position (the last tick returned by `advance`).
    #[inline]
    pub fn clock(&self) -> SimClock {
        self.clock
    }

    /// Step forward by `step_minutes`, then fast-forward through skipped
    /// hours, and return the tick the clock lands on.
    ///
    /// `step_minutes` must be positive and divide a day evenly.
    pub fn advance(&mut self, step_minutes: u32) -> CoreResult<SimClock> {
        validate_step(step_minutes)?;
        self.clock.add_minutes(step_minutes);

        let mut jumps = 0;
        while self.skip.skips(&self.clock) {
            if jumps > HOURS_PER_WEEK {
                return Err(CoreError::Config(format!(
                    "skip rule rejected a full week of hours after {}",
                    self.clock
                )));
            }
            self.clock.next_hour();
            jumps += 1;
        }
        Ok(self.clock)
    }

    /// Number of ticks a full day on `day_of_week` yields with this step
    /// width, counting from an aligned midnight start.
    pub fn active_ticks_per_day(&self, step_minutes: u32, day_of_week: u32) -> CoreResult<usize> {
        validate_step(step_minutes)?;
        let count = (0..MINUTES_PER_DAY as u32)
            .step_by(step_minutes as usize)
            .filter(|m| !self.skip.skips_hour(m / 60, day_of_week))
            .count();
        Ok(count)
    }
}

/// Step widths must be positive and divide a 1,440-minute day.
pub(crate) fn validate_step(step_minutes: u32) -> CoreResult<()> {
    if step_minutes == 0 || MINUTES_PER_DAY as u32 % step_minutes != 0 {
        return Err(CoreError::Config(format!(
            "step width {step_minutes} min must be positive and divide 1440"
        )));
    }
    Ok(())
}
