//! Simulation observer trait for progress reporting and data collection.

use nudge_core::SimClock;

use crate::TraceEntry;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] as the trace grows.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct DailyProgress;
///
/// impl SimObserver for DailyProgress {
///     fn on_tick(&mut self, entry: &TraceEntry) {
///         if entry.hour == 8 && entry.minute == 0 {
///             println!("day {}", entry.days_elapsed);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called after each entry is appended to the trace.
    fn on_tick(&mut self, _entry: &TraceEntry) {}

    /// Called once when the run reaches its end day.
    ///
    /// `final_clock` is the first position past the end (never traced);
    /// `ticks` is the trace length.
    fn on_sim_end(&mut self, _final_clock: SimClock, _ticks: usize) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
