//! Plain data row types written by output backends.

use nudge_core::Outcome;
use nudge_sim::{TraceEntry, TraceSummary};

/// One tick of the trace, flattened for tabular output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceRow {
    pub days_elapsed:       u64,
    pub hour:               u32,
    pub minute:             u32,
    pub day_of_week:        u32,
    /// `None` before the first send; written as an empty field.
    pub minutes_since_last: Option<i64>,
    pub prob_accept:        f64,
    pub prob_ignore:        f64,
    pub decision:           bool,
    /// `None` when nothing was sent; written as an empty field.
    pub outcome:            Option<Outcome>,
    pub reward:             i32,
}

impl From<&TraceEntry> for TraceRow {
    fn from(e: &TraceEntry) -> Self {
        Self {
            days_elapsed:       e.days_elapsed,
            hour:               e.hour,
            minute:             e.minute,
            day_of_week:        e.day_of_week,
            minutes_since_last: e.minutes_since_last,
            prob_accept:        e.prob_accept,
            prob_ignore:        e.prob_ignore,
            decision:           e.decision,
            outcome:            e.outcome,
            reward:             e.reward,
        }
    }
}

/// Totals for a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SummaryRow {
    pub ticks:        u64,
    pub sends:        u64,
    pub accepts:      u64,
    pub ignores:      u64,
    pub total_reward: i64,
}

impl From<&TraceSummary> for SummaryRow {
    fn from(s: &TraceSummary) -> Self {
        Self {
            ticks:        s.ticks as u64,
            sends:        s.sends as u64,
            accepts:      s.accepts as u64,
            ignores:      s.ignores as u64,
            total_reward: s.total_reward,
        }
    }
}
