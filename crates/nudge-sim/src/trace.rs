//! The simulation trace: one immutable entry per tick.

use nudge_core::{Outcome, StateKey};

/// Everything that happened at one tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceEntry {
    pub days_elapsed: u64,
    pub hour:         u32,
    pub minute:       u32,
    /// 0 = Monday … 6 = Sunday.
    pub day_of_week:  u32,
    /// Minutes since the last sent notification; `None` before the first.
    pub minutes_since_last: Option<i64>,
    /// The state the agent was shown.
    pub state:        StateKey,
    /// Normalized response probabilities used for this tick.
    pub prob_accept:  f64,
    pub prob_ignore:  f64,
    /// Whether the agent sent a notification.
    pub decision:     bool,
    /// Drawn response; `None` when nothing was sent.
    pub outcome:      Option<Outcome>,
    pub reward:       i32,
}

/// Aggregate counts over a trace.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TraceSummary {
    pub ticks:        usize,
    pub sends:        usize,
    pub accepts:      usize,
    pub ignores:      usize,
    pub total_reward: i64,
}

impl TraceSummary {
    pub fn from_entries(entries: &[TraceEntry]) -> Self {
        let mut s = TraceSummary::default();
        for e in entries {
            s.add(e);
        }
        s
    }

    /// Fold one more entry into the counts.
    pub fn add(&mut self, e: &TraceEntry) {
        self.ticks += 1;
        self.total_reward += e.reward as i64;
        if e.decision {
            self.sends += 1;
        }
        match e.outcome {
            Some(Outcome::Accept) => self.accepts += 1,
            Some(Outcome::Ignore) => self.ignores += 1,
            None => {}
        }
    }

    /// Fraction of sent notifications that were accepted; 0 if none sent.
    pub fn accept_rate(&self) -> f64 {
        if self.sends == 0 {
            0.0
        } else {
            self.accepts as f64 / self.sends as f64
        }
    }
}
