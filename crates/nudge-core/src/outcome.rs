//! Response outcomes, two-outcome distributions and the reward table.

use std::fmt;

use crate::{normalize, CoreResult, SimRng};

// ── Outcome ───────────────────────────────────────────────────────────────────

/// How the simulated human reacted to a notification.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Accept,
    Ignore,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Accept => "accept",
            Outcome::Ignore => "ignore",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ResponseDistribution ──────────────────────────────────────────────────────

/// Non-negative weights for `{accept, ignore}`.
///
/// Behavior models are free to return weights that do not sum to one (the
/// history-weighted fallback is `(0.1, 0.8)`); the tick loop calls
/// [`normalized`][Self::normalized] before sampling.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResponseDistribution {
    pub accept: f64,
    pub ignore: f64,
}

impl ResponseDistribution {
    pub const ALWAYS_ACCEPT: ResponseDistribution = ResponseDistribution { accept: 1.0, ignore: 0.0 };
    pub const ALWAYS_IGNORE: ResponseDistribution = ResponseDistribution { accept: 0.0, ignore: 1.0 };

    #[inline]
    pub const fn new(accept: f64, ignore: f64) -> Self {
        Self { accept, ignore }
    }

    /// Point mass on `outcome`.
    pub fn certain(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Accept => Self::ALWAYS_ACCEPT,
            Outcome::Ignore => Self::ALWAYS_IGNORE,
        }
    }

    /// Rescale so `accept + ignore == 1`.
    ///
    /// Fails with [`CoreError::Distribution`][crate::CoreError::Distribution]
    /// when both weights are zero.
    pub fn normalized(self) -> CoreResult<Self> {
        let [accept, ignore] = normalize([self.accept, self.ignore])?;
        Ok(Self { accept, ignore })
    }

    /// Draw one outcome.  Normalizes first, so unnormalized weights are fine.
    pub fn sample(self, rng: &mut SimRng) -> CoreResult<Outcome> {
        let p = self.normalized()?;
        Ok(if rng.gen_bool(p.accept) { Outcome::Accept } else { Outcome::Ignore })
    }
}

// ── RewardTable ───────────────────────────────────────────────────────────────

/// Reward fed back to the agent for each tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardTable {
    pub accept:  i32,
    pub ignore:  i32,
    pub no_send: i32,
}

impl Default for RewardTable {
    fn default() -> Self {
        Self { accept: 3, ignore: -1, no_send: 0 }
    }
}

impl RewardTable {
    /// `None` means no notification was sent this tick.
    #[inline]
    pub fn reward(&self, outcome: Option<Outcome>) -> i32 {
        match outcome {
            None                  => self.no_send,
            Some(Outcome::Accept) => self.accept,
            Some(Outcome::Ignore) => self.ignore,
        }
    }
}
