//! Top-level run configuration.

use crate::clock::validate_step;
use crate::{CoreError, CoreResult, QuietHours, RewardTable};

/// Configuration for one simulation run.
///
/// Typically built from [`Default`] and tweaked field by field, or loaded
/// from JSON by the application crate (enable the `serde` feature; missing
/// fields fall back to their defaults).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Minutes between decision ticks.  Must divide 1440.  Default: 10.
    pub step_width_minutes: u32,

    /// The run stops once `days_elapsed >= simulation_weeks * 7`.  Default: 10.
    pub simulation_weeks: u32,

    /// Hours that never produce a tick.  Default: 23:00 – 08:00.
    pub quiet_hours: QuietHours,

    /// Plan-deviation probability for the less-stubborn model.  Default: 0.1.
    pub deviation_probability: f64,

    /// Master RNG seed.  The same seed always produces an identical trace.
    pub seed: u64,

    /// Reward per outcome.  Default: accept +3, ignore −1, no send 0.
    pub rewards: RewardTable,

    /// Start the notification history at "sent at day 0 00:00" instead of
    /// "never sent".  Only useful to reproduce traces recorded with that
    /// warm-up convention.
    pub seed_history_at_origin: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            step_width_minutes:     10,
            simulation_weeks:       10,
            quiet_hours:            QuietHours::default(),
            deviation_probability:  0.1,
            seed:                   42,
            rewards:                RewardTable::default(),
            seed_history_at_origin: false,
        }
    }
}

impl SimConfig {
    /// The run is done once `days_elapsed` reaches this value.
    #[inline]
    pub fn end_day(&self) -> u64 {
        self.simulation_weeks as u64 * 7
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.simulation_weeks == 0 {
            return Err(CoreError::Config("simulation_weeks must be at least 1".into()));
        }
        validate_step(self.step_width_minutes)?;
        self.quiet_hours.validate()?;
        if !(0.0..=1.0).contains(&self.deviation_probability) {
            return Err(CoreError::Config(format!(
                "deviation_probability {} outside [0, 1]",
                self.deviation_probability
            )));
        }
        Ok(())
    }
}
