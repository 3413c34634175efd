//! Fluent builder for constructing a [`Sim`].

use nudge_behavior::ResponseModel;
use nudge_core::{Chronometer, SimClock, SimConfig, SimRng, SkipRule};

use crate::{NotificationAgent, NotificationHistory, Sim, SimResult};

/// Fluent builder for [`Sim<M, A>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: step width, weeks, quiet hours, seed, rewards, …
/// - `M: ResponseModel`: the simulated user
/// - `A: NotificationAgent`: the policy under test
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                                  |
/// |--------------------|------------------------------------------|
/// | `.rng(r)`          | `SimRng::new(config.seed)`               |
/// | `.skip_rule(s)`    | `config.quiet_hours.to_skip_rule()`      |
/// | `.start_at(c)`     | `SimClock::START` (day 0, 00:00, Monday) |
///
/// Models that drew random state at construction (the stubborn family)
/// should be built from the same `SimRng` that is then handed to `.rng(..)`,
/// so one seed governs the whole run.
///
/// # Example
///
/// ```rust,ignore
/// let mut rng = SimRng::new(config.seed);
/// let model = LessStubborn::new(config.deviation_probability, &mut rng)?;
/// let mut sim = SimBuilder::new(config, model, AlwaysSend)
///     .rng(rng)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<M: ResponseModel, A: NotificationAgent> {
    config: SimConfig,
    model:  M,
    agent:  A,
    rng:    Option<SimRng>,
    skip:   Option<SkipRule>,
    start:  Option<SimClock>,
}

impl<M: ResponseModel, A: NotificationAgent> SimBuilder<M, A> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, model: M, agent: A) -> Self {
        Self { config, model, agent, rng: None, skip: None, start: None }
    }

    /// Supply the run's random stream.
    pub fn rng(mut self, rng: SimRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Replace the quiet-hours window with an arbitrary skip predicate.
    pub fn skip_rule(mut self, skip: SkipRule) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Start the clock somewhere other than day 0 midnight.
    ///
    /// If `clock` is itself skipped, the first tick still fast-forwards out
    /// of the skipped hours.
    pub fn start_at(mut self, clock: SimClock) -> Self {
        self.start = Some(clock);
        self
    }

    /// Validate the config, build the chronometer, and return a ready-to-run
    /// [`Sim`].
    ///
    /// Fails with a config error for an invalid step, zero weeks, bad quiet
    /// hours, or a skip rule that skips the whole week.
    pub fn build(self) -> SimResult<Sim<M, A>> {
        self.config.validate()?;

        let skip = match self.skip {
            Some(s) => s,
            None    => self.config.quiet_hours.to_skip_rule(),
        };
        let chronometer = Chronometer::starting_at(self.start.unwrap_or(SimClock::START), skip)?;

        let history = if self.config.seed_history_at_origin {
            NotificationHistory::sent_at(SimClock::START)
        } else {
            NotificationHistory::never()
        };
        let rng = self.rng.unwrap_or_else(|| SimRng::new(self.config.seed));

        tracing::debug!(
            step = self.config.step_width_minutes,
            weeks = self.config.simulation_weeks,
            model = self.model.name(),
            "simulation built"
        );

        Ok(Sim::from_parts(self.config, chronometer, self.model, self.agent, rng, history))
    }
}
