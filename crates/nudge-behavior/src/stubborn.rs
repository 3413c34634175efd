//! Stubborn humans: a fixed accept/ignore plan per state.

use nudge_core::{ResponseDistribution, SimRng};

use crate::{BehaviorError, BehaviorResult, ResponseModel, ResponseQuery, StatePlan};

/// Probability a state is planned as "accept" for [`Stubborn`].
pub const STUBBORN_ACCEPT_PROBABILITY: f64 = 0.3;

/// Probability a state is planned as "accept" for [`LessStubborn`].
pub const LESS_STUBBORN_ACCEPT_PROBABILITY: f64 = 0.5;

/// Default plan-deviation probability for [`LessStubborn`].
pub const DEFAULT_DEVIATION_PROBABILITY: f64 = 0.1;

// ── Stubborn ──────────────────────────────────────────────────────────────────

/// Distinguishes states sharply: in each state it either always accepts or
/// always ignores, decided once at construction.
#[derive(Clone, Debug)]
pub struct Stubborn {
    plan: StatePlan,
}

impl Stubborn {
    /// Draw a plan where each state accepts with probability 0.3.
    pub fn new(rng: &mut SimRng) -> Self {
        Self::from_plan(StatePlan::draw(STUBBORN_ACCEPT_PROBABILITY, rng))
    }

    pub fn from_plan(plan: StatePlan) -> Self {
        Self { plan }
    }

    pub fn plan(&self) -> &StatePlan {
        &self.plan
    }
}

impl ResponseModel for Stubborn {
    fn response_distribution(
        &self,
        query: &ResponseQuery,
        _rng:  &mut SimRng,
    ) -> BehaviorResult<ResponseDistribution> {
        Ok(if self.plan.will_accept(query.state_key()?) {
            ResponseDistribution::ALWAYS_ACCEPT
        } else {
            ResponseDistribution::ALWAYS_IGNORE
        })
    }

    fn name(&self) -> &'static str {
        "stubborn"
    }
}

// ── LessStubborn ──────────────────────────────────────────────────────────────

/// Like [`Stubborn`] but follows its plan only with probability
/// `1 - deviation_probability`, whichever way the plan points.
#[derive(Clone, Debug)]
pub struct LessStubborn {
    plan:      StatePlan,
    deviation: f64,
}

impl LessStubborn {
    /// Draw a plan where each state accepts with probability 0.5.
    ///
    /// Fails with [`BehaviorError::Config`] if `deviation_probability` is
    /// outside `[0, 1]`.
    pub fn new(deviation_probability: f64, rng: &mut SimRng) -> BehaviorResult<Self> {
        Self::validate(deviation_probability)?;
        let plan = StatePlan::draw(LESS_STUBBORN_ACCEPT_PROBABILITY, rng);
        Ok(Self { plan, deviation: deviation_probability })
    }

    pub fn from_plan(plan: StatePlan, deviation_probability: f64) -> BehaviorResult<Self> {
        Self::validate(deviation_probability)?;
        Ok(Self { plan, deviation: deviation_probability })
    }

    pub fn plan(&self) -> &StatePlan {
        &self.plan
    }

    pub fn deviation_probability(&self) -> f64 {
        self.deviation
    }

    fn validate(p: f64) -> BehaviorResult<()> {
        if !(0.0..=1.0).contains(&p) {
            return Err(BehaviorError::Config(format!(
                "deviation probability {p} outside [0, 1]"
            )));
        }
        Ok(())
    }
}

impl ResponseModel for LessStubborn {
    fn response_distribution(
        &self,
        query: &ResponseQuery,
        _rng:  &mut SimRng,
    ) -> BehaviorResult<ResponseDistribution> {
        let follow = 1.0 - self.deviation;
        Ok(if self.plan.will_accept(query.state_key()?) {
            ResponseDistribution::new(follow, self.deviation)
        } else {
            ResponseDistribution::new(self.deviation, follow)
        })
    }

    fn name(&self) -> &'static str {
        "less-stubborn"
    }
}
