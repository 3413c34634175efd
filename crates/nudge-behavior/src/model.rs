//! The `ResponseModel` trait: the pluggable "human" of the simulation.

use nudge_core::{ResponseDistribution, SimRng};

use crate::{BehaviorResult, ResponseQuery};

/// Pluggable human response behavior.
///
/// Implement this trait to define how the simulated human reacts to a
/// notification in a given context.  The simulation holds exactly one model
/// for the whole run and calls it once per tick, whether or not the agent
/// then decides to send.
///
/// # Contract
///
/// - Both weights of the returned distribution are `>= 0`.  They need not sum
///   to one; the caller normalizes.
/// - Weights of `(0, 0)` are allowed to be returned but make the tick fail
///   with a distribution error when normalized.
/// - All randomness must come from `rng` so runs stay reproducible.
///
/// # Example
///
/// ```rust,ignore
/// struct MorningPerson;
///
/// impl ResponseModel for MorningPerson {
///     fn response_distribution(
///         &self,
///         query: &ResponseQuery,
///         _rng:  &mut SimRng,
///     ) -> BehaviorResult<ResponseDistribution> {
///         Ok(if query.hour < 12 {
///             ResponseDistribution::new(0.9, 0.1)
///         } else {
///             ResponseDistribution::new(0.2, 0.8)
///         })
///     }
/// }
/// ```
pub trait ResponseModel: Send + Sync + 'static {
    /// Weights for `{accept, ignore}` in the context described by `query`.
    fn response_distribution(
        &self,
        query: &ResponseQuery,
        rng:   &mut SimRng,
    ) -> BehaviorResult<ResponseDistribution>;

    /// Short label used in logs.
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<M: ResponseModel + ?Sized> ResponseModel for Box<M> {
    fn response_distribution(
        &self,
        query: &ResponseQuery,
        rng:   &mut SimRng,
    ) -> BehaviorResult<ResponseDistribution> {
        (**self).response_distribution(query, rng)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
