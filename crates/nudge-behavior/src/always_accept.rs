//! A model that accepts every notification.

use nudge_core::{ResponseDistribution, SimRng};

use crate::{BehaviorResult, ResponseModel, ResponseQuery};

/// A [`ResponseModel`] that always returns `(1.0, 0.0)`.
///
/// Useful as a baseline and in tests: with it, every sent notification
/// earns the accept reward.
#[derive(Copy, Clone, Debug, Default)]
pub struct AlwaysAccept;

impl ResponseModel for AlwaysAccept {
    fn response_distribution(
        &self,
        _query: &ResponseQuery,
        _rng:   &mut SimRng,
    ) -> BehaviorResult<ResponseDistribution> {
        Ok(ResponseDistribution::ALWAYS_ACCEPT)
    }

    fn name(&self) -> &'static str {
        "always-accept"
    }
}
