//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! A run owns exactly one `SimRng`.  The same generator is threaded through
//! behavior-model construction (stubborn plans are drawn from it) and then
//! handed to the tick loop (history sampling and outcome draws), so
//!
//! - the same seed always reproduces the same trace, and
//! - parallel unit tests never share hidden global random state.
//!
//! Components that need an independent stream (e.g. a learning agent) derive
//! one with [`SimRng::child`] instead of seeding ad hoc.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Simulation-level RNG.  Single-threaded by construction: pass it around as
/// `&mut SimRng`.
#[derive(Debug, Clone)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset, e.g. to give an
    /// agent its own stream that does not perturb the environment's draws.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types
    /// (`WeightedIndex::sample(rng.inner())`, …).
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
