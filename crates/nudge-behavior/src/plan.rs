//! `StatePlan`: one fixed "will accept?" flag per state key.

use nudge_core::{SimRng, StateKey};

/// Per-state accept/ignore plan drawn once at construction.
///
/// Flags are drawn in [`StateKey::all`] order, one `gen_bool(p_accept)` per
/// key, so the same RNG state always yields the same plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatePlan {
    pub(crate) accepts: [bool; StateKey::COUNT],
}

impl StatePlan {
    pub fn draw(p_accept: f64, rng: &mut SimRng) -> Self {
        let mut accepts = [false; StateKey::COUNT];
        for key in StateKey::all() {
            accepts[key.index()] = rng.gen_bool(p_accept);
        }
        Self { accepts }
    }

    #[inline]
    pub fn will_accept(&self, key: StateKey) -> bool {
        self.accepts[key.index()]
    }

    /// How many states are planned as "accept".
    pub fn accepting_states(&self) -> usize {
        self.accepts.iter().filter(|a| **a).count()
    }
}
