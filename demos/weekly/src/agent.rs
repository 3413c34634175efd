//! Epsilon-greedy tabular agent: one running mean reward per (state, action).

use anyhow::{bail, Result};

use nudge_core::{DayState, RecencyState, SimRng, StateKey, TimeState};
use nudge_sim::NotificationAgent;

const SEND:    usize = 1;
const NO_SEND: usize = 0;

pub struct EpsilonGreedy {
    epsilon: f64,
    values:  Vec<[f64; 2]>,
    counts:  Vec<[u32; 2]>,
    pending: Option<(usize, usize)>,
    rng:     SimRng,
}

/// Exploration rates must be finite and within `[0, 1]`.
pub fn check_epsilon(epsilon: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&epsilon) {
        bail!("epsilon {epsilon} must be within [0, 1]");
    }
    Ok(epsilon)
}

impl EpsilonGreedy {
    pub fn new(epsilon: f64, rng: SimRng) -> Result<Self> {
        Ok(Self {
            epsilon: check_epsilon(epsilon)?,
            values:  vec![[0.0; 2]; StateKey::COUNT],
            counts:  vec![[0; 2]; StateKey::COUNT],
            pending: None,
            rng,
        })
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Greedy action per state, `true` = send.  Ties favour sending.
    pub fn policy(&self) -> impl Iterator<Item = (StateKey, bool)> + '_ {
        StateKey::all().map(|k| (k, self.greedy(k.index()) == SEND))
    }

    pub fn value(&self, key: StateKey, send: bool) -> f64 {
        self.values[key.index()][send as usize]
    }

    fn greedy(&self, state: usize) -> usize {
        let [no_send, send] = self.values[state];
        if send >= no_send { SEND } else { NO_SEND }
    }
}

impl NotificationAgent for EpsilonGreedy {
    fn get_action(&mut self, time: TimeState, day: DayState, recency: RecencyState) -> bool {
        let state = StateKey::new(time, day, recency).index();
        let action = if self.rng.gen_bool(self.epsilon) {
            self.rng.gen_range(0..2usize)
        } else {
            self.greedy(state)
        };
        self.pending = Some((state, action));
        action == SEND
    }

    fn feed_reward(&mut self, reward: i32) {
        let Some((state, action)) = self.pending.take() else {
            return;
        };
        let n = &mut self.counts[state][action];
        *n += 1;
        let v = &mut self.values[state][action];
        *v += (reward as f64 - *v) / *n as f64;
    }
}
