//! The decision-agent contract consumed by the tick loop.

use nudge_core::{DayState, RecencyState, TimeState};

/// A policy deciding whether to send a notification at each tick.
///
/// The loop calls [`get_action`][Self::get_action] exactly once per tick and
/// then [`feed_reward`][Self::feed_reward] exactly once with that tick's
/// reward, before moving on.  How the agent learns from the reward is its own
/// business.
pub trait NotificationAgent {
    /// `true` to send a notification now.
    fn get_action(&mut self, time: TimeState, day: DayState, recency: RecencyState) -> bool;

    /// Reward earned by the action just taken.
    fn feed_reward(&mut self, reward: i32);
}

impl<A: NotificationAgent + ?Sized> NotificationAgent for &mut A {
    fn get_action(&mut self, time: TimeState, day: DayState, recency: RecencyState) -> bool {
        (**self).get_action(time, day, recency)
    }

    fn feed_reward(&mut self, reward: i32) {
        (**self).feed_reward(reward)
    }
}

impl<A: NotificationAgent + ?Sized> NotificationAgent for Box<A> {
    fn get_action(&mut self, time: TimeState, day: DayState, recency: RecencyState) -> bool {
        (**self).get_action(time, day, recency)
    }

    fn feed_reward(&mut self, reward: i32) {
        (**self).feed_reward(reward)
    }
}

/// Sends at every tick and ignores rewards.
#[derive(Copy, Clone, Debug, Default)]
pub struct AlwaysSend;

impl NotificationAgent for AlwaysSend {
    fn get_action(&mut self, _: TimeState, _: DayState, _: RecencyState) -> bool {
        true
    }

    fn feed_reward(&mut self, _reward: i32) {}
}

/// Never sends.  Every tick earns the no-send reward.
#[derive(Copy, Clone, Debug, Default)]
pub struct NeverSend;

impl NotificationAgent for NeverSend {
    fn get_action(&mut self, _: TimeState, _: DayState, _: RecencyState) -> bool {
        false
    }

    fn feed_reward(&mut self, _reward: i32) {}
}
