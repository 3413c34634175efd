//! `nudge-sim`: tick loop controller for the rust_nudge simulator.
//!
//! # Tick loop
//!
//! ```text
//! loop:
//!   ① Advance : chronometer steps by `step_width_minutes`, skipping quiet
//!                hours; stop once days_elapsed >= simulation_weeks * 7.
//!   ② Recency : minutes since the last *sent* notification (never → Long).
//!   ③ Model   : ResponseModel::response_distribution, then normalize.
//!   ④ Agent   : NotificationAgent::get_action(time, day, recency).
//!   ⑤ Outcome : if sent: draw accept/ignore, reward from RewardTable,
//!                remember the send time.  Otherwise reward = no_send.
//!   ⑥ Feedback: NotificationAgent::feed_reward(reward).
//!   ⑦ Trace   : append one TraceEntry; notify the observer.
//! ```
//!
//! The loop is single-threaded and synchronous.  Any error aborts the run
//! immediately; entries appended before the failure stay readable through
//! [`Sim::trace`].
//!
//! # Cargo features
//!
//! | Feature | Effect                                                   |
//! |---------|----------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on `TraceEntry` and state types.|
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use nudge_behavior::Stubborn;
//! use nudge_core::{SimConfig, SimRng};
//! use nudge_sim::{AlwaysSend, NoopObserver, SimBuilder};
//!
//! let config = SimConfig::default();
//! let mut rng = SimRng::new(config.seed);
//! let model = Stubborn::new(&mut rng);
//! let mut sim = SimBuilder::new(config, model, AlwaysSend).rng(rng).build()?;
//! let trace = sim.run(&mut NoopObserver)?;
//! ```

pub mod agent;
pub mod builder;
pub mod error;
pub mod history;
pub mod observer;
pub mod sim;
pub mod trace;

#[cfg(test)]
mod tests;

pub use agent::{AlwaysSend, NeverSend, NotificationAgent};
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use history::{NotificationHistory, NEVER_SENT_MINUTES};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use trace::{TraceEntry, TraceSummary};
