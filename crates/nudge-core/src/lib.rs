//! `nudge-core`: foundational types for the `rust_nudge` notification
//! simulator.
//!
//! This crate is a dependency of every other `nudge-*` crate.  It has no
//! `nudge-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`state`]       | `TimeState`, `DayState`, `RecencyState`, `StateKey`        |
//! | [`classify`]    | raw time/day/recency → state, `elapsed_minutes`, `normalize` |
//! | [`clock`]       | `SimClock`, `Chronometer`, `QuietHours`                    |
//! | [`rng`]         | `SimRng` (one seeded generator per run)                    |
//! | [`outcome`]     | `Outcome`, `ResponseDistribution`, `RewardTable`           |
//! | [`config`]      | `SimConfig`                                                |
//! | [`error`]       | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to config and state types.  |

pub mod classify;
pub mod clock;
pub mod config;
pub mod error;
pub mod outcome;
pub mod rng;
pub mod state;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use classify::{
    classify_day_of_week, classify_notification_recency, classify_state, classify_time_of_day,
    elapsed_minutes, normalize, MINUTES_PER_DAY, RECENT_THRESHOLD_MINUTES,
};
pub use clock::{Chronometer, QuietHours, SimClock, SkipRule};
pub use config::SimConfig;
pub use error::{CoreError, CoreResult};
pub use outcome::{Outcome, ResponseDistribution, RewardTable};
pub use rng::SimRng;
pub use state::{DayState, RecencyState, StateKey, TimeState};
