//! `nudge-behavior`: models of how a human responds to a notification.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                    |
//! |-------------------|-------------------------------------------------------------|
//! | [`query`]         | `ResponseQuery`: the context a model is asked about        |
//! | [`model`]         | `ResponseModel` trait                                       |
//! | [`always_accept`] | `AlwaysAccept`: accepts every notification                 |
//! | [`plan`]          | `StatePlan`: one fixed accept/ignore flag per state        |
//! | [`stubborn`]      | `Stubborn`, `LessStubborn`                                  |
//! | [`history`]       | `HistoryWeighted`: recency-weighted sampling of records    |
//! | [`error`]         | `BehaviorError`, `BehaviorResult<T>`                        |
//!
//! # Design notes
//!
//! A model answers one question: given the hour, minute, weekday and minutes
//! since the last notification, how likely is the human to accept or ignore?
//! The answer is a [`ResponseDistribution`][nudge_core::ResponseDistribution]
//! of non-negative weights; the tick loop normalizes it and draws the actual
//! outcome.
//!
//! All randomness comes from the caller's [`SimRng`][nudge_core::SimRng]:
//! stubborn plans draw from it at construction, the history-weighted model
//! draws from it on every query.  Nothing here touches a global generator.

pub mod always_accept;
pub mod error;
pub mod history;
pub mod model;
pub mod plan;
pub mod query;
pub mod stubborn;


pub use always_accept::AlwaysAccept;
pub use error::{BehaviorError, BehaviorResult};
pub use history::HistoryWeighted;
pub use model::ResponseModel;
pub use plan::StatePlan;
pub use query::ResponseQuery;
pub use stubborn::{LessStubborn, Stubborn};
