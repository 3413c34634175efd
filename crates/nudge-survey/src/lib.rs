//! `nudge-survey`: historical behavior records and their per-state index.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`record`]  | `BehaviorRecord`: one observed response                     |
//! | [`table`]   | `BehaviorTable` (`StateKey` → records), `CoverageReport`     |
//! | [`loader`]  | survey-line and panel-CSV loaders                            |
//! | [`error`]   | `SurveyError`, `SurveyResult<T>`                             |
//!
//! # Bucketing
//!
//! Every record is filed under the [`StateKey`][nudge_core::StateKey] derived
//! from its own hour, weekday and "minutes since last notification".  The
//! table always holds a bucket for all 56 keys, even when no record lands in
//! it; empty buckets are reported through [`BehaviorTable::coverage`].

pub mod error;
pub mod loader;
pub mod record;
pub mod table;


pub use error::{SurveyError, SurveyResult};
pub use loader::{
    load_panel_csv, load_panel_csv_files, load_panel_reader, load_survey_lines,
    load_survey_reader,
};
pub use record::BehaviorRecord;
pub use table::{BehaviorTable, CoverageReport};
