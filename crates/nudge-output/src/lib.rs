//! `nudge-output`: trace writers for the rust_nudge simulator.
//!
//! | Backend | Files created                 |
//! |---------|-------------------------------|
//! | CSV     | `trace.csv`, `summary.csv`    |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`TraceOutputObserver`], which implements `nudge_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use nudge_output::{CsvWriter, TraceOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = TraceOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceOutputObserver;
pub use row::{SummaryRow, TraceRow};
pub use writer::OutputWriter;
