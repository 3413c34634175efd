//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `trace.csv`
//! - `summary.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{OutputResult, SummaryRow, TraceRow};
use crate::writer::OutputWriter;

pub const TRACE_HEADER: [&str; 10] = [
    "days_elapsed", "hour", "minute", "day_of_week", "minutes_since_last",
    "prob_accept", "prob_ignore", "decision", "outcome", "reward",
];

pub const SUMMARY_HEADER: [&str; 5] = ["ticks", "sends", "accepts", "ignores", "total_reward"];

/// Writes the trace and its summary to two CSV files.
pub struct CsvWriter {
    trace:    Writer<File>,
    summary:  Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create (or truncate) the two CSV files in `dir` and write the header
    /// rows.  `dir` must already exist.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut trace = Writer::from_path(dir.join("trace.csv"))?;
        trace.write_record(TRACE_HEADER)?;

        let mut summary = Writer::from_path(dir.join("summary.csv"))?;
        summary.write_record(SUMMARY_HEADER)?;

        Ok(Self { trace, summary, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_entries(&mut self, rows: &[TraceRow]) -> OutputResult<()> {
        for row in rows {
            self.trace.write_record(&[
                row.days_elapsed.to_string(),
                row.hour.to_string(),
                row.minute.to_string(),
                row.day_of_week.to_string(),
                row.minutes_since_last.map(|m| m.to_string()).unwrap_or_default(),
                row.prob_accept.to_string(),
                row.prob_ignore.to_string(),
                (row.decision as u8).to_string(),
                row.outcome.map(|o| o.as_str().to_owned()).unwrap_or_default(),
                row.reward.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        self.summary.write_record(&[
            row.ticks.to_string(),
            row.sends.to_string(),
            row.accepts.to_string(),
            row.ignores.to_string(),
            row.total_reward.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.trace.flush()?;
        self.summary.flush()?;
        Ok(())
    }
}
