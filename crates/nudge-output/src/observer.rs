//! `TraceOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use nudge_core::SimClock;
use nudge_sim::{SimObserver, TraceEntry, TraceSummary};

use crate::row::{SummaryRow, TraceRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that streams every trace entry to an [`OutputWriter`]
/// and writes the run totals when the sim ends.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].  A run that fails mid-way never reaches
/// `on_sim_end`; call [`finish`][Self::finish] yourself to flush what was
/// written.
pub struct TraceOutputObserver<W: OutputWriter> {
    writer:     W,
    summary:    TraceSummary,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> TraceOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, summary: TraceSummary::default(), last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Totals over the entries seen so far.
    pub fn summary(&self) -> &TraceSummary {
        &self.summary
    }

    /// Flush the writer without writing a summary row.
    pub fn finish(&mut self) -> OutputResult<()> {
        self.writer.finish()
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            tracing::warn!(error = %e, "trace output write failed");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for TraceOutputObserver<W> {
    fn on_tick(&mut self, entry: &TraceEntry) {
        self.summary.add(entry);
        let result = self.writer.write_entries(&[TraceRow::from(entry)]);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_clock: SimClock, _ticks: usize) {
        let result = self.writer.write_summary(&SummaryRow::from(&self.summary));
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
