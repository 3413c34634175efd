//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, SummaryRow, TraceRow};

/// Destination for trace rows.
///
/// Errors surfacing while the sim runs are stored by the observer and
/// retrieved with [`TraceOutputObserver::take_error`][crate::TraceOutputObserver::take_error].
pub trait OutputWriter {
    /// Append a batch of trace rows, in tick order.
    fn write_entries(&mut self, rows: &[TraceRow]) -> OutputResult<()>;

    /// Record the end-of-run totals.
    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
