//! The `OutputWriter` trait implemented by backend writers.

use crate::{DamageRow, OutputResult, StabilityChangeRow, TickSummaryRow};

/// A sink for simulation rows.
///
/// Errors surface to the observer, which keeps the first one for
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    fn write_stability_changes(&mut self, rows: &[StabilityChangeRow]) -> OutputResult<()>;

    fn write_damage(&mut self, rows: &[DamageRow]) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush all underlying file handles.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
