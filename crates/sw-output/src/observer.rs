//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use tracing::warn;

use sw_agent::{DamageCause, Stability};
use sw_core::{AgentId, Tick};
use sw_sim::{SimObserver, TickReport};

use crate::row::{DamageRow, StabilityChangeRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that buffers one tick of events and writes them, with
/// the tick's summary, when the tick ends.
///
/// Observer hooks cannot fail, so the first writer error is stored and
/// later ones are dropped.  Check [`take_error`][Self::take_error] after
/// shutdown.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    changes:    Vec<StabilityChangeRow>,
    damage:     Vec<DamageRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            changes:    Vec::new(),
            damage:     Vec::new(),
            last_error: None,
        }
    }

    /// Take the stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed; further errors are dropped");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_stability_changed(&mut self, tick: Tick, agent: AgentId, old: Stability, new: Stability, intensity: f64) {
        self.changes.push(StabilityChangeRow {
            tick: tick.0,
            agent_id: agent.raw(),
            old: old.get(),
            new: new.get(),
            intensity,
        });
    }

    fn on_damage(&mut self, tick: Tick, agent: AgentId, amount: f64, cause: DamageCause) {
        self.damage.push(DamageRow {
            tick: tick.0,
            agent_id: agent.raw(),
            amount,
            cause: cause.to_string(),
        });
    }

    fn on_tick_end(&mut self, tick: Tick, report: &TickReport) {
        if !self.changes.is_empty() {
            let rows = std::mem::take(&mut self.changes);
            let result = self.writer.write_stability_changes(&rows);
            self.store_err(result);
        }
        if !self.damage.is_empty() {
            let rows = std::mem::take(&mut self.damage);
            let result = self.writer.write_damage(&rows);
            self.store_err(result);
        }
        let row = TickSummaryRow {
            tick:      tick.0,
            evaluated: report.evaluated as u64,
            skipped:   report.skipped as u64,
            drained:   report.drained as u64,
            damaged:   report.damaged as u64,
            punished:  report.punished as u64,
            faults:    report.faults as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_shutdown(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
