//! CSV output backend.
//!
//! Creates three files in the output directory:
//! - `stability_changes.csv`
//! - `damage_events.csv`
//! - `tick_summaries.csv`

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{DamageRow, OutputResult, StabilityChangeRow, TickSummaryRow};

pub const STABILITY_FILE: &str = "stability_changes.csv";
pub const DAMAGE_FILE: &str = "damage_events.csv";
pub const SUMMARY_FILE: &str = "tick_summaries.csv";

pub struct CsvWriter {
    changes:   Writer<File>,
    damage:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the three files, and write header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut changes = Writer::from_path(dir.join(STABILITY_FILE))?;
        changes.write_record(["tick", "agent_id", "old", "new", "intensity"])?;

        let mut damage = Writer::from_path(dir.join(DAMAGE_FILE))?;
        damage.write_record(["tick", "agent_id", "amount", "cause"])?;

        let mut summaries = Writer::from_path(dir.join(SUMMARY_FILE))?;
        summaries.write_record(["tick", "evaluated", "skipped", "drained", "damaged", "punished", "faults"])?;

        Ok(Self { changes, damage, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_stability_changes(&mut self, rows: &[StabilityChangeRow]) -> OutputResult<()> {
        for row in rows {
            self.changes.write_record(&[
                row.tick.to_string(),
                row.agent_id.to_string(),
                row.old.to_string(),
                row.new.to_string(),
                row.intensity.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_damage(&mut self, rows: &[DamageRow]) -> OutputResult<()> {
        for row in rows {
            self.damage.write_record(&[
                row.tick.to_string(),
                row.agent_id.to_string(),
                row.amount.to_string(),
                row.cause.clone(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.evaluated.to_string(),
            row.skipped.to_string(),
            row.drained.to_string(),
            row.damaged.to_string(),
            row.punished.to_string(),
            row.faults.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.changes.flush()?;
        self.damage.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
