//! `sw-output` — simulation output writers for stormwall.
//!
//! | Backend | Files created                                                        |
//! |---------|----------------------------------------------------------------------|
//! | CSV     | `stability_changes.csv`, `damage_events.csv`, `tick_summaries.csv`   |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `sw_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sw_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut runtime = StormRuntime::new(sim, roster, SimOutputObserver::new(writer));
//! runtime.start()?;
//! runtime.advance(60.0);
//! runtime.shutdown();
//! if let Some(e) = runtime.observer_mut().take_error() {
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
pub use observer::SimOutputObserver;
pub use row::{DamageRow, StabilityChangeRow, TickSummaryRow};
pub use writer::OutputWriter;
