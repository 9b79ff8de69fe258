//! Simulation observer trait for progress reporting and data collection.

use sw_agent::{DamageCause, Stability};
use sw_core::{AgentId, Tick};

/// Per-tick counters, passed to [`SimObserver::on_tick_end`] and returned
/// by [`Simulator::tick`][crate::Simulator::tick].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Eligible agents that went through the evaluate phase.
    pub evaluated: usize,
    /// Agents skipped as ineligible.
    pub skipped:   usize,
    /// Agents whose stability changed and was written back.
    pub drained:   usize,
    /// Agents that took mobile-hazard damage.
    pub damaged:   usize,
    /// Agents that had at least one low-stability consequence applied.
    pub punished:  usize,
    /// Write-backs the world rejected (agent left mid-tick).
    pub faults:    usize,
}

/// Callbacks invoked by [`Simulator::tick`][crate::Simulator::tick] and the
/// runtime.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait SimObserver {
    /// Called at the very start of each tick, before the config snapshot.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after a changed stability value was accepted by the world.
    fn on_stability_changed(
        &mut self,
        _tick:      Tick,
        _agent:     AgentId,
        _old:       Stability,
        _new:       Stability,
        _intensity: f64,
    ) {
    }

    /// Called after damage was accepted by the world.
    fn on_damage(&mut self, _tick: Tick, _agent: AgentId, _amount: f64, _cause: DamageCause) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _tick: Tick, _report: &TickReport) {}

    /// Called once when the runtime shuts down.
    fn on_shutdown(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
