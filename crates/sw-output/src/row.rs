//! Plain data rows written by output backends.

/// One agent's stability moving during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityChangeRow {
    pub tick:      u64,
    pub agent_id:  u64,
    pub old:       f64,
    pub new:       f64,
    /// Field intensity at the agent's position when the drain was computed.
    pub intensity: f64,
}

/// Damage applied to one agent.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageRow {
    pub tick:     u64,
    pub agent_id: u64,
    pub amount:   f64,
    /// `hazard:<id>` or `low_stability`.
    pub cause:    String,
}

/// Counters for one simulator tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:      u64,
    pub evaluated: u64,
    pub skipped:   u64,
    pub drained:   u64,
    pub damaged:   u64,
    pub punished:  u64,
    pub faults:    u64,
}
