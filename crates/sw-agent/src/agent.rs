//! Per-agent snapshot types.

use std::fmt;

use sw_core::{AgentId, HazardId, Position3D};

use crate::Stability;

/// Optional per-agent data consumed by resistance curves.  Any field may be
/// missing; a curve that needs it then reports no modifier.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentTraits {
    /// In-world days this agent has survived.
    pub age_days: Option<f64>,
}

impl AgentTraits {
    pub fn with_age(days: f64) -> Self {
        Self { age_days: Some(days) }
    }
}

/// One agent as seen by the simulator for one tick.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackedAgent {
    pub id:        AgentId,
    pub position:  Position3D,
    pub stability: Stability,
    /// Agents outside the affected mode (e.g. non-survival) are skipped.
    pub eligible:  bool,
    pub traits:    AgentTraits,
}

impl TrackedAgent {
    pub fn new(id: AgentId, position: Position3D) -> Self {
        Self {
            id,
            position,
            stability: Stability::FULL,
            eligible:  true,
            traits:    AgentTraits::default(),
        }
    }
}

/// Why damage was applied.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageCause {
    /// Inside a mobile hazard's damage radius.
    Hazard(HazardId),
    /// Low-stability punishment.
    LowStability,
    /// The price of restoring stability with a gear.
    GearUse,
}

impl fmt::Display for DamageCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DamageCause::Hazard(id) => write!(f, "hazard:{}", id.raw()),
            DamageCause::LowStability => f.write_str("low_stability"),
            DamageCause::GearUse => f.write_str("gear_use"),
        }
    }
}
