//! Resistance curves: what fraction of drain an agent ignores.
//!
//! A curve answers `None` when the data it needs is missing; the simulator
//! then uses a modifier of 0 rather than skipping the agent.

use crate::AgentTraits;

/// Maps agent traits to a resistance modifier in `[0, 1]`.
pub trait ResistanceCurve: Send + Sync {
    fn modifier(&self, traits: &AgentTraits) -> Option<f64>;
}

/// Nobody resists.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoResistance;

impl ResistanceCurve for NoResistance {
    fn modifier(&self, _traits: &AgentTraits) -> Option<f64> {
        None
    }
}

/// Every agent resists the same fraction.
#[derive(Copy, Clone, Debug)]
pub struct FixedResistance(pub f64);

impl ResistanceCurve for FixedResistance {
    fn modifier(&self, _traits: &AgentTraits) -> Option<f64> {
        clamp_unit(self.0)
    }
}

/// Resistance that grows linearly with survival time.
///
/// `max_protection * age_days / days_to_max`, clamped to `[0, 1]`.  The
/// slope is `max_protection` per `days_to_max` days and keeps climbing past
/// `days_to_max` until the agent ignores drain entirely.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AgeResistance {
    pub max_protection: f64,
    pub days_to_max:    f64,
}

impl Default for AgeResistance {
    fn default() -> Self {
        Self { max_protection: 0.3, days_to_max: 30.0 }
    }
}

impl ResistanceCurve for AgeResistance {
    fn modifier(&self, traits: &AgentTraits) -> Option<f64> {
        let age = traits.age_days?;
        if self.days_to_max.is_nan() || self.days_to_max <= 0.0 {
            return clamp_unit(self.max_protection);
        }
        clamp_unit(self.max_protection * age / self.days_to_max)
    }
}

#[inline]
fn clamp_unit(v: f64) -> Option<f64> {
    if v.is_nan() { None } else { Some(v.clamp(0.0, 1.0)) }
}
