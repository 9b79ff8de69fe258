//! `LowStabilityPolicy` — what low stability does to an agent.
//!
//! The simulator only computes stability.  Whether a low value costs
//! health, food, or nothing at all is decided here, so the rule can be
//! swapped or tested without touching the evaluator.

use sw_agent::{Stability, TrackedAgent};
use sw_field::PunishmentConfig;

/// An effect the simulator routes to the world's [`StatusSink`][sw_agent::StatusSink].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Consequence {
    /// Health damage, applied with cause `DamageCause::LowStability`.
    Damage(f64),
    /// Food saturation drained.
    Saturation(f64),
}

/// Decides the consequences of an agent's post-drain stability for one
/// tick of `delta_secs`.
///
/// # Contract
///
/// - Must be pure: the evaluate phase may call it from several threads.
/// - Amounts are absolute for this tick (already scaled by `delta_secs`).
pub trait LowStabilityPolicy: Send + Sync {
    fn consequences(
        &self,
        agent:      &TrackedAgent,
        stability:  Stability,
        delta_secs: f64,
        config:     &PunishmentConfig,
    ) -> Vec<Consequence>;
}

/// No consequences, ever.
pub struct NoPunishment;

impl LowStabilityPolicy for NoPunishment {
    #[inline]
    fn consequences(&self, _: &TrackedAgent, _: Stability, _: f64, _: &PunishmentConfig) -> Vec<Consequence> {
        Vec::new()
    }
}

/// At or below the configured threshold, drain saturation and deal damage
/// at their per-second rates.  Zero amounts are left out.
#[derive(Clone, Copy, Debug, Default)]
pub struct DamageAndHunger;

impl LowStabilityPolicy for DamageAndHunger {
    fn consequences(
        &self,
        _agent:     &TrackedAgent,
        stability:  Stability,
        delta_secs: f64,
        config:     &PunishmentConfig,
    ) -> Vec<Consequence> {
        if stability.get() > config.threshold {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(2);
        let saturation = config.saturation_cost_per_second * delta_secs;
        if saturation > 0.0 {
            out.push(Consequence::Saturation(saturation));
        }
        let damage = config.damage_per_second * delta_secs;
        if damage > 0.0 {
            out.push(Consequence::Damage(damage));
        }
        out
    }
}
