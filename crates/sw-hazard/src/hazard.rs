//! The `MobileHazard` record and its configured defaults.

use serde::{Deserialize, Serialize};

use sw_core::{HazardId, Position3D};

use crate::proximity::localized_damage;

/// Damage shape given to newly spawned hazards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardDefaults {
    /// Radius (world units) inside which a hazard hurts.
    pub damage_radius: f64,
    /// Damage per second at the hazard center.
    pub damage_per_second: f64,
}

impl Default for HazardDefaults {
    fn default() -> Self {
        Self {
            damage_radius:     4.0,
            damage_per_second: 3.0,
        }
    }
}

/// A transient, moving hazard zone.
///
/// `size` doubles as the activity flag: a hazard with `size <= 0` is still
/// tracked by its lifecycle manager but is dormant and never selected by
/// [`nearest`][crate::nearest].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MobileHazard {
    pub id:                HazardId,
    pub position:          Position3D,
    pub size:              f64,
    pub damage_radius:     f64,
    pub damage_per_second: f64,
}

impl MobileHazard {
    /// Build a hazard with the configured damage shape.
    pub fn new(id: HazardId, position: Position3D, size: f64, defaults: &HazardDefaults) -> Self {
        Self {
            id,
            position,
            size,
            damage_radius:     defaults.damage_radius,
            damage_per_second: defaults.damage_per_second,
        }
    }

    /// `true` if the hazard has positive size.  NaN sizes count as inactive.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.size > 0.0
    }

    /// Per-second damage this hazard deals at `position`.
    #[inline]
    pub fn damage_at(&self, position: Position3D) -> f64 {
        localized_damage(position, self, self.damage_per_second)
    }
}
