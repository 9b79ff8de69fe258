//! Configuration types.
//!
//! `StormConfig` is the whole persisted document.  Every section carries
//! `#[serde(default)]`, so a document that names only the fields it changes
//! still loads.  Loaded values are never trusted as-is: [`StormConfig::validated`]
//! auto-corrects anything out of range and reports what it changed.  No
//! correction is fatal.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use sw_agent::SaturationRules;
use sw_core::Position3D;
use sw_hazard::{HazardDefaults, HazardIndexKind};

// ── FieldConfig ───────────────────────────────────────────────────────────────

/// Altitude handling for safe-zone checks.
///
/// The field itself is planar.  Checks that ask "is this position sheltered"
/// (ambient stability, climate, wind) additionally consult this gate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalGate {
    /// Altitude never matters.
    #[default]
    Ignore,
    /// Only positions with `y >= min` count as sheltered (e.g. sea level).
    MinAltitude(f64),
}

impl VerticalGate {
    /// `true` if `position` passes the gate.
    #[inline]
    pub fn admits(self, position: Position3D) -> bool {
        match self {
            VerticalGate::Ignore => true,
            VerticalGate::MinAltitude(min) => position.y >= min,
        }
    }
}

/// Banding configuration of the hazard field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Center of the safe zone.  `None` until the world reports one.
    pub reference_point: Option<Position3D>,
    /// Planar radius of the fully safe zone.
    pub inner_radius: f64,
    /// Planar radius beyond which intensity is 1.  Always `> inner_radius`
    /// after validation.
    pub outer_radius: f64,
    /// Stability drained per second at intensity 1.
    pub drain_rate_per_second: f64,
    /// Altitude rule for sheltered checks.
    pub vertical_gate: VerticalGate,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            reference_point:       None,
            inner_radius:          2_000.0,
            outer_radius:          3_000.0,
            drain_rate_per_second: 0.005,
            vertical_gate:         VerticalGate::Ignore,
        }
    }
}

impl FieldConfig {
    /// Return a corrected copy plus the list of corrections made.
    pub fn validated(mut self) -> (Self, Vec<ConfigWarning>) {
        let mut warnings = Vec::new();
        self.validate_into(&mut warnings);
        (self, warnings)
    }

    fn validate_into(&mut self, warnings: &mut Vec<ConfigWarning>) {
        if let Some(p) = self.reference_point {
            if !p.is_finite() {
                warn!(%p, "reference point is not finite; dropping it");
                warnings.push(ConfigWarning::DroppedReferencePoint { found: p });
                self.reference_point = None;
            }
        }

        if !self.inner_radius.is_finite() || self.inner_radius < 0.0 {
            self.inner_radius = correct(warnings, "field.inner_radius", self.inner_radius, 0.0);
        }

        // Also catches NaN / infinite outer radii.
        if !self.outer_radius.is_finite() || self.outer_radius <= self.inner_radius {
            self.outer_radius =
                correct(warnings, "field.outer_radius", self.outer_radius, self.inner_radius + 1.0);
        }

        if !self.drain_rate_per_second.is_finite() || self.drain_rate_per_second < 0.0 {
            self.drain_rate_per_second =
                correct(warnings, "field.drain_rate_per_second", self.drain_rate_per_second, 0.0);
        }

        if let VerticalGate::MinAltitude(min) = self.vertical_gate {
            if min.is_nan() {
                warn!("vertical gate altitude is NaN; ignoring altitude");
                warnings.push(ConfigWarning::Corrected {
                    field:     "field.vertical_gate",
                    found:     min,
                    corrected: f64::NEG_INFINITY,
                });
                self.vertical_gate = VerticalGate::Ignore;
            }
        }
    }
}

// ── Remaining sections ────────────────────────────────────────────────────────

/// What low stability costs an agent, per second spent at or below the
/// threshold.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PunishmentConfig {
    pub threshold:                  f64,
    pub damage_per_second:          f64,
    pub saturation_cost_per_second: f64,
}

impl Default for PunishmentConfig {
    fn default() -> Self {
        Self {
            threshold:                  0.0,
            damage_per_second:          0.0,
            saturation_cost_per_second: 10.0,
        }
    }
}

/// Environmental overrides applied outside the safe zone.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Ambient stability reported inside the safe zone.
    pub safe_zone_stability: f64,
    /// Minimum ambient stability at landmark positions.
    pub landmark_stability: f64,
    /// Rainfall forced on every storm position, in [0, 1].
    pub storm_rainfall: f64,
    /// Temperature ceiling in the storm, °C.
    pub storm_temperature_cap: f64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            safe_zone_stability:   1.5,
            landmark_stability:    1.0,
            storm_rainfall:        1.0,
            storm_temperature_cap: -3.0,
        }
    }
}

/// Age-based drain resistance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResistanceConfig {
    /// Fraction of drain ignored after `days_to_max` days, in [0, 1].  The
    /// curve keeps the same slope afterwards and caps at full immunity.
    pub max_protection: f64,
    /// Days an agent must survive to reach `max_protection`.
    pub days_to_max: f64,
}

impl Default for ResistanceConfig {
    fn default() -> Self {
        Self { max_protection: 0.3, days_to_max: 30.0 }
    }
}

/// Restoring stability with a gear.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GearConfig {
    /// Stability added per use, in [0, 1].  The result is clamped.
    pub stability_per_use: f64,
    /// Health damage charged per use.
    pub damage_per_use: f64,
}

impl Default for GearConfig {
    fn default() -> Self {
        Self { stability_per_use: 1.0, damage_per_use: 0.0 }
    }
}

/// Driver settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seconds between simulator ticks.
    pub tick_interval_secs: f64,
    /// Proximity index backend built each tick.
    pub hazard_index: HazardIndexKind,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { tick_interval_secs: 1.0, hazard_index: HazardIndexKind::Linear }
    }
}

// ── StormConfig ───────────────────────────────────────────────────────────────

/// The complete configuration document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StormConfig {
    pub field:       FieldConfig,
    pub hazard:      HazardDefaults,
    pub punishment:  PunishmentConfig,
    pub environment: EnvironmentConfig,
    pub resistance:  ResistanceConfig,
    pub gear:        GearConfig,
    pub saturation:  SaturationRules,
    pub simulation:  SimulationConfig,
}

impl StormConfig {
    /// Return a corrected copy plus the list of corrections made.  Each
    /// correction is also logged at `warn`.
    pub fn validated(mut self) -> (Self, Vec<ConfigWarning>) {
        let mut w = Vec::new();
        self.field.validate_into(&mut w);

        let h = &mut self.hazard;
        if !h.damage_radius.is_finite() || h.damage_radius < 0.0 {
            h.damage_radius = correct(&mut w, "hazard.damage_radius", h.damage_radius, 0.0);
        }
        if !h.damage_per_second.is_finite() || h.damage_per_second < 0.0 {
            h.damage_per_second = correct(&mut w, "hazard.damage_per_second", h.damage_per_second, 0.0);
        }

        let p = &mut self.punishment;
        let threshold = if p.threshold.is_nan() { 0.0 } else { p.threshold.clamp(0.0, 1.0) };
        if threshold != p.threshold {
            p.threshold = correct(&mut w, "punishment.threshold", p.threshold, threshold);
        }
        if !p.damage_per_second.is_finite() || p.damage_per_second < 0.0 {
            p.damage_per_second = correct(&mut w, "punishment.damage_per_second", p.damage_per_second, 0.0);
        }
        if !p.saturation_cost_per_second.is_finite() || p.saturation_cost_per_second < 0.0 {
            p.saturation_cost_per_second =
                correct(&mut w, "punishment.saturation_cost_per_second", p.saturation_cost_per_second, 0.0);
        }

        let e = &mut self.environment;
        let defaults = EnvironmentConfig::default();
        if !e.safe_zone_stability.is_finite() {
            e.safe_zone_stability =
                correct(&mut w, "environment.safe_zone_stability", e.safe_zone_stability, defaults.safe_zone_stability);
        }
        if !e.landmark_stability.is_finite() {
            e.landmark_stability =
                correct(&mut w, "environment.landmark_stability", e.landmark_stability, defaults.landmark_stability);
        }
        let rainfall = if e.storm_rainfall.is_nan() { defaults.storm_rainfall } else { e.storm_rainfall.clamp(0.0, 1.0) };
        if rainfall != e.storm_rainfall {
            e.storm_rainfall = correct(&mut w, "environment.storm_rainfall", e.storm_rainfall, rainfall);
        }
        if !e.storm_temperature_cap.is_finite() {
            e.storm_temperature_cap = correct(
                &mut w,
                "environment.storm_temperature_cap",
                e.storm_temperature_cap,
                defaults.storm_temperature_cap,
            );
        }

        let r = &mut self.resistance;
        let protection = if r.max_protection.is_nan() { 0.0 } else { r.max_protection.clamp(0.0, 1.0) };
        if protection != r.max_protection {
            r.max_protection = correct(&mut w, "resistance.max_protection", r.max_protection, protection);
        }
        if !r.days_to_max.is_finite() || r.days_to_max <= 0.0 {
            r.days_to_max = correct(&mut w, "resistance.days_to_max", r.days_to_max, ResistanceConfig::default().days_to_max);
        }

        let g = &mut self.gear;
        let restore = if g.stability_per_use.is_nan() {
            GearConfig::default().stability_per_use
        } else {
            g.stability_per_use.clamp(0.0, 1.0)
        };
        if restore != g.stability_per_use {
            g.stability_per_use = correct(&mut w, "gear.stability_per_use", g.stability_per_use, restore);
        }
        if !g.damage_per_use.is_finite() || g.damage_per_use < 0.0 {
            g.damage_per_use = correct(&mut w, "gear.damage_per_use", g.damage_per_use, 0.0);
        }

        let sat = &mut self.saturation;
        let defaults = SaturationRules::default();
        if !sat.join_max.is_finite() || sat.join_max < 0.0 {
            sat.join_max = correct(&mut w, "saturation.join_max", sat.join_max, defaults.join_max);
        }
        if !sat.base_max.is_finite() || sat.base_max < 0.0 {
            sat.base_max = correct(&mut w, "saturation.base_max", sat.base_max, defaults.base_max);
        }
        if !sat.age_bonus.is_finite() || sat.age_bonus < 0.0 {
            sat.age_bonus = correct(&mut w, "saturation.age_bonus", sat.age_bonus, defaults.age_bonus);
        }
        if !sat.days_to_full_bonus.is_finite() || sat.days_to_full_bonus <= 0.0 {
            sat.days_to_full_bonus =
                correct(&mut w, "saturation.days_to_full_bonus", sat.days_to_full_bonus, defaults.days_to_full_bonus);
        }

        let s = &mut self.simulation;
        if !s.tick_interval_secs.is_finite() || s.tick_interval_secs <= 0.0 {
            s.tick_interval_secs = correct(&mut w, "simulation.tick_interval_secs", s.tick_interval_secs, 1.0);
        }

        (self, w)
    }
}

// ── ConfigWarning ─────────────────────────────────────────────────────────────

/// A correction applied while validating a configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigWarning {
    Corrected {
        field:     &'static str,
        found:     f64,
        corrected: f64,
    },
    DroppedReferencePoint {
        found: Position3D,
    },
}

impl ConfigWarning {
    /// Dotted path of the corrected field.
    pub fn field(&self) -> &'static str {
        match self {
            ConfigWarning::Corrected { field, .. } => field,
            ConfigWarning::DroppedReferencePoint { .. } => "field.reference_point",
        }
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::Corrected { field, found, corrected } => {
                write!(f, "{field} was {found}, corrected to {corrected}")
            }
            ConfigWarning::DroppedReferencePoint { found } => {
                write!(f, "field.reference_point {found} is not finite and was dropped")
            }
        }
    }
}

fn correct(warnings: &mut Vec<ConfigWarning>, field: &'static str, found: f64, corrected: f64) -> f64 {
    warn!(field, found, corrected, "configuration value corrected");
    warnings.push(ConfigWarning::Corrected { field, found, corrected });
    corrected
}
