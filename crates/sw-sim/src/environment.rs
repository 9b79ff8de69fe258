//! Environment overrides inside the storm.
//!
//! Climate and wind use the planar test alone: a position is "in the storm"
//! when a reference point is known and the position lies past the inner
//! radius, whatever its altitude.  Ambient stability is the only override
//! that also honours the vertical gate (see [`sw_field::in_safe_zone`]).

use sw_core::{Position3D, SimRng};
use sw_field::{FieldConfig, StormConfig, in_safe_zone, intensity, is_outside_safe_zone};

use crate::OverrideRegistry;

/// Climate values a host world asks about at a position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Climate {
    /// °C.
    pub temperature:          f64,
    pub rainfall:             f64,
    pub rain_cloud_overlay:   f64,
    pub worldgen_rainfall:    f64,
    /// °C.
    pub worldgen_temperature: f64,
}

/// Wind vector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Wind {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// `true` if `position` gets storm weather under `field`.  Altitude is
/// ignored.
#[inline]
pub fn in_storm(position: Position3D, field: &FieldConfig) -> bool {
    field.reference_point.is_some() && is_outside_safe_zone(position, field)
}

/// Force storm climate at `position`.  Returns `true` if anything was
/// overridden.
pub fn climate_override(position: Position3D, config: &StormConfig, climate: &mut Climate) -> bool {
    if !in_storm(position, &config.field) {
        return false;
    }
    let env = &config.environment;
    climate.rainfall = env.storm_rainfall;
    climate.rain_cloud_overlay = env.storm_rainfall;
    climate.worldgen_rainfall = env.storm_rainfall;
    climate.temperature = climate.temperature.min(env.storm_temperature_cap);
    climate.worldgen_temperature = climate.worldgen_temperature.min(env.storm_temperature_cap);
    true
}

/// Replace the wind at `position` with a gusty storm wind drawn from `rng`.
/// Returns `true` if the wind was overridden.
pub fn wind_override(position: Position3D, config: &StormConfig, wind: &mut Wind, rng: &mut SimRng) -> bool {
    if !in_storm(position, &config.field) {
        return false;
    }
    wind.x = 0.5 + rng.unit();
    wind.z = rng.unit();
    true
}

/// Ambient stability at `position`, given the world's own `base` value.
///
/// Sheltered positions report `environment.safe_zone_stability`; elsewhere
/// the base fades linearly to 0 across the band.  The registry's overrides
/// then run on the result.
pub fn ambient_stability(
    base:      f64,
    position:  Position3D,
    config:    &StormConfig,
    overrides: &OverrideRegistry,
) -> f64 {
    let value = if in_safe_zone(position, &config.field) {
        config.environment.safe_zone_stability
    } else {
        let i = intensity(position, &config.field);
        if i <= 0.0 {
            base
        } else if i >= 1.0 {
            0.0
        } else {
            base * (1.0 - i)
        }
    };
    overrides.apply(position, value, config)
}
