//! Nearest-active-hazard lookup and the localized damage falloff.

use sw_core::Position3D;

use crate::MobileHazard;

/// Return the active hazard closest to `position` (3-D distance).
///
/// Linear scan over `hazards`.  Inactive hazards (`size <= 0`) and hazards
/// whose distance is NaN are skipped.  Ties keep the first hazard
/// encountered, so the result is stable for a fixed iteration order.
pub fn nearest<'a, I>(position: Position3D, hazards: I) -> Option<&'a MobileHazard>
where
    I: IntoIterator<Item = &'a MobileHazard>,
{
    let mut best: Option<(&'a MobileHazard, f64)> = None;
    for hazard in hazards {
        if !hazard.is_active() {
            continue;
        }
        let d2 = position.distance_sq(hazard.position);
        if d2.is_nan() {
            continue;
        }
        match best {
            Some((_, best_d2)) if best_d2 <= d2 => {}
            _ => best = Some((hazard, d2)),
        }
    }
    best.map(|(h, _)| h)
}

/// Damage per second dealt by `hazard` to something at `position`.
///
/// Zero beyond `hazard.damage_radius`; otherwise falls off linearly from
/// the full `damage_per_second` at the center to zero at the edge.  A
/// non-positive radius or non-finite damage deals nothing.
pub fn localized_damage(position: Position3D, hazard: &MobileHazard, damage_per_second: f64) -> f64 {
    let radius = hazard.damage_radius;
    if !radius.is_finite() || radius <= 0.0 {
        return 0.0;
    }
    if !damage_per_second.is_finite() || damage_per_second <= 0.0 {
        return 0.0;
    }

    let distance = position.distance(hazard.position);
    if distance.is_nan() || distance > radius {
        return 0.0;
    }

    let factor = (1.0 - distance / radius).clamp(0.0, 1.0);
    damage_per_second * factor
}
