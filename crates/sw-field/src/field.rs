//! Distance-to-intensity mapping around the reference point.
//!
//! Band edges are compared in squared space; the single `sqrt` is paid only
//! for positions strictly inside the graded band.  The output is linear in
//! true distance, so intensity grows at a constant rate per unit walked.

use sw_core::Position3D;

use crate::FieldConfig;

/// Intensity in `[0, 1]` for a squared planar distance `d2` from the
/// reference point.
///
/// Never divides by zero and never returns NaN: a NaN distance maps to 0,
/// and a collapsed or inverted band maps everything past `inner` to 1.
#[inline]
pub fn band_intensity(d2: f64, inner: f64, outer: f64) -> f64 {
    graded(d2, inner, inner * inner, outer * outer, outer - inner)
}

#[inline]
#[allow(clippy::neg_cmp_op_on_partial_ord)]
fn graded(d2: f64, inner: f64, inner_sq: f64, outer_sq: f64, band: f64) -> f64 {
    if d2.is_nan() || d2 <= inner_sq {
        return 0.0;
    }
    // Negated comparisons so NaN edges also saturate.
    if !(d2 < outer_sq) || !(band > 0.0) {
        return 1.0;
    }
    let t = (d2.sqrt() - inner) / band;
    if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) }
}

/// Intensity at `position` for `config`.
///
/// Returns 0 when the config has no reference point yet.
pub fn intensity(position: Position3D, config: &FieldConfig) -> f64 {
    match config.reference_point {
        Some(reference) => band_intensity(
            position.planar_distance_sq(reference),
            config.inner_radius,
            config.outer_radius,
        ),
        None => 0.0,
    }
}

/// A field with its band edges pre-squared, for evaluating many positions
/// against one config snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HazardField {
    reference: Position3D,
    inner:     f64,
    inner_sq:  f64,
    outer_sq:  f64,
    band:      f64,
}

impl HazardField {
    /// Build from a config.  Returns `None` if there is no reference point.
    pub fn new(config: &FieldConfig) -> Option<Self> {
        let reference = config.reference_point?;
        let inner = config.inner_radius;
        let outer = config.outer_radius;
        Some(Self {
            reference,
            inner,
            inner_sq: inner * inner,
            outer_sq: outer * outer,
            band:     outer - inner,
        })
    }

    /// Same result as [`intensity`] for the config this field was built from.
    #[inline]
    pub fn intensity(&self, position: Position3D) -> f64 {
        let d2 = position.planar_distance_sq(self.reference);
        graded(d2, self.inner, self.inner_sq, self.outer_sq, self.band)
    }
}
