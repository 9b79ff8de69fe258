//! Safe-zone predicates and the placement admission gate.

use sw_core::Position3D;

use crate::{ConfigHandle, FieldConfig, field::intensity};

/// `true` when `position` is strictly past the inner radius
/// (`intensity > 0`).  Planar only; altitude is ignored.
///
/// Without a reference point nothing is "outside", so placement callers
/// deny by default.
#[inline]
pub fn is_outside_safe_zone(position: Position3D, config: &FieldConfig) -> bool {
    intensity(position, config) > 0.0
}

/// `true` when a reference point is known and `position` is within the
/// inner radius.  Planar only, like [`is_outside_safe_zone`].
#[inline]
pub fn within_inner_radius(position: Position3D, config: &FieldConfig) -> bool {
    config.reference_point.is_some() && !is_outside_safe_zone(position, config)
}

/// `true` when `position` is sheltered: within the inner radius *and*
/// admitted by the config's [`VerticalGate`][crate::VerticalGate].
#[inline]
pub fn in_safe_zone(position: Position3D, config: &FieldConfig) -> bool {
    within_inner_radius(position, config) && config.vertical_gate.admits(position)
}

/// Veto predicate for external placement and generation requests
/// (structure generation, hazard spawns, …).
///
/// `allows(pos) == false` means "deny the action".  Every query reads the
/// handle's current snapshot; it allocates nothing and never mutates.
#[derive(Clone, Debug)]
pub struct PlacementGate {
    config: ConfigHandle,
}

impl PlacementGate {
    pub fn new(config: ConfigHandle) -> Self {
        Self { config }
    }

    /// `true` if an action at `position` may proceed.
    #[inline]
    pub fn allows(&self, position: Position3D) -> bool {
        self.config.with(|c| is_outside_safe_zone(position, &c.field))
    }

    /// Evaluate many candidates against one snapshot.
    pub fn allows_all<'a, I>(&self, positions: I) -> Vec<bool>
    where
        I: IntoIterator<Item = &'a Position3D>,
    {
        let snapshot = self.config.snapshot();
        positions
            .into_iter()
            .map(|&p| is_outside_safe_zone(p, &snapshot.field))
            .collect()
    }
}
