//! Per-tick proximity indexes over a hazard snapshot.
//!
//! Two backends share the [`ProximityIndex`] trait:
//!
//! | Backend        | Build cost   | Query cost | Ties                         |
//! |----------------|--------------|------------|------------------------------|
//! | [`LinearScan`] | none         | O(H)       | first in snapshot order wins |
//! | [`HazardTree`] | O(H log H)   | O(log H)   | unspecified                  |
//!
//! Live hazard counts are usually small, so `LinearScan` is the default.
//! Switch to the R-tree through `HazardIndexKind::RTree` when a world keeps
//! hundreds of hazards open at once.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use serde::{Deserialize, Serialize};

use sw_core::Position3D;

use crate::{MobileHazard, nearest};

/// Query interface shared by every backend.  `Sync` so one index can serve
/// a parallel evaluation phase.
pub trait ProximityIndex: Send + Sync {
    /// The active hazard closest to `position`, if any.
    fn nearest(&self, position: Position3D) -> Option<&MobileHazard>;

    /// Number of active hazards the index can return.
    fn active_count(&self) -> usize;
}

/// Which backend the simulator builds each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardIndexKind {
    #[default]
    Linear,
    RTree,
}

/// Build the chosen backend over `hazards`.
pub fn build_index(kind: HazardIndexKind, hazards: &[MobileHazard]) -> Box<dyn ProximityIndex + '_> {
    match kind {
        HazardIndexKind::Linear => Box::new(LinearScan::new(hazards)),
        HazardIndexKind::RTree  => Box::new(HazardTree::build(hazards)),
    }
}

// ── LinearScan ────────────────────────────────────────────────────────────────

/// Borrowing wrapper that answers queries with [`nearest`].
pub struct LinearScan<'a> {
    hazards: &'a [MobileHazard],
}

impl<'a> LinearScan<'a> {
    pub fn new(hazards: &'a [MobileHazard]) -> Self {
        Self { hazards }
    }
}

impl ProximityIndex for LinearScan<'_> {
    fn nearest(&self, position: Position3D) -> Option<&MobileHazard> {
        nearest(position, self.hazards)
    }

    fn active_count(&self) -> usize {
        self.hazards.iter().filter(|h| h.is_active()).count()
    }
}

// ── HazardTree ────────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: the hazard's position and its slot in
/// `HazardTree::hazards`.
#[derive(Clone)]
struct HazardEntry {
    point: [f64; 3],
    slot:  usize,
}

impl RTreeObject for HazardEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for HazardEntry {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

/// R-tree over the active hazards of one snapshot.
///
/// Inactive hazards and hazards with non-finite positions are left out at
/// build time, so every query result is active.
pub struct HazardTree {
    hazards: Vec<MobileHazard>,
    tree:    RTree<HazardEntry>,
}

impl HazardTree {
    /// Bulk-load the active, finitely placed hazards of `hazards`.
    pub fn build(hazards: &[MobileHazard]) -> Self {
        let hazards: Vec<MobileHazard> = hazards
            .iter()
            .filter(|h| h.is_active() && h.position.is_finite())
            .copied()
            .collect();
        let entries: Vec<HazardEntry> = hazards
            .iter()
            .enumerate()
            .map(|(slot, h)| HazardEntry { point: h.position.to_array(), slot })
            .collect();
        Self { hazards, tree: RTree::bulk_load(entries) }
    }
}

impl ProximityIndex for HazardTree {
    fn nearest(&self, position: Position3D) -> Option<&MobileHazard> {
        if !position.is_finite() {
            return None;
        }
        self.tree
            .nearest_neighbor(&position.to_array())
            .map(|e| &self.hazards[e.slot])
    }

    fn active_count(&self) -> usize {
        self.hazards.len()
    }
}
