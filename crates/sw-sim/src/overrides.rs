//! Ordered stability overrides.
//!
//! # Evaluation order
//!
//! Overrides run in registration order and form a chain: each one sees the
//! value produced so far and either replaces it (`Some`) or passes it
//! through (`None`).  The last registrant that answers therefore wins.
//! A non-finite answer is ignored and the chain continues with the previous
//! value.
//!
//! Registration is keyed by name and idempotent in both directions.

use std::sync::Arc;

use tracing::{debug, warn};

use sw_core::Position3D;
use sw_field::StormConfig;

// ── Traits ────────────────────────────────────────────────────────────────────

/// A hook that may adjust the ambient stability at a position.
pub trait StabilityOverride: Send + Sync {
    fn apply(&self, position: Position3D, current: f64, config: &StormConfig) -> Option<f64>;
}

/// Answers "is there a landmark (story structure, shrine, …) here?"
pub trait LandmarkIndex: Send + Sync {
    fn is_landmark(&self, position: Position3D) -> bool;
}

// ── OverrideRegistry ──────────────────────────────────────────────────────────

#[derive(Default)]
pub struct OverrideRegistry {
    entries: Vec<(String, Arc<dyn StabilityOverride>)>,
}

impl OverrideRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `hook` under `name`.  Returns `false` and changes nothing if
    /// the name is already registered.
    pub fn register(&mut self, name: impl Into<String>, hook: Arc<dyn StabilityOverride>) -> bool {
        let name = name.into();
        if self.entries.iter().any(|(n, _)| *n == name) {
            return false;
        }
        debug!(%name, "stability override registered");
        self.entries.push((name, hook));
        true
    }

    /// Remove the hook registered under `name`.  Returns `false` if there
    /// was none.
    pub fn unregister(&mut self, name: &str) -> bool {
        match self.entries.iter().position(|(n, _)| n == name) {
            Some(i) => {
                self.entries.remove(i);
                debug!(name, "stability override unregistered");
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names, in evaluation order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Run the chain starting from `base`.
    pub fn apply(&self, position: Position3D, base: f64, config: &StormConfig) -> f64 {
        let mut value = base;
        for (name, hook) in &self.entries {
            match hook.apply(position, value, config) {
                Some(v) if v.is_finite() => value = v,
                Some(v) => warn!(%name, value = v, "override returned a non-finite value; ignored"),
                None => {}
            }
        }
        value
    }
}

// ── Built-ins ─────────────────────────────────────────────────────────────────

/// Keeps ambient stability at landmarks at or above
/// `environment.landmark_stability`.
///
/// This is a floor, not a fixed value: a landmark where the base is already
/// higher (inside the safe zone, say 1.5) keeps the higher value.  Register
/// [`LandmarkPin`] instead to report exactly `landmark_stability`.
pub struct LandmarkFloor<L: LandmarkIndex> {
    pub landmarks: L,
}

impl<L: LandmarkIndex> LandmarkFloor<L> {
    pub fn new(landmarks: L) -> Self {
        Self { landmarks }
    }
}

impl<L: LandmarkIndex> StabilityOverride for LandmarkFloor<L> {
    fn apply(&self, position: Position3D, current: f64, config: &StormConfig) -> Option<f64> {
        self.landmarks
            .is_landmark(position)
            .then(|| current.max(config.environment.landmark_stability))
    }
}

/// Reports exactly `environment.landmark_stability` at landmarks, raising
/// or lowering whatever the base value was.
pub struct LandmarkPin<L: LandmarkIndex> {
    pub landmarks: L,
}

impl<L: LandmarkIndex> LandmarkPin<L> {
    pub fn new(landmarks: L) -> Self {
        Self { landmarks }
    }
}

impl<L: LandmarkIndex> StabilityOverride for LandmarkPin<L> {
    fn apply(&self, position: Position3D, _current: f64, config: &StormConfig) -> Option<f64> {
        self.landmarks
            .is_landmark(position)
            .then_some(config.environment.landmark_stability)
    }
}

/// Spherical landmark zones, checked linearly.
#[derive(Clone, Debug, Default)]
pub struct LandmarkSet {
    zones: Vec<(Position3D, f64)>,
}

impl LandmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a zone of `radius` around `center`.
    pub fn insert(&mut self, center: Position3D, radius: f64) {
        self.zones.push((center, radius));
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl LandmarkIndex for LandmarkSet {
    fn is_landmark(&self, position: Position3D) -> bool {
        self.zones
            .iter()
            .any(|&(center, radius)| position.distance_sq(center) <= radius * radius)
    }
}
