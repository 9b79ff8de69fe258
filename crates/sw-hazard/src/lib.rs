//! `sw-hazard` — transient mobile hazard zones and proximity queries.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`hazard`]    | `MobileHazard`, `HazardDefaults`                              |
//! | [`proximity`] | `nearest`, `localized_damage` (linear falloff)                |
//! | [`index`]     | `ProximityIndex` trait, `LinearScan`, `HazardTree` (R-tree)   |
//!
//! Everything here is query-only.  Hazards are created, moved and destroyed
//! by an external lifecycle manager; the simulator reads a snapshot of them
//! once per tick and builds a throwaway index over it.

pub mod hazard;
pub mod index;
pub mod proximity;


pub use hazard::{HazardDefaults, MobileHazard};
pub use index::{HazardIndexKind, HazardTree, LinearScan, ProximityIndex, build_index};
pub use proximity::{localized_damage, nearest};
