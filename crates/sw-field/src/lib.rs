//! `sw-field` — the static hazard field and the configuration it reads.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`config`]  | `FieldConfig`, `StormConfig` and its sections, `ConfigWarning`    |
//! | [`field`]   | `intensity`, `HazardField` (precomputed band edges)               |
//! | [`gate`]    | `is_outside_safe_zone`, `in_safe_zone`, `within_inner_radius`, `PlacementGate` |
//! | [`handle`]  | `ConfigHandle` — whole-snapshot swaps, torn-read free             |
//! | [`persist`] | JSON `load_or_create` / `store`                                   |
//! | [`error`]   | `FieldError`, `FieldResult<T>`                                    |
//!
//! # The field
//!
//! ```text
//!   intensity
//!     1 ┤                 ┌──────────
//!       │               ╱
//!       │             ╱      linear in true distance
//!     0 ┼───────────┘
//!       0         inner   outer        planar distance from reference
//! ```

pub mod config;
pub mod error;
pub mod field;
pub mod gate;
pub mod handle;
pub mod persist;

#[cfg(test)]
mod tests;

pub use config::{
    ConfigWarning, EnvironmentConfig, FieldConfig, GearConfig, PunishmentConfig, ResistanceConfig,
    SimulationConfig, StormConfig, VerticalGate,
};
pub use error::{FieldError, FieldResult};
pub use field::{HazardField, band_intensity, intensity};
pub use gate::{PlacementGate, in_safe_zone, is_outside_safe_zone, within_inner_radius};
pub use handle::ConfigHandle;
pub use persist::{LoadedConfig, load, load_or_create, load_reader, store};
