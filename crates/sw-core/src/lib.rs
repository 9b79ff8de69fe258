//! `sw-core` — foundational types for the `stormwall` hazard simulation.
//!
//! This crate is a dependency of every other `sw-*` crate.  It has no
//! `sw-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `HazardId`                                 |
//! | [`geo`]         | `Position3D`, planar and full squared distances       |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`rng`]         | `SimRng` (seeded, used by environment overrides)      |
//! | [`error`]       | `SwError`, `SwResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{SwError, SwResult};
pub use geo::Position3D;
pub use ids::{AgentId, HazardId};
pub use rng::SimRng;
pub use time::{SimClock, Tick};
