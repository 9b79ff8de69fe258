//! `sw-agent` — the agent side of the stormwall hazard simulation.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                     |
//! |------------------|--------------------------------------------------------------|
//! | [`stability`]    | `Stability` — an `f64` that is always in `[0, 1]`             |
//! | [`agent`]        | `TrackedAgent`, `AgentTraits`, `DamageCause`                 |
//! | [`world`]        | `AgentSource`, `StatusSink`, `World` collaborator traits      |
//! | [`resistance`]   | `ResistanceCurve`, `AgeResistance`, `FixedResistance`, `NoResistance` |
//! | [`saturation`]   | `SaturationRules` — max saturation by age, fresh starts      |
//! | [`roster`]       | `AgentRoster` — in-memory world implementing both traits     |
//!
//! # Ownership
//!
//! The simulator never owns agents.  Join/leave, movement, and hazard
//! lifecycles belong to whoever implements [`AgentSource`]; the simulator
//! reads one snapshot per tick and writes back only through [`StatusSink`].
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `fx-hash` | `AgentRoster` indexes ids with `FxHashMap`                |
//! | `serde`   | Derives `Serialize`/`Deserialize` on the value types      |

pub mod agent;
pub mod resistance;
pub mod roster;
pub mod saturation;
pub mod stability;
pub mod world;

#[cfg(test)]
mod tests;

pub use agent::{AgentTraits, DamageCause, TrackedAgent};
pub use resistance::{AgeResistance, FixedResistance, NoResistance, ResistanceCurve};
pub use roster::{AgentRecord, AgentRoster};
pub use saturation::SaturationRules;
pub use stability::Stability;
pub use world::{AgentSource, StatusSink, World};
