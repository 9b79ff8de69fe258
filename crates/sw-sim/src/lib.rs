//! `sw-sim` — the fixed-rate agent status simulator and its runtime.
//!
//! # Tick
//!
//! ```text
//! Simulator::tick(delta, world, observer):
//!   ① Snapshot  — load the config Arc once; every agent sees the same radii.
//!   ② Gather    — world.current_agents(), world.current_hazards();
//!                 build the proximity index.
//!   ③ Evaluate  — per eligible agent: intensity → drain → resistance →
//!                 new stability; nearest hazard → damage; policy →
//!                 consequences.  Pure; parallel with the `parallel` feature.
//!   ④ Apply     — sequential, snapshot order: set_stability (only on
//!                 change), apply_damage, consume_saturation, observer hooks.
//! ```
//!
//! # Crate layout
//!
//! | Module          | Contents                                                    |
//! |-----------------|-------------------------------------------------------------|
//! | [`sim`]         | `Simulator` — the per-tick evaluator                        |
//! | [`builder`]     | `SimBuilder`                                                |
//! | [`observer`]    | `SimObserver`, `NoopObserver`, `TickReport`                 |
//! | [`policy`]      | `LowStabilityPolicy`, `DamageAndHunger`, `NoPunishment`     |
//! | [`overrides`]   | `OverrideRegistry`, `StabilityOverride`, `LandmarkFloor`, `LandmarkPin` |
//! | [`environment`] | `Climate`, `Wind`, climate/wind/ambient-stability overrides |
//! | [`scheduler`]   | `TickScheduler`, `TickHandle`                               |
//! | [`runtime`]     | `StormRuntime` — context object and admin mutations         |
//! | [`error`]       | `SimError`, `AdminError`                                    |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                           |
//! |------------|--------------------------------------------------|
//! | `parallel` | Runs the evaluate phase on Rayon's thread pool.  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let (config, _) = ConfigHandle::new(StormConfig::default());
//! let sim = SimBuilder::new(config).build();
//! let mut runtime = StormRuntime::new(sim, AgentRoster::default(), NoopObserver);
//! runtime.start()?;
//! runtime.advance(10.0);
//! runtime.shutdown();
//! ```

pub mod builder;
pub mod environment;
pub mod error;
pub mod observer;
pub mod overrides;
pub mod policy;
pub mod runtime;
pub mod scheduler;
pub mod sim;


pub use builder::SimBuilder;
pub use environment::{Climate, Wind, ambient_stability, climate_override, in_storm, wind_override};
pub use error::{AdminError, SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickReport};
pub use overrides::{
    LandmarkFloor, LandmarkIndex, LandmarkPin, LandmarkSet, OverrideRegistry, StabilityOverride,
};
pub use policy::{Consequence, DamageAndHunger, LowStabilityPolicy, NoPunishment};
pub use runtime::{RuntimeState, StormRuntime};
pub use scheduler::{DEFAULT_MAX_CATCH_UP, TickHandle, TickScheduler};
pub use sim::Simulator;
