//! `StormRuntime` — the explicitly constructed context object.
//!
//! Owns everything the hazard system needs at runtime: the config handle,
//! the simulator, the world, the observer, the tick scheduler, and the
//! override registry.  Nothing here is global; hosts create one runtime and
//! pass it by reference.
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──start()──▶ Running ──shutdown()──▶ Stopped
//!                      ▲                       │
//!                      └───────start()─────────┘
//! ```
//!
//! `start` and `shutdown` are idempotent: a second call in the same state
//! returns `false` and changes nothing.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use sw_agent::{DamageCause, Stability, World};
use sw_core::{AgentId, Position3D, SimRng};
use sw_field::{ConfigHandle, FieldConfig, PlacementGate, StormConfig, intensity, within_inner_radius};

use crate::{
    AdminError, Climate, NoopObserver, OverrideRegistry, SimObserver, SimResult, Simulator,
    StabilityOverride, TickHandle, TickScheduler, Wind, ambient_stability, climate_override,
    wind_override,
};

/// Where the runtime is in its lifecycle.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RuntimeState {
    Idle,
    Running,
    Stopped,
}

/// The state the scheduled tick callback mutates.  Kept apart from the
/// scheduler so both can be borrowed at once.
struct Engine<W, O> {
    simulator: Simulator,
    world:     W,
    observer:  O,
}

pub struct StormRuntime<W: World, O: SimObserver = NoopObserver> {
    config:    ConfigHandle,
    engine:    Engine<W, O>,
    scheduler: TickScheduler<Engine<W, O>>,
    overrides: OverrideRegistry,
    tick:      Option<TickHandle>,
    state:     RuntimeState,
}

// `'static` because the tick callback is boxed inside the scheduler.
impl<W: World + 'static, O: SimObserver + 'static> StormRuntime<W, O> {
    /// Wrap a built simulator.  The runtime shares the simulator's config
    /// handle.
    pub fn new(simulator: Simulator, world: W, observer: O) -> Self {
        Self {
            config: simulator.config().clone(),
            engine: Engine { simulator, world, observer },
            scheduler: TickScheduler::new(),
            overrides: OverrideRegistry::new(),
            tick: None,
            state: RuntimeState::Idle,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    pub fn state(&self) -> RuntimeState {
        self.state
    }

    /// Register the simulator tick at the configured interval.
    ///
    /// Returns `Ok(false)` if already running.  The interval is read once
    /// here; a later config change takes effect on the next `start`.
    pub fn start(&mut self) -> SimResult<bool> {
        if self.state == RuntimeState::Running {
            return Ok(false);
        }
        let interval = self.config.with(|c| c.simulation.tick_interval_secs);
        let handle = self.scheduler.register(interval, |engine: &mut Engine<W, O>, delta| {
            let Engine { simulator, world, observer } = engine;
            simulator.tick(delta, world, observer);
        })?;
        self.tick = Some(handle);
        self.state = RuntimeState::Running;
        info!(interval, "storm runtime started");
        Ok(true)
    }

    /// Unregister the tick, drop every override, and notify the observer.
    ///
    /// Returns `false` if the runtime was not running.
    pub fn shutdown(&mut self) -> bool {
        if self.state != RuntimeState::Running {
            return false;
        }
        if let Some(handle) = self.tick.take() {
            self.scheduler.unregister(handle);
        }
        self.overrides.clear();
        let final_tick = self.engine.simulator.current_tick();
        self.engine.observer.on_shutdown(final_tick);
        self.state = RuntimeState::Stopped;
        info!(tick = %final_tick, "storm runtime stopped");
        true
    }

    /// Feed `elapsed_secs` of time to the scheduler.  Returns the number of
    /// simulator ticks run; 0 unless running.
    pub fn advance(&mut self, elapsed_secs: f64) -> usize {
        if self.state != RuntimeState::Running {
            return 0;
        }
        self.scheduler.advance(&mut self.engine, elapsed_secs)
    }

    // ── Administrative mutations ──────────────────────────────────────────

    /// Replace the field section.  Out-of-range values are corrected and
    /// listed in the returned message; a non-finite reference point is
    /// rejected outright.
    pub fn set_field_config(&mut self, field: FieldConfig) -> Result<String, AdminError> {
        if let Some(p) = field.reference_point.filter(|p| !p.is_finite()) {
            return Err(AdminError::NonFiniteReference(p));
        }
        let warnings = self.config.replace_field(field);
        if warnings.is_empty() {
            return Ok("field config updated".to_owned());
        }
        let corrections: Vec<String> = warnings.iter().map(ToString::to_string).collect();
        Ok(format!("field config updated with corrections: {}", corrections.join("; ")))
    }

    /// Set one agent's stability.  `value` must be finite and within
    /// `[0, 1]`; nothing is clamped here.
    pub fn set_agent_stability(&mut self, agent: AgentId, value: f64) -> Result<String, AdminError> {
        let stability = Stability::try_new(value).map_err(AdminError::InvalidStability)?;
        self.engine
            .world
            .set_stability(agent, stability)
            .map_err(|_| AdminError::UnknownAgent(agent))?;
        info!(agent = %agent, value, "stability set by administrator");
        Ok(format!("stability of {agent} set to {}%", stability.percent()))
    }

    /// An agent uses a gear: restore `gear.stability_per_use` of stability
    /// (clamped to `[0, 1]`), then charge `gear.damage_per_use` health.
    ///
    /// Works in any lifecycle state.  The observer sees the change and the
    /// damage like any tick-driven write.
    pub fn use_gear(&mut self, agent: AgentId) -> Result<String, AdminError> {
        let (gear, field) = self.config.with(|c| (c.gear, c.field));
        let Engine { simulator, world, observer } = &mut self.engine;
        let current = world.agent(agent).ok_or(AdminError::UnknownAgent(agent))?;
        let now = simulator.current_tick();

        let restored = Stability::new(current.stability.get() + gear.stability_per_use);
        if restored != current.stability {
            world.set_stability(agent, restored).map_err(|_| AdminError::UnknownAgent(agent))?;
            let at = intensity(current.position, &field);
            observer.on_stability_changed(now, agent, current.stability, restored, at);
        }

        let damage = gear.damage_per_use;
        if damage > 0.0 {
            world
                .apply_damage(agent, damage, DamageCause::GearUse)
                .map_err(|_| AdminError::UnknownAgent(agent))?;
            observer.on_damage(now, agent, damage, DamageCause::GearUse);
        }

        info!(agent = %agent, stability = restored.get(), damage, "gear used");
        if damage > 0.0 {
            Ok(format!("stability of {agent} restored to {}% at the cost of {damage} health", restored.percent()))
        } else {
            Ok(format!("stability of {agent} restored to {}%", restored.percent()))
        }
    }

    /// Write the current snapshot to `path`.
    pub fn store_config(&self, path: &Path) -> Result<(), AdminError> {
        let snapshot = self.config.snapshot();
        sw_field::store(path, &snapshot).inspect_err(|e| warn!(error = %e, "config store failed"))?;
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// A gate bound to this runtime's config, for structure generation and
    /// hazard-spawn admission.
    pub fn placement_gate(&self) -> PlacementGate {
        PlacementGate::new(self.config.clone())
    }

    /// `true` if `position` is within the safe zone's radius, ignoring
    /// altitude.  Hosts pass this to the roster when an agent spawns or
    /// revives.
    pub fn is_sheltered(&self, position: Position3D) -> bool {
        self.config.with(|c| within_inner_radius(position, &c.field))
    }

    pub fn ambient_stability(&self, base: f64, position: Position3D) -> f64 {
        self.config.with(|c| ambient_stability(base, position, c, &self.overrides))
    }

    pub fn climate_at(&self, position: Position3D, climate: &mut Climate) -> bool {
        self.config.with(|c| climate_override(position, c, climate))
    }

    pub fn wind_at(&self, position: Position3D, wind: &mut Wind, rng: &mut SimRng) -> bool {
        self.config.with(|c| wind_override(position, c, wind, rng))
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &ConfigHandle {
        &self.config
    }

    pub fn snapshot(&self) -> Arc<StormConfig> {
        self.config.snapshot()
    }

    pub fn register_override(&mut self, name: impl Into<String>, hook: Arc<dyn StabilityOverride>) -> bool {
        self.overrides.register(name, hook)
    }

    pub fn unregister_override(&mut self, name: &str) -> bool {
        self.overrides.unregister(name)
    }

    pub fn overrides(&self) -> &OverrideRegistry {
        &self.overrides
    }

    pub fn simulator(&self) -> &Simulator {
        &self.engine.simulator
    }

    pub fn world(&self) -> &W {
        &self.engine.world
    }

    /// Mutable world access for lifecycle events between ticks.
    pub fn world_mut(&mut self) -> &mut W {
        &mut self.engine.world
    }

    pub fn observer(&self) -> &O {
        &self.engine.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.engine.observer
    }

    /// Consume the runtime, returning the world and observer.
    pub fn into_parts(self) -> (W, O) {
        (self.engine.world, self.engine.observer)
    }
}
