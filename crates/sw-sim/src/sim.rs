//! The `Simulator` and its tick.

use tracing::{debug, info, warn};

use sw_agent::{
    AgeResistance, AgentTraits, DamageCause, ResistanceCurve, Stability, TrackedAgent, World,
};
use sw_core::{AgentId, HazardId, SimClock, Tick};
use sw_field::{ConfigHandle, HazardField, PunishmentConfig, StormConfig};
use sw_hazard::{ProximityIndex, build_index};

use crate::{Consequence, LowStabilityPolicy, SimObserver, TickReport};

// ── Evaluation ────────────────────────────────────────────────────────────────

/// Everything the apply phase needs for one eligible agent.  Produced by the
/// (possibly parallel) evaluate phase without touching the world.
struct Evaluation {
    agent:        AgentId,
    old:          Stability,
    new:          Stability,
    intensity:    f64,
    hazard:       Option<(HazardId, f64)>,
    consequences: Vec<Consequence>,
}

/// Read-only inputs shared by every agent's evaluation within one tick.
struct TickInputs<'a> {
    delta:      f64,
    drain_rate: f64,
    field:      Option<HazardField>,
    index:      Option<&'a dyn ProximityIndex>,
    resistance: &'a dyn ResistanceCurve,
    policy:     &'a dyn LowStabilityPolicy,
    punishment: &'a PunishmentConfig,
}

impl TickInputs<'_> {
    fn evaluate(&self, agent: &TrackedAgent) -> Evaluation {
        let old = agent.stability;

        let intensity = self.field.map_or(0.0, |f| f.intensity(agent.position));
        let new = if intensity > 0.0 {
            let raw = self.drain_rate * intensity * self.delta;
            let resist = resistance_of(self.resistance, &agent.traits);
            old.drained(raw * (1.0 - resist))
        } else {
            old
        };

        let hazard = self.index.and_then(|index| {
            let h = index.nearest(agent.position)?;
            let amount = h.damage_at(agent.position) * self.delta;
            (amount > 0.0).then_some((h.id, amount))
        });

        let consequences = self.policy.consequences(agent, new, self.delta, self.punishment);

        Evaluation { agent: agent.id, old, new, intensity, hazard, consequences }
    }
}

/// Modifier in `[0, 1]`; a curve with no answer means no resistance.
#[inline]
fn resistance_of(curve: &dyn ResistanceCurve, traits: &AgentTraits) -> f64 {
    curve.modifier(traits).filter(|m| !m.is_nan()).map_or(0.0, |m| m.clamp(0.0, 1.0))
}

// ── Latch ─────────────────────────────────────────────────────────────────────

/// Log-once state for a missing collaborator.
#[derive(Default)]
struct Latch {
    raised: bool,
}

impl Latch {
    /// Record the current condition.  Returns `true` on the transition into
    /// the missing state.
    fn observe(&mut self, missing: bool) -> bool {
        let rising = missing && !self.raised;
        self.raised = missing;
        rising
    }
}

// ── Simulator ─────────────────────────────────────────────────────────────────

/// The per-tick evaluator.  Owns its clock, policy, and resistance curve;
/// never owns agents or hazards.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Simulator {
    pub(crate) config:     ConfigHandle,
    pub(crate) clock:      SimClock,
    pub(crate) policy:     Box<dyn LowStabilityPolicy>,
    /// `None` uses an [`AgeResistance`] built from the config snapshot.
    pub(crate) resistance: Option<Box<dyn ResistanceCurve>>,
    no_reference:          Latch,
    no_hazards:            Latch,
}

impl Simulator {
    pub(crate) fn from_parts(
        config:     ConfigHandle,
        clock:      SimClock,
        policy:     Box<dyn LowStabilityPolicy>,
        resistance: Option<Box<dyn ResistanceCurve>>,
    ) -> Self {
        Self {
            config,
            clock,
            policy,
            resistance,
            no_reference: Latch::default(),
            no_hazards: Latch::default(),
        }
    }

    pub fn config(&self) -> &ConfigHandle {
        &self.config
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// The tick the next call to [`tick`][Self::tick] will process.
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    /// Run one tick covering `delta_secs` of simulated time.
    ///
    /// Never fails: a missing reference point or hazard collection disables
    /// that subsystem for the tick, and a write the world rejects is counted
    /// in [`TickReport::faults`] without affecting other agents.  A
    /// non-finite or negative `delta_secs` is treated as 0.
    pub fn tick<W: World, O: SimObserver>(
        &mut self,
        delta_secs: f64,
        world:      &mut W,
        observer:   &mut O,
    ) -> TickReport {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        let delta = if delta_secs.is_finite() && delta_secs > 0.0 { delta_secs } else { 0.0 };
        let snapshot = self.config.snapshot();
        let cfg: &StormConfig = &snapshot;

        // ── Gather ────────────────────────────────────────────────────────
        let field = HazardField::new(&cfg.field);
        if self.no_reference.observe(field.is_none()) {
            warn!(tick = %now, "no reference point; stability drain disabled until one is set");
        }

        let agents = world.current_agents();
        let hazards = world.current_hazards();
        if self.no_hazards.observe(hazards.is_none()) {
            warn!(tick = %now, "hazard collection unavailable; hazard damage disabled");
        }
        let index = hazards.as_deref().map(|h| build_index(cfg.simulation.hazard_index, h));

        let age_curve = AgeResistance {
            max_protection: cfg.resistance.max_protection,
            days_to_max:    cfg.resistance.days_to_max,
        };
        let resistance: &dyn ResistanceCurve = match &self.resistance {
            Some(curve) => curve.as_ref(),
            None => &age_curve,
        };
        let inputs = TickInputs {
            delta,
            drain_rate: cfg.field.drain_rate_per_second,
            field,
            index: index.as_deref(),
            resistance,
            policy: self.policy.as_ref(),
            punishment: &cfg.punishment,
        };

        let mut report = TickReport::default();

        // ── Evaluate ──────────────────────────────────────────────────────
        let evaluations = evaluate_all(&inputs, &agents, &mut report);

        // ── Apply (sequential, snapshot order) ────────────────────────────
        for eval in evaluations {
            apply(now, eval, world, observer, &mut report);
        }

        debug!(
            tick = %now,
            evaluated = report.evaluated,
            drained = report.drained,
            damaged = report.damaged,
            punished = report.punished,
            "tick complete",
        );
        observer.on_tick_end(now, &report);
        self.clock.advance(delta);
        report
    }
}

fn evaluate_all(inputs: &TickInputs<'_>, agents: &[TrackedAgent], report: &mut TickReport) -> Vec<Evaluation> {
    let eligible: Vec<&TrackedAgent> = agents.iter().filter(|a| a.eligible).collect();
    report.skipped = agents.len() - eligible.len();
    report.evaluated = eligible.len();

    #[cfg(not(feature = "parallel"))]
    {
        eligible.into_iter().map(|a| inputs.evaluate(a)).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        // `collect` on an indexed parallel iterator preserves input order.
        eligible.into_par_iter().map(|a| inputs.evaluate(a)).collect()
    }
}

fn apply<W: World, O: SimObserver>(
    now:      Tick,
    eval:     Evaluation,
    world:    &mut W,
    observer: &mut O,
    report:   &mut TickReport,
) {
    let id = eval.agent;

    if eval.new != eval.old {
        match world.set_stability(id, eval.new) {
            Ok(()) => {
                report.drained += 1;
                observer.on_stability_changed(now, id, eval.old, eval.new, eval.intensity);
                if eval.new == Stability::EMPTY {
                    info!(agent = %id, tick = %now, "stability exhausted");
                }
            }
            Err(e) => {
                report.faults += 1;
                debug!(agent = %id, error = %e, "stability write rejected");
            }
        }
    }

    if let Some((hazard, amount)) = eval.hazard {
        let cause = DamageCause::Hazard(hazard);
        match world.apply_damage(id, amount, cause) {
            Ok(()) => {
                report.damaged += 1;
                observer.on_damage(now, id, amount, cause);
            }
            Err(e) => {
                report.faults += 1;
                debug!(agent = %id, error = %e, "hazard damage rejected");
            }
        }
    }

    let mut punished = false;
    for consequence in eval.consequences {
        let result = match consequence {
            Consequence::Damage(amount) => world
                .apply_damage(id, amount, DamageCause::LowStability)
                .map(|()| observer.on_damage(now, id, amount, DamageCause::LowStability)),
            Consequence::Saturation(amount) => world.consume_saturation(id, amount),
        };
        match result {
            Ok(()) => punished = true,
            Err(e) => {
                report.faults += 1;
                debug!(agent = %id, error = %e, "low-stability consequence rejected");
            }
        }
    }
    if punished {
        report.punished += 1;
    }
}
