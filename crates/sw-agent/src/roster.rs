//! `AgentRoster` — an in-memory world.
//!
//! Owns the tracked-agent population and the mobile-hazard collection and
//! implements both [`AgentSource`] and [`StatusSink`], so the simulator can
//! run without a host game.  Agents live in a dense `Vec`; an id → slot map
//! keeps lookups O(1) and `leave` uses `swap_remove`, so snapshot order is
//! join order only until the first departure.
//!
//! Each record's max saturation follows the roster's [`SaturationRules`]
//! and is recomputed whenever the agent's age changes.

use sw_core::{AgentId, HazardId, Position3D, SwError, SwResult};
use sw_hazard::{HazardDefaults, MobileHazard};
use tracing::debug;

use crate::{
    AgentSource, AgentTraits, DamageCause, SaturationRules, Stability, StatusSink, TrackedAgent,
};

#[cfg(feature = "fx-hash")]
type IdMap<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
type IdMap<K, V> = std::collections::HashMap<K, V>;

/// Health of a freshly joined agent.
pub const START_HEALTH: f64 = 15.0;
/// Food saturation of a joining agent, capped by its max saturation.
pub const START_SATURATION: f64 = 1_500.0;

// ── AgentRecord ───────────────────────────────────────────────────────────────

/// One agent plus the ledgers the roster keeps on the world's behalf.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentRecord {
    pub agent:        TrackedAgent,
    /// Current health, never below 0.
    pub health:       f64,
    /// Current food saturation, within `[0, max_saturation]`.
    pub saturation:   f64,
    pub max_saturation: f64,
    /// Total damage received, by any cause.
    pub damage_taken: f64,
    /// Damage received from low-stability punishment only.
    pub punishment_taken: f64,
}

impl AgentRecord {
    fn new(agent: TrackedAgent, rules: &SaturationRules) -> Self {
        let max_saturation = rules.max_for(agent.traits.age_days);
        Self {
            agent,
            health:           START_HEALTH,
            saturation:       START_SATURATION.min(max_saturation),
            max_saturation,
            damage_taken:     0.0,
            punishment_taken: 0.0,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    fn refresh_max_saturation(&mut self, rules: &SaturationRules) {
        self.max_saturation = rules.max_for(self.agent.traits.age_days);
        self.saturation = self.saturation.min(self.max_saturation);
    }

    /// Back to age 0 with full health and the fresh-start saturation.
    fn restart(&mut self, rules: &SaturationRules, sheltered: bool) {
        let (saturation, max_saturation) = rules.fresh_start(sheltered);
        self.agent.traits.age_days = Some(0.0);
        self.health = START_HEALTH;
        self.saturation = saturation;
        self.max_saturation = max_saturation;
    }
}

// ── AgentRoster ───────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct AgentRoster {
    records:         Vec<AgentRecord>,
    index:           IdMap<AgentId, usize>,
    hazards:         Vec<MobileHazard>,
    hazard_feed:     bool,
    hazard_defaults: HazardDefaults,
    saturation:      SaturationRules,
}

impl Default for AgentRoster {
    fn default() -> Self {
        Self::new(HazardDefaults::default())
    }
}

impl AgentRoster {
    /// Empty roster.  Hazards spawned later take their damage shape from
    /// `hazard_defaults`.
    pub fn new(hazard_defaults: HazardDefaults) -> Self {
        Self {
            records: Vec::new(),
            index: IdMap::default(),
            hazards: Vec::new(),
            hazard_feed: true,
            hazard_defaults,
            saturation: SaturationRules::default(),
        }
    }

    /// Replace the saturation rules.  Affects agents that join or age
    /// afterwards.
    pub fn with_saturation(mut self, rules: SaturationRules) -> Self {
        self.saturation = rules;
        self
    }

    pub fn saturation_rules(&self) -> &SaturationRules {
        &self.saturation
    }

    // ── Agent lifecycle ───────────────────────────────────────────────────

    /// Start tracking `id` at `position` with full stability.
    ///
    /// Returns `false` (and changes nothing) if `id` is already tracked.
    pub fn join(&mut self, id: AgentId, position: Position3D) -> bool {
        self.join_agent(TrackedAgent::new(id, position))
    }

    /// Start tracking a fully specified agent.  Stability is already
    /// clamped by its type.
    pub fn join_agent(&mut self, agent: TrackedAgent) -> bool {
        if self.index.contains_key(&agent.id) {
            return false;
        }
        debug!(agent = %agent.id, position = %agent.position, "agent joined");
        self.index.insert(agent.id, self.records.len());
        self.records.push(AgentRecord::new(agent, &self.saturation));
        true
    }

    /// Start tracking an agent that has never played before: age 0 and the
    /// fresh-start saturation.  `sheltered` says whether `position` is
    /// inside the safe zone; spawning outside it means spawning hungry.
    pub fn join_new(&mut self, id: AgentId, position: Position3D, sheltered: bool) -> bool {
        if !self.join(id, position) {
            return false;
        }
        let rules = self.saturation;
        if let Ok(record) = self.get_mut(id) {
            record.restart(&rules, sheltered);
        }
        true
    }

    /// Bring a dead agent back at `position`.  Age, health, and saturation
    /// start over as in [`join_new`][Self::join_new].
    pub fn revive(&mut self, id: AgentId, position: Position3D, sheltered: bool) -> SwResult<()> {
        let rules = self.saturation;
        let record = self.get_mut(id)?;
        record.agent.position = position;
        record.restart(&rules, sheltered);
        debug!(agent = %id, %position, sheltered, "agent revived");
        Ok(())
    }

    /// Stop tracking `id`, returning its final record.
    pub fn leave(&mut self, id: AgentId) -> SwResult<AgentRecord> {
        let slot = self.index.remove(&id).ok_or(SwError::AgentNotFound(id))?;
        let record = self.records.swap_remove(slot);
        if let Some(moved) = self.records.get(slot) {
            self.index.insert(moved.agent.id, slot);
        }
        debug!(agent = %id, "agent left");
        Ok(record)
    }

    pub fn get(&self, id: AgentId) -> Option<&AgentRecord> {
        self.index.get(&id).map(|&slot| &self.records[slot])
    }

    fn get_mut(&mut self, id: AgentId) -> SwResult<&mut AgentRecord> {
        match self.index.get(&id) {
            Some(&slot) => Ok(&mut self.records[slot]),
            None => Err(SwError::AgentNotFound(id)),
        }
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[AgentRecord] {
        &self.records
    }

    pub fn move_agent(&mut self, id: AgentId, position: Position3D) -> SwResult<()> {
        self.get_mut(id)?.agent.position = position;
        Ok(())
    }

    /// Toggle whether the simulator evaluates this agent (e.g. on a game
    /// mode change).
    pub fn set_eligible(&mut self, id: AgentId, eligible: bool) -> SwResult<()> {
        self.get_mut(id)?.agent.eligible = eligible;
        Ok(())
    }

    pub fn set_traits(&mut self, id: AgentId, traits: AgentTraits) -> SwResult<()> {
        let rules = self.saturation;
        let record = self.get_mut(id)?;
        record.agent.traits = traits;
        record.refresh_max_saturation(&rules);
        Ok(())
    }

    /// Add `days` to every known age and recompute max saturation.  Agents
    /// with an unknown age stay unknown.
    pub fn advance_age(&mut self, days: f64) {
        if !days.is_finite() || days <= 0.0 {
            return;
        }
        for record in &mut self.records {
            if let Some(age) = record.agent.traits.age_days.as_mut() {
                *age += days;
                record.refresh_max_saturation(&self.saturation);
            }
        }
    }

    // ── Hazard lifecycle ──────────────────────────────────────────────────

    /// Spawn a hazard with the roster's default damage shape.  Returns
    /// `false` if `id` is already live.
    pub fn spawn_hazard(&mut self, id: HazardId, position: Position3D, size: f64) -> bool {
        if self.hazards.iter().any(|h| h.id == id) {
            return false;
        }
        debug!(hazard = %id, %position, size, "hazard spawned");
        self.hazards.push(MobileHazard::new(id, position, size, &self.hazard_defaults));
        true
    }

    pub fn despawn_hazard(&mut self, id: HazardId) -> SwResult<MobileHazard> {
        let slot = self.hazard_slot(id)?;
        debug!(hazard = %id, "hazard despawned");
        Ok(self.hazards.remove(slot))
    }

    pub fn move_hazard(&mut self, id: HazardId, position: Position3D) -> SwResult<()> {
        let slot = self.hazard_slot(id)?;
        self.hazards[slot].position = position;
        Ok(())
    }

    /// Change a hazard's size.  Size 0 makes it dormant without despawning.
    pub fn resize_hazard(&mut self, id: HazardId, size: f64) -> SwResult<()> {
        let slot = self.hazard_slot(id)?;
        self.hazards[slot].size = size;
        Ok(())
    }

    pub fn hazards(&self) -> &[MobileHazard] {
        &self.hazards
    }

    /// Simulate the hazard manager going away (`false`) or returning.
    pub fn set_hazard_feed(&mut self, available: bool) {
        self.hazard_feed = available;
    }

    fn hazard_slot(&self, id: HazardId) -> SwResult<usize> {
        self.hazards
            .iter()
            .position(|h| h.id == id)
            .ok_or(SwError::HazardNotFound(id))
    }
}

// ── World traits ──────────────────────────────────────────────────────────────

impl AgentSource for AgentRoster {
    fn current_agents(&self) -> Vec<TrackedAgent> {
        self.records.iter().map(|r| r.agent).collect()
    }

    fn agent(&self, id: AgentId) -> Option<TrackedAgent> {
        self.get(id).map(|r| r.agent)
    }

    fn current_hazards(&self) -> Option<Vec<MobileHazard>> {
        self.hazard_feed.then(|| self.hazards.clone())
    }
}

impl StatusSink for AgentRoster {
    fn set_stability(&mut self, agent: AgentId, value: Stability) -> SwResult<()> {
        self.get_mut(agent)?.agent.stability = value;
        Ok(())
    }

    fn apply_damage(&mut self, agent: AgentId, amount: f64, cause: DamageCause) -> SwResult<()> {
        let record = self.get_mut(agent)?;
        let amount = non_negative(amount);
        record.health = (record.health - amount).max(0.0);
        record.damage_taken += amount;
        if cause == DamageCause::LowStability {
            record.punishment_taken += amount;
        }
        Ok(())
    }

    fn consume_saturation(&mut self, agent: AgentId, amount: f64) -> SwResult<()> {
        let record = self.get_mut(agent)?;
        record.saturation = (record.saturation - non_negative(amount)).max(0.0);
        Ok(())
    }
}

#[inline]
fn non_negative(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}
