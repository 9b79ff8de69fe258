//! Collaborator traits between the simulator and the world it runs in.

use sw_core::{AgentId, SwResult};
use sw_hazard::MobileHazard;

use crate::{DamageCause, Stability, TrackedAgent};

/// Read-only snapshot provider, queried once per tick.
pub trait AgentSource {
    /// Every currently tracked agent, eligible or not.
    fn current_agents(&self) -> Vec<TrackedAgent>;

    /// One agent by id.  The default scans [`current_agents`][Self::current_agents].
    fn agent(&self, id: AgentId) -> Option<TrackedAgent> {
        self.current_agents().into_iter().find(|a| a.id == id)
    }

    /// The live mobile-hazard collection, or `None` if the hazard manager
    /// is unavailable this tick.  An empty `Vec` means "available, no
    /// hazards".
    fn current_hazards(&self) -> Option<Vec<MobileHazard>>;
}

/// The only mutation surface the simulator uses on agent state.
///
/// Every method reports [`SwError::AgentNotFound`][sw_core::SwError] for an
/// agent that left between snapshot and write-back; the simulator treats
/// that as a local, per-agent fault.
pub trait StatusSink {
    fn set_stability(&mut self, agent: AgentId, value: Stability) -> SwResult<()>;

    /// Apply `amount` health damage.  The sink owns health semantics
    /// (armour, death, …); the simulator only supplies the magnitude.
    fn apply_damage(&mut self, agent: AgentId, amount: f64, cause: DamageCause) -> SwResult<()>;

    /// Drain `amount` from the agent's food saturation.  Worlds without a
    /// hunger model may ignore it.
    fn consume_saturation(&mut self, _agent: AgentId, _amount: f64) -> SwResult<()> {
        Ok(())
    }
}

/// A world the simulator can run against.
pub trait World: AgentSource + StatusSink {}

impl<T: AgentSource + StatusSink> World for T {}
