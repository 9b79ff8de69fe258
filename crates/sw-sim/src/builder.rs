//! Fluent builder for constructing a [`Simulator`].

use sw_agent::ResistanceCurve;
use sw_core::{SimClock, Tick};
use sw_field::ConfigHandle;

use crate::{DamageAndHunger, LowStabilityPolicy, Simulator};

/// Fluent builder for [`Simulator`].
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                                        |
/// |---------------------|------------------------------------------------|
/// | `.policy(p)`        | [`DamageAndHunger`]                            |
/// | `.resistance(c)`    | `AgeResistance` from the config's `resistance` |
/// | `.start_tick(t)`    | `Tick(0)`                                      |
///
/// # Example
///
/// ```rust,ignore
/// let sim = SimBuilder::new(config)
///     .policy(NoPunishment)
///     .resistance(FixedResistance(0.1))
///     .build();
/// ```
pub struct SimBuilder {
    config:     ConfigHandle,
    policy:     Option<Box<dyn LowStabilityPolicy>>,
    resistance: Option<Box<dyn ResistanceCurve>>,
    start_tick: Tick,
}

impl SimBuilder {
    pub fn new(config: ConfigHandle) -> Self {
        Self {
            config,
            policy:     None,
            resistance: None,
            start_tick: Tick::ZERO,
        }
    }

    pub fn policy<P: LowStabilityPolicy + 'static>(mut self, policy: P) -> Self {
        self.policy = Some(Box::new(policy));
        self
    }

    /// Replace the config-driven age curve with a fixed strategy.
    pub fn resistance<C: ResistanceCurve + 'static>(mut self, curve: C) -> Self {
        self.resistance = Some(Box::new(curve));
        self
    }

    /// Resume numbering from `tick` (e.g. after a restart).
    pub fn start_tick(mut self, tick: Tick) -> Self {
        self.start_tick = tick;
        self
    }

    pub fn build(self) -> Simulator {
        let clock = SimClock { current_tick: self.start_tick, elapsed_secs: 0.0 };
        let policy = self.policy.unwrap_or_else(|| Box::new(DamageAndHunger));
        Simulator::from_parts(self.config, clock, policy, self.resistance)
    }
}
