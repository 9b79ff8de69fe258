//! Unit tests for sw-agent.

use sw_core::{AgentId, HazardId, Position3D};

fn at(x: f64, z: f64) -> Position3D {
    Position3D::new(x, 0.0, z)
}

#[cfg(test)]
mod stability {
    use crate::Stability;
    use sw_core::SwError;

    #[test]
    fn new_clamps_every_input() {
        assert_eq!(Stability::new(1.7).get(), 1.0);
        assert_eq!(Stability::new(-0.2).get(), 0.0);
        assert_eq!(Stability::new(f64::NAN).get(), 0.0);
        assert_eq!(Stability::new(f64::INFINITY).get(), 1.0);
        assert_eq!(Stability::new(f64::NEG_INFINITY).get(), 0.0);
        assert_eq!(Stability::new(0.42).get(), 0.42);
    }

    #[test]
    fn try_new_rejects_instead_of_clamping() {
        assert!(matches!(Stability::try_new(1.5), Err(SwError::OutOfRange { .. })));
        assert!(matches!(Stability::try_new(-0.1), Err(SwError::OutOfRange { .. })));
        assert!(matches!(Stability::try_new(f64::NAN), Err(SwError::NonFinite { .. })));
        assert_eq!(Stability::try_new(0.0).unwrap(), Stability::EMPTY);
        assert_eq!(Stability::try_new(1.0).unwrap(), Stability::FULL);
    }

    #[test]
    fn drained_saturates_at_zero() {
        assert_eq!(Stability::new(0.01).drained(5.0), Stability::EMPTY);
        assert_eq!(Stability::new(0.5).drained(-5.0), Stability::FULL);
        assert!((Stability::FULL.drained(0.005).get() - 0.995).abs() < 1e-12);
    }

    #[test]
    fn percent_rounds() {
        assert_eq!(Stability::new(0.456).percent(), 46.0);
        assert_eq!(Stability::FULL.percent(), 100.0);
    }
}

#[cfg(test)]
mod resistance {
    use crate::{AgeResistance, AgentTraits, FixedResistance, NoResistance, ResistanceCurve};

    #[test]
    fn age_curve_keeps_growing_until_full_immunity() {
        let curve = AgeResistance::default();
        let m = |days| curve.modifier(&AgentTraits::with_age(days)).unwrap();
        assert_eq!(m(0.0), 0.0);
        assert!((m(15.0) - 0.15).abs() < 1e-12);
        assert!((m(30.0) - 0.3).abs() < 1e-12);
        assert!((m(60.0) - 0.6).abs() < 1e-12);
        assert_eq!(m(100.0), 1.0);
        assert_eq!(m(300.0), 1.0);
        assert_eq!(m(-5.0), 0.0);
    }

    #[test]
    fn unknown_age_has_no_modifier() {
        assert_eq!(AgeResistance::default().modifier(&AgentTraits::default()), None);
    }

    #[test]
    fn degenerate_curve_stays_in_unit_range() {
        let curve = AgeResistance { max_protection: 4.0, days_to_max: 0.0 };
        assert_eq!(curve.modifier(&AgentTraits::with_age(1.0)), Some(1.0));
        let nan_age = AgeResistance::default().modifier(&AgentTraits::with_age(f64::NAN));
        assert_eq!(nan_age, None);
    }

    #[test]
    fn fixed_and_none() {
        assert_eq!(FixedResistance(0.25).modifier(&AgentTraits::default()), Some(0.25));
        assert_eq!(FixedResistance(-1.0).modifier(&AgentTraits::default()), Some(0.0));
        assert_eq!(NoResistance.modifier(&AgentTraits::with_age(99.0)), None);
    }
}

#[cfg(test)]
mod roster {
    use super::*;
    use crate::roster::{START_HEALTH, START_SATURATION};
    use crate::{AgentRoster, AgentSource, AgentTraits, DamageCause, SaturationRules, Stability, StatusSink};
    use sw_core::SwError;

    #[test]
    fn join_is_idempotent() {
        let mut roster = AgentRoster::default();
        assert!(roster.join(AgentId(1), at(0.0, 0.0)));
        assert!(!roster.join(AgentId(1), at(5.0, 5.0)));
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.get(AgentId(1)).unwrap().agent.position, at(0.0, 0.0));
    }

    #[test]
    fn leave_keeps_index_consistent() {
        let mut roster = AgentRoster::default();
        for i in 0..4 {
            roster.join(AgentId(i), at(i as f64, 0.0));
        }
        let gone = roster.leave(AgentId(1)).unwrap();
        assert_eq!(gone.agent.id, AgentId(1));
        assert!(!roster.contains(AgentId(1)));
        // The swapped-in agent is still addressable.
        roster.move_agent(AgentId(3), at(30.0, 0.0)).unwrap();
        assert_eq!(roster.get(AgentId(3)).unwrap().agent.position, at(30.0, 0.0));
        assert_eq!(roster.current_agents().len(), 3);
    }

    #[test]
    fn unknown_agent_errors() {
        let mut roster = AgentRoster::default();
        assert!(matches!(roster.leave(AgentId(9)), Err(SwError::AgentNotFound(AgentId(9)))));
        assert!(roster.set_stability(AgentId(9), Stability::FULL).is_err());
        assert!(roster.apply_damage(AgentId(9), 1.0, DamageCause::LowStability).is_err());
        assert!(roster.set_eligible(AgentId(9), false).is_err());
    }

    #[test]
    fn damage_and_saturation_ledgers() {
        let mut roster = AgentRoster::default();
        roster.join(AgentId(0), at(0.0, 0.0));
        roster.apply_damage(AgentId(0), 2.0, DamageCause::Hazard(HazardId(3))).unwrap();
        roster.apply_damage(AgentId(0), 1.0, DamageCause::LowStability).unwrap();
        roster.apply_damage(AgentId(0), f64::NAN, DamageCause::LowStability).unwrap();
        roster.consume_saturation(AgentId(0), 10.0).unwrap();

        let r = roster.get(AgentId(0)).unwrap();
        assert_eq!(r.health, START_HEALTH - 3.0);
        assert_eq!(r.damage_taken, 3.0);
        assert_eq!(r.punishment_taken, 1.0);
        assert_eq!(r.saturation, START_SATURATION - 10.0);
    }

    #[test]
    fn join_caps_saturation_by_known_age() {
        let mut roster = AgentRoster::default();
        roster.join(AgentId(0), at(0.0, 0.0));
        let r = roster.get(AgentId(0)).unwrap();
        assert_eq!(r.max_saturation, 2_000.0);
        assert_eq!(r.saturation, START_SATURATION);

        let mut young = crate::TrackedAgent::new(AgentId(1), at(0.0, 0.0));
        young.traits = AgentTraits::with_age(15.0);
        roster.join_agent(young);
        assert_eq!(roster.get(AgentId(1)).unwrap().max_saturation, 2_250.0);
    }

    #[test]
    fn new_agents_start_hungry_outside_the_shelter() {
        let mut roster = AgentRoster::default();
        assert!(roster.join_new(AgentId(0), at(0.0, 0.0), true));
        assert!(roster.join_new(AgentId(1), at(9_000.0, 0.0), false));
        assert!(!roster.join_new(AgentId(1), at(0.0, 0.0), true));

        let sheltered = roster.get(AgentId(0)).unwrap();
        assert_eq!(sheltered.agent.traits.age_days, Some(0.0));
        assert_eq!(sheltered.saturation, 750.0);
        assert_eq!(sheltered.max_saturation, 1_500.0);

        let exposed = roster.get(AgentId(1)).unwrap();
        assert_eq!(exposed.saturation, 0.0);
        assert_eq!(exposed.agent.position, at(9_000.0, 0.0));
    }

    #[test]
    fn revive_starts_over() {
        let mut roster = AgentRoster::default();
        roster.join(AgentId(0), at(0.0, 0.0));
        roster.set_traits(AgentId(0), AgentTraits::with_age(40.0)).unwrap();
        roster.apply_damage(AgentId(0), 1e9, DamageCause::LowStability).unwrap();
        assert!(!roster.get(AgentId(0)).unwrap().is_alive());

        roster.revive(AgentId(0), at(5.0, 5.0), true).unwrap();
        let r = roster.get(AgentId(0)).unwrap();
        assert!(r.is_alive());
        assert_eq!(r.health, START_HEALTH);
        assert_eq!(r.agent.traits.age_days, Some(0.0));
        assert_eq!(r.agent.position, at(5.0, 5.0));
        assert_eq!(r.saturation, 750.0);
        assert_eq!(r.max_saturation, 1_500.0);
        // Ledgers survive death.
        assert_eq!(r.punishment_taken, 1e9);

        assert!(matches!(roster.revive(AgentId(9), at(0.0, 0.0), true), Err(SwError::AgentNotFound(_))));
    }

    #[test]
    fn aging_grows_max_saturation() {
        let mut roster = AgentRoster::default();
        roster.join_new(AgentId(0), at(0.0, 0.0), true);
        roster.join(AgentId(1), at(0.0, 0.0));
        roster.advance_age(15.0);
        assert_eq!(roster.get(AgentId(0)).unwrap().max_saturation, 2_250.0);
        // Unknown age stays unknown.
        assert_eq!(roster.get(AgentId(1)).unwrap().agent.traits.age_days, None);
        assert_eq!(roster.get(AgentId(1)).unwrap().max_saturation, 2_000.0);

        roster.advance_age(100.0);
        assert_eq!(roster.get(AgentId(0)).unwrap().max_saturation, 3_000.0);
        roster.advance_age(f64::NAN);
        assert_eq!(roster.get(AgentId(0)).unwrap().agent.traits.age_days, Some(115.0));
    }

    #[test]
    fn lowering_the_max_trims_saturation() {
        let rules = SaturationRules { join_max: 1_000.0, ..SaturationRules::default() };
        let mut roster = AgentRoster::default().with_saturation(rules);
        roster.join(AgentId(0), at(0.0, 0.0));
        assert_eq!(roster.get(AgentId(0)).unwrap().saturation, 1_000.0);
        roster.set_traits(AgentId(0), AgentTraits::with_age(0.0)).unwrap();
        let r = roster.get(AgentId(0)).unwrap();
        assert_eq!(r.max_saturation, 1_500.0);
        assert_eq!(r.saturation, 1_000.0);
        roster.set_traits(AgentId(0), AgentTraits::default()).unwrap();
        assert_eq!(roster.get(AgentId(0)).unwrap().max_saturation, 1_000.0);
    }

    #[test]
    fn agent_lookup_matches_snapshot() {
        let mut roster = AgentRoster::default();
        roster.join(AgentId(4), at(1.0, 2.0));
        assert_eq!(roster.agent(AgentId(4)).map(|a| a.position), Some(at(1.0, 2.0)));
        assert_eq!(roster.agent(AgentId(5)), None);
        assert_eq!(DamageCause::GearUse.to_string(), "gear_use");
    }

    #[test]
    fn health_never_negative() {
        let mut roster = AgentRoster::default();
        roster.join(AgentId(0), at(0.0, 0.0));
        roster.apply_damage(AgentId(0), 1e9, DamageCause::LowStability).unwrap();
        let r = roster.get(AgentId(0)).unwrap();
        assert_eq!(r.health, 0.0);
        assert!(!r.is_alive());
    }

    #[test]
    fn hazard_lifecycle() {
        let mut roster = AgentRoster::default();
        assert!(roster.spawn_hazard(HazardId(1), at(10.0, 0.0), 1.0));
        assert!(!roster.spawn_hazard(HazardId(1), at(20.0, 0.0), 1.0));
        roster.move_hazard(HazardId(1), at(11.0, 0.0)).unwrap();
        roster.resize_hazard(HazardId(1), 0.0).unwrap();
        let live = roster.current_hazards().unwrap();
        assert_eq!(live.len(), 1);
        assert!(!live[0].is_active());
        assert_eq!(live[0].damage_radius, 4.0);

        roster.despawn_hazard(HazardId(1)).unwrap();
        assert!(matches!(roster.despawn_hazard(HazardId(1)), Err(SwError::HazardNotFound(_))));
        assert_eq!(roster.current_hazards(), Some(Vec::new()));
    }

    #[test]
    fn hazard_feed_can_go_missing() {
        let mut roster = AgentRoster::default();
        roster.set_hazard_feed(false);
        assert!(roster.current_hazards().is_none());
        roster.set_hazard_feed(true);
        assert!(roster.current_hazards().is_some());
    }
}

#[cfg(test)]
mod saturation {
    use crate::SaturationRules;

    #[test]
    fn max_grows_with_age_then_caps() {
        let rules = SaturationRules::default();
        assert_eq!(rules.max_for(None), 2_000.0);
        assert_eq!(rules.max_for(Some(f64::NAN)), 2_000.0);
        assert_eq!(rules.max_for(Some(0.0)), 1_500.0);
        assert_eq!(rules.max_for(Some(15.0)), 2_250.0);
        assert_eq!(rules.max_for(Some(30.0)), 3_000.0);
        assert_eq!(rules.max_for(Some(300.0)), 3_000.0);
        assert_eq!(rules.max_for(Some(-3.0)), 1_500.0);
    }

    #[test]
    fn fresh_start_depends_on_shelter() {
        let rules = SaturationRules::default();
        assert_eq!(rules.fresh_start(true), (750.0, 1_500.0));
        assert_eq!(rules.fresh_start(false), (0.0, 1_500.0));
    }
}

#[cfg(test)]
mod properties {
    use crate::Stability;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn repeated_drain_stays_in_range(
            start in -10.0f64..10.0,
            drains in proptest::collection::vec(-5.0f64..5.0, 0..200),
        ) {
            let mut s = Stability::new(start);
            for d in drains {
                s = s.drained(d);
                prop_assert!((0.0..=1.0).contains(&s.get()));
            }
        }
    }
}
