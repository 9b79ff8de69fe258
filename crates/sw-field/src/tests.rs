//! Unit tests for sw-field.

use sw_core::Position3D;

use crate::{FieldConfig, StormConfig, VerticalGate};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn ring(inner: f64, outer: f64) -> FieldConfig {
    FieldConfig {
        reference_point: Some(Position3D::ORIGIN),
        inner_radius: inner,
        outer_radius: outer,
        ..FieldConfig::default()
    }
}

fn at(x: f64, z: f64) -> Position3D {
    Position3D::new(x, 64.0, z)
}

// ── intensity ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod intensity_tests {
    use super::*;
    use crate::{HazardField, band_intensity, intensity};

    #[test]
    fn default_ring_scenarios() {
        let cfg = ring(2000.0, 3000.0);
        assert!((intensity(at(2500.0, 0.0), &cfg) - 0.5).abs() < 1e-12);
        assert_eq!(intensity(at(1500.0, 0.0), &cfg), 0.0);
        assert_eq!(intensity(at(3500.0, 0.0), &cfg), 1.0);
    }

    #[test]
    fn band_edges() {
        let cfg = ring(2000.0, 3000.0);
        assert_eq!(intensity(at(2000.0, 0.0), &cfg), 0.0);
        assert_eq!(intensity(at(3000.0, 0.0), &cfg), 1.0);
    }

    #[test]
    fn planar_only() {
        let cfg = ring(10.0, 20.0);
        let low = Position3D::new(15.0, -500.0, 0.0);
        let high = Position3D::new(15.0, 500.0, 0.0);
        assert_eq!(intensity(low, &cfg), intensity(high, &cfg));
    }

    #[test]
    fn linear_in_true_distance_along_diagonal() {
        let cfg = ring(0.0, 10.0);
        // (3, 4) is 5 units away.
        assert!((intensity(at(3.0, 4.0), &cfg) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn no_reference_point_is_zero() {
        let cfg = FieldConfig::default();
        assert!(cfg.reference_point.is_none());
        assert_eq!(intensity(at(1e9, 1e9), &cfg), 0.0);
    }

    #[test]
    fn collapsed_band_never_divides_by_zero() {
        assert_eq!(band_intensity(100.0, 5.0, 5.0), 1.0);
        assert_eq!(band_intensity(25.0, 5.0, 5.0), 0.0);
        // Inverted: never negative, never above 1.
        for d2 in [0.0, 4.0, 16.0, 36.0, 1e12] {
            let v = band_intensity(d2, 5.0, 2.0);
            assert!((0.0..=1.0).contains(&v), "d2={d2} gave {v}");
        }
    }

    #[test]
    fn non_finite_distances() {
        assert_eq!(band_intensity(f64::NAN, 1.0, 2.0), 0.0);
        assert_eq!(band_intensity(f64::INFINITY, 1.0, 2.0), 1.0);
    }

    #[test]
    fn precomputed_field_matches_free_function() {
        let cfg = ring(2000.0, 3000.0);
        let field = HazardField::new(&cfg).unwrap();
        for x in [0.0, 1999.0, 2000.0, 2000.5, 2400.0, 2999.0, 3000.0, 9000.0] {
            assert_eq!(field.intensity(at(x, 0.0)), intensity(at(x, 0.0), &cfg));
        }
        assert!(field.intensity(at(2001.0, 0.0)) > 0.0);
        assert_eq!(field.intensity(at(2000.0, 0.0)), 0.0);
    }

    #[test]
    fn precomputed_field_needs_reference() {
        assert!(HazardField::new(&FieldConfig::default()).is_none());
    }
}

// ── validation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod validation_tests {
    use super::*;
    use crate::ConfigWarning;

    #[test]
    fn defaults_are_clean() {
        let (cfg, warnings) = StormConfig::default().validated();
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(cfg, StormConfig::default());
    }

    #[test]
    fn outer_not_past_inner_is_bumped() {
        let (cfg, warnings) = ring(2000.0, 1500.0).validated();
        assert_eq!(cfg.outer_radius, 2001.0);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field(), "field.outer_radius");

        let (cfg, _) = ring(2000.0, 2000.0).validated();
        assert_eq!(cfg.outer_radius, 2001.0);
    }

    #[test]
    fn negative_and_nan_radii_are_corrected() {
        let (cfg, warnings) = ring(-5.0, f64::NAN).validated();
        assert_eq!(cfg.inner_radius, 0.0);
        assert_eq!(cfg.outer_radius, 1.0);
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn non_finite_reference_point_is_dropped() {
        let mut cfg = ring(1.0, 2.0);
        cfg.reference_point = Some(Position3D::new(f64::NAN, 0.0, 0.0));
        let (cfg, warnings) = cfg.validated();
        assert!(cfg.reference_point.is_none());
        assert!(matches!(warnings[0], ConfigWarning::DroppedReferencePoint { .. }));
    }

    #[test]
    fn negative_drain_is_zeroed() {
        let mut cfg = ring(1.0, 2.0);
        cfg.drain_rate_per_second = -0.5;
        let (cfg, _) = cfg.validated();
        assert_eq!(cfg.drain_rate_per_second, 0.0);
    }

    #[test]
    fn nan_gate_altitude_falls_back_to_ignore() {
        let mut cfg = ring(1.0, 2.0);
        cfg.vertical_gate = VerticalGate::MinAltitude(f64::NAN);
        let (cfg, warnings) = cfg.validated();
        assert_eq!(cfg.vertical_gate, VerticalGate::Ignore);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn whole_document_sections_are_clamped() {
        let mut doc = StormConfig::default();
        doc.punishment.threshold = 3.0;
        doc.environment.storm_rainfall = -1.0;
        doc.resistance.days_to_max = 0.0;
        doc.simulation.tick_interval_secs = f64::INFINITY;
        doc.hazard.damage_radius = -4.0;
        let (cfg, warnings) = doc.validated();
        assert_eq!(cfg.punishment.threshold, 1.0);
        assert_eq!(cfg.environment.storm_rainfall, 0.0);
        assert_eq!(cfg.resistance.days_to_max, 30.0);
        assert_eq!(cfg.simulation.tick_interval_secs, 1.0);
        assert_eq!(cfg.hazard.damage_radius, 0.0);
        assert_eq!(warnings.len(), 5);
    }

    #[test]
    fn gear_and_saturation_sections_are_corrected() {
        let mut doc = StormConfig::default();
        doc.gear.stability_per_use = 4.0;
        doc.gear.damage_per_use = f64::NAN;
        doc.saturation.base_max = -1.0;
        doc.saturation.days_to_full_bonus = 0.0;
        let (cfg, warnings) = doc.validated();
        assert_eq!(cfg.gear.stability_per_use, 1.0);
        assert_eq!(cfg.gear.damage_per_use, 0.0);
        assert_eq!(cfg.saturation.base_max, 1_500.0);
        assert_eq!(cfg.saturation.days_to_full_bonus, 30.0);
        let fields: Vec<_> = warnings.iter().map(ConfigWarning::field).collect();
        assert_eq!(
            fields,
            ["gear.stability_per_use", "gear.damage_per_use", "saturation.base_max", "saturation.days_to_full_bonus"]
        );
    }

    #[test]
    fn warning_display_names_the_field() {
        let (_, warnings) = ring(10.0, 5.0).validated();
        let text = warnings[0].to_string();
        assert!(text.contains("field.outer_radius"), "{text}");
        assert!(text.contains("11"), "{text}");
    }
}

// ── gate ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod gate_tests {
    use super::*;
    use crate::{ConfigHandle, PlacementGate, in_safe_zone, is_outside_safe_zone, within_inner_radius};

    #[test]
    fn outside_is_strictly_past_inner() {
        let cfg = ring(100.0, 200.0);
        assert!(!is_outside_safe_zone(at(100.0, 0.0), &cfg));
        assert!(is_outside_safe_zone(at(100.01, 0.0), &cfg));
    }

    #[test]
    fn safe_zone_respects_vertical_gate() {
        let mut cfg = ring(100.0, 200.0);
        cfg.vertical_gate = VerticalGate::MinAltitude(62.0);
        assert!(in_safe_zone(Position3D::new(0.0, 70.0, 0.0), &cfg));
        assert!(!in_safe_zone(Position3D::new(0.0, 10.0, 0.0), &cfg));
        assert!(!in_safe_zone(Position3D::new(150.0, 70.0, 0.0), &cfg));
    }

    #[test]
    fn inner_radius_check_is_planar() {
        let mut cfg = ring(100.0, 200.0);
        cfg.vertical_gate = VerticalGate::MinAltitude(62.0);
        assert!(within_inner_radius(Position3D::new(0.0, 10.0, 0.0), &cfg));
        assert!(!within_inner_radius(Position3D::new(150.0, 70.0, 0.0), &cfg));
    }

    #[test]
    fn nothing_is_safe_without_reference() {
        assert!(!in_safe_zone(at(0.0, 0.0), &FieldConfig::default()));
        assert!(!within_inner_radius(at(0.0, 0.0), &FieldConfig::default()));
    }

    #[test]
    fn placement_denied_inside_allowed_outside() {
        let (handle, _) = ConfigHandle::new(StormConfig { field: ring(2000.0, 3000.0), ..StormConfig::default() });
        let gate = PlacementGate::new(handle);
        assert!(!gate.allows(at(10.0, 10.0)));
        assert!(gate.allows(at(2500.0, 0.0)));
        assert!(gate.allows(at(0.0, -5000.0)));
    }

    #[test]
    fn placement_ignores_altitude() {
        let mut field = ring(100.0, 200.0);
        field.vertical_gate = VerticalGate::MinAltitude(62.0);
        let (handle, _) = ConfigHandle::new(StormConfig { field, ..StormConfig::default() });
        let gate = PlacementGate::new(handle);
        assert!(!gate.allows(Position3D::new(0.0, -30.0, 0.0)));
    }

    #[test]
    fn placement_denied_without_reference() {
        let (handle, _) = ConfigHandle::new(StormConfig::default());
        let gate = PlacementGate::new(handle);
        assert!(!gate.allows(at(1e6, 0.0)));
    }

    #[test]
    fn gate_follows_handle_updates() {
        let (handle, _) = ConfigHandle::new(StormConfig { field: ring(2000.0, 3000.0), ..StormConfig::default() });
        let gate = PlacementGate::new(handle.clone());
        assert!(!gate.allows(at(500.0, 0.0)));
        handle.replace_field(ring(100.0, 200.0));
        assert!(gate.allows(at(500.0, 0.0)));
    }

    #[test]
    fn batch_query_uses_one_snapshot() {
        let (handle, _) = ConfigHandle::new(StormConfig { field: ring(10.0, 20.0), ..StormConfig::default() });
        let gate = PlacementGate::new(handle);
        let spots = [at(0.0, 0.0), at(15.0, 0.0), at(50.0, 0.0)];
        assert_eq!(gate.allows_all(&spots), vec![false, true, true]);
    }
}

// ── handle ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod handle_tests {
    use super::*;
    use crate::ConfigHandle;

    #[test]
    fn new_validates() {
        let (handle, warnings) = ConfigHandle::new(StormConfig { field: ring(50.0, 10.0), ..StormConfig::default() });
        assert_eq!(warnings.len(), 1);
        assert_eq!(handle.snapshot().field.outer_radius, 51.0);
    }

    #[test]
    fn held_snapshot_is_isolated_from_replacement() {
        let (handle, _) = ConfigHandle::new(StormConfig { field: ring(10.0, 20.0), ..StormConfig::default() });
        let before = handle.snapshot();
        handle.replace_field(ring(100.0, 200.0));
        assert_eq!(before.field.inner_radius, 10.0);
        assert_eq!(handle.snapshot().field.inner_radius, 100.0);
    }

    #[test]
    fn replace_field_keeps_other_sections() {
        let mut doc = StormConfig::default();
        doc.punishment.damage_per_second = 2.0;
        let (handle, _) = ConfigHandle::new(doc);
        handle.replace_field(ring(1.0, 2.0));
        assert_eq!(handle.snapshot().punishment.damage_per_second, 2.0);
    }

    #[test]
    fn replace_returns_corrections() {
        let (handle, _) = ConfigHandle::new(StormConfig::default());
        let mut doc = StormConfig::default();
        doc.field.drain_rate_per_second = f64::NAN;
        let warnings = handle.replace(doc);
        assert_eq!(warnings.len(), 1);
        assert_eq!(handle.with(|c| c.field.drain_rate_per_second), 0.0);
    }

    #[test]
    fn clones_share_state_across_threads() {
        let (handle, _) = ConfigHandle::new(StormConfig::default());
        let writer = handle.clone();
        std::thread::spawn(move || {
            writer.replace_field(ring(7.0, 8.0));
        })
        .join()
        .unwrap();
        assert_eq!(handle.snapshot().field.inner_radius, 7.0);
    }
}

// ── persistence ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod persist_tests {
    use super::*;
    use crate::{load, load_or_create, load_reader, store};

    #[test]
    fn load_or_create_writes_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storm.json");

        let first = load_or_create(&path).unwrap();
        assert!(first.created);
        assert!(path.exists());
        assert_eq!(first.config, StormConfig::default());

        let second = load_or_create(&path).unwrap();
        assert!(!second.created);
        assert_eq!(second.config, StormConfig::default());
    }

    #[test]
    fn store_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storm.json");
        let mut doc = StormConfig::default();
        doc.field = ring(500.0, 750.0);
        doc.field.vertical_gate = VerticalGate::MinAltitude(62.0);
        store(&path, &doc).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded.config, doc);
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn partial_document_takes_defaults() {
        let json = r#"{ "field": { "inner_radius": 10.0, "outer_radius": 20.0 } }"#;
        let loaded = load_reader(json.as_bytes()).unwrap();
        assert_eq!(loaded.config.field.inner_radius, 10.0);
        assert_eq!(loaded.config.field.drain_rate_per_second, 0.005);
        assert_eq!(loaded.config.punishment.saturation_cost_per_second, 10.0);
        assert_eq!(loaded.config.gear.stability_per_use, 1.0);
        assert_eq!(loaded.config.saturation.join_max, 2_000.0);
    }

    #[test]
    fn gear_and_saturation_sections_load_by_name() {
        let json = r#"{
            "gear": { "damage_per_use": 2.5 },
            "saturation": { "age_bonus": 500.0 }
        }"#;
        let loaded = load_reader(json.as_bytes()).unwrap();
        assert_eq!(loaded.config.gear.damage_per_use, 2.5);
        assert_eq!(loaded.config.gear.stability_per_use, 1.0);
        assert_eq!(loaded.config.saturation.age_bonus, 500.0);
        assert_eq!(loaded.config.saturation.base_max, 1_500.0);
    }

    #[test]
    fn loaded_values_are_validated() {
        let json = r#"{ "field": { "inner_radius": 3000.0, "outer_radius": 2000.0 } }"#;
        let loaded = load_reader(json.as_bytes()).unwrap();
        assert_eq!(loaded.config.field.outer_radius, 3001.0);
        assert_eq!(loaded.warnings.len(), 1);
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(load_reader("{ not json".as_bytes()).is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, crate::FieldError::Io(_)));
    }
}

// ── properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::{band_intensity, intensity};
    use proptest::prelude::*;

    fn radius() -> impl Strategy<Value = f64> {
        prop_oneof![
            Just(f64::NAN),
            Just(f64::INFINITY),
            Just(f64::NEG_INFINITY),
            -1e9f64..1e9,
        ]
    }

    proptest! {
        #[test]
        fn intensity_is_bounded(
            x in -1e6f64..1e6,
            z in -1e6f64..1e6,
            inner in -100.0f64..5000.0,
            outer in -100.0f64..5000.0,
        ) {
            let v = intensity(at(x, z), &ring(inner, outer));
            prop_assert!((0.0..=1.0).contains(&v));
        }

        #[test]
        fn intensity_is_monotone_in_distance(
            a in 0.0f64..10_000.0,
            b in 0.0f64..10_000.0,
            inner in 0.0f64..4000.0,
            width in 1.0f64..4000.0,
        ) {
            let (cfg, _) = ring(inner, inner + width).validated();
            let (near, far) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(intensity(at(near, 0.0), &cfg) <= intensity(at(far, 0.0), &cfg));
        }

        #[test]
        fn band_edges_hold(inner in 0.0f64..4000.0, width in 1.0f64..4000.0, d in 0.0f64..20_000.0) {
            let outer = inner + width;
            let v = band_intensity(d * d, inner, outer);
            if d <= inner {
                prop_assert_eq!(v, 0.0);
            }
            if d >= outer {
                prop_assert_eq!(v, 1.0);
            }
        }

        #[test]
        fn validation_always_orders_radii(inner in radius(), outer in radius()) {
            let (cfg, _) = ring(inner, outer).validated();
            prop_assert!(cfg.inner_radius.is_finite() && cfg.inner_radius >= 0.0);
            prop_assert!(cfg.outer_radius > cfg.inner_radius);
        }
    }
}
