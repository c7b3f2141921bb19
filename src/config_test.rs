#![allow(clippy::float_cmp)]

use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn from_lookup_empty_uses_defaults() {
    let cfg = EngineConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, EngineConfig::default());
    assert_eq!(cfg.grid_size, 10.0);
    assert!(cfg.snap_to_grid);
    assert_eq!(cfg.min_scale, 1.0);
    assert_eq!(cfg.max_scale, 5.0);
}

#[test]
fn from_lookup_parses_overrides() {
    let cfg = EngineConfig::from_lookup(lookup_from(&[
        ("MAPMAKER_GRID_SIZE", "32"),
        ("MAPMAKER_SNAP_TO_GRID", "false"),
        ("MAPMAKER_MIN_SCALE", "0.5"),
        ("MAPMAKER_MAX_SCALE", "8"),
        ("MAPMAKER_ZOOM_STEP", "0.25"),
        ("MAPMAKER_HANDLE_TOLERANCE_PX", "7"),
        ("MAPMAKER_HIT_TOLERANCE_PX", "3"),
        ("MAPMAKER_TOKEN_RADIUS", "12"),
    ]))
    .unwrap();
    assert_eq!(cfg.grid_size, 32.0);
    assert!(!cfg.snap_to_grid);
    assert_eq!(cfg.min_scale, 0.5);
    assert_eq!(cfg.max_scale, 8.0);
    assert_eq!(cfg.zoom_step, 0.25);
    assert_eq!(cfg.handle_tolerance_px, 7.0);
    assert_eq!(cfg.hit_tolerance_px, 3.0);
    assert_eq!(cfg.token_radius, 12.0);
}

#[test]
fn from_lookup_unparseable_number_falls_back() {
    let cfg = EngineConfig::from_lookup(lookup_from(&[("MAPMAKER_GRID_SIZE", "wide"), ("MAPMAKER_ZOOM_STEP", "NaN")])).unwrap();
    assert_eq!(cfg.grid_size, 10.0);
    assert_eq!(cfg.zoom_step, 0.1);
}

#[test]
fn from_lookup_rejects_unknown_bool() {
    let err = EngineConfig::from_lookup(lookup_from(&[("MAPMAKER_SNAP_TO_GRID", "maybe")])).unwrap_err();
    assert!(matches!(err, MapError::InvalidConfig(_)));
}

#[test]
fn from_lookup_rejects_inverted_scale_bounds() {
    let err =
        EngineConfig::from_lookup(lookup_from(&[("MAPMAKER_MIN_SCALE", "6"), ("MAPMAKER_MAX_SCALE", "2")])).unwrap_err();
    assert!(err.to_string().contains("scale bounds"));
}

#[test]
fn validate_rejects_non_finite_scale_bounds() {
    let cfg = EngineConfig { max_scale: f64::INFINITY, ..EngineConfig::default() };
    assert!(matches!(cfg.validate(), Err(MapError::InvalidConfig(_))));
    let cfg = EngineConfig { min_scale: f64::NAN, ..EngineConfig::default() };
    assert!(matches!(cfg.validate(), Err(MapError::InvalidConfig(_))));
}

#[test]
fn validate_rejects_zero_grid() {
    let cfg = EngineConfig { grid_size: 0.0, ..EngineConfig::default() };
    assert!(matches!(cfg.validate(), Err(MapError::InvalidConfig(_))));
}

#[test]
fn validate_rejects_negative_tolerance() {
    let cfg = EngineConfig { hit_tolerance_px: -1.0, ..EngineConfig::default() };
    assert!(cfg.validate().is_err());
}

#[test]
fn validate_accepts_defaults() {
    assert!(EngineConfig::default().validate().is_ok());
}
