//! Tests for the full validation pipeline.

use super::*;
use crate::schema::*;

#[test]
fn default_config_validates() {
    let config = BinderyConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_debounce_too_large() {
    let mut config = BinderyConfig::default();
    config.tracker.debounce_ms = 10_000;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("tracker.debounce_ms"));
}

#[test]
fn catches_negative_timeout() {
    let mut config = BinderyConfig::default();
    config.rebind.timeout_secs = -1.0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("rebind.timeout_secs"));
}

#[test]
fn zero_timeout_is_valid() {
    let mut config = BinderyConfig::default();
    config.rebind.timeout_secs = 0.0;
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_actuation_above_one() {
    let mut config = BinderyConfig::default();
    config.rebind.min_actuation = 1.5;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("rebind.min_actuation"));
}

#[test]
fn catches_malformed_cancel_path() {
    let mut config = BinderyConfig::default();
    config.rebind.cancel_paths = vec!["escape".into()];
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("rebind.cancel_paths[0]"));
}

#[test]
fn catches_empty_storage_key() {
    let mut config = BinderyConfig::default();
    config.storage.key = "  ".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("storage.key"));
}

#[test]
fn catches_self_based_layout() {
    let mut config = BinderyConfig::default();
    config.layouts.push(LayoutEntry {
        name: "Loop".into(),
        base: Some("loop".into()),
    });
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("based on itself"));
}

#[test]
fn catches_duplicate_layout() {
    let mut config = BinderyConfig::default();
    for _ in 0..2 {
        config.layouts.push(LayoutEntry {
            name: "ArcadeStick".into(),
            base: Some("Gamepad".into()),
        });
    }
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("declared twice"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = BinderyConfig::default();
    config.tracker.debounce_ms = 9999;
    config.storage.key.clear();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("tracker.debounce_ms"));
    assert!(err.contains("storage.key"));
    assert!(err.contains("; "));
}
