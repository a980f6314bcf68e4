//! Validation for each config section: tracker, rebind, storage, layouts.

use std::collections::HashSet;

use crate::schema::BinderyConfig;

use super::helpers::{validate_range, validate_range_f64};
use super::paths::validate_binding_paths;

/// Validate tracker constraints.
pub(crate) fn validate_tracker(errors: &mut Vec<String>, config: &BinderyConfig) {
    validate_range(
        errors,
        "tracker.debounce_ms",
        config.tracker.debounce_ms,
        0,
        5000,
    );
    for (from, to) in &config.tracker.layout_redirects {
        if from.is_empty() || to.is_empty() {
            errors.push(format!(
                "tracker.layout_redirects entry '{from}' -> '{to}' has an empty layout name"
            ));
        }
    }
}

/// Validate rebind constraints.
pub(crate) fn validate_rebind(errors: &mut Vec<String>, config: &BinderyConfig) {
    validate_range_f64(
        errors,
        "rebind.timeout_secs",
        config.rebind.timeout_secs,
        0.0,
        120.0,
    );
    validate_range_f64(
        errors,
        "rebind.min_actuation",
        f64::from(config.rebind.min_actuation),
        0.0,
        1.0,
    );
    validate_binding_paths(errors, "rebind.cancel_paths", &config.rebind.cancel_paths);
    validate_binding_paths(
        errors,
        "rebind.excluded_paths",
        &config.rebind.excluded_paths,
    );
}

/// Validate storage constraints.
pub(crate) fn validate_storage(errors: &mut Vec<String>, config: &BinderyConfig) {
    if config.storage.key.trim().is_empty() {
        errors.push("storage.key must not be empty".into());
    }
}

/// Validate extra layout table entries.
pub(crate) fn validate_layouts(errors: &mut Vec<String>, config: &BinderyConfig) {
    let mut seen = HashSet::new();
    for entry in &config.layouts {
        if entry.name.is_empty() {
            errors.push("layouts entry has an empty name".into());
            continue;
        }
        if !seen.insert(entry.name.to_lowercase()) {
            errors.push(format!("layouts entry '{}' is declared twice", entry.name));
        }
        if let Some(base) = &entry.base {
            if base.eq_ignore_ascii_case(&entry.name) {
                errors.push(format!("layouts entry '{}' is based on itself", entry.name));
            }
        }
    }
}
