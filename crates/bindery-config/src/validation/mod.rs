//! Full configuration validation.
//!
//! Validates numeric ranges, binding path syntax, and the layout table.
//! Each section has its own validator; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod helpers;
mod paths;
mod sections;

#[cfg(test)]
mod tests;

use crate::schema::BinderyConfig;
use bindery_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &BinderyConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    sections::validate_tracker(&mut errors, config);
    sections::validate_rebind(&mut errors, config);
    sections::validate_storage(&mut errors, config);
    sections::validate_layouts(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
