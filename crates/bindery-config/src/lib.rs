//! bindery configuration system.
//!
//! Provides TOML-based configuration for device tracking, interactive
//! rebinding, override persistence, icon maps and logging. All config
//! sections use sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use bindery_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("rebind timeout: {}s", config.rebind.timeout_secs);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

// Re-export core types for convenience
pub use schema::{BinderyConfig, CONFIG_SCHEMA_VERSION};

use bindery_common::ConfigError;

/// Convenience function to load config from the platform default path.
///
/// Loads `config.toml` from the OS config directory, creates a default
/// if none exists, and validates the result.
pub fn load_config() -> Result<BinderyConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}
