//! Configuration schema types for bindery.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod icons;
mod rebind;
mod storage;
mod system;
mod tracker;

pub use icons::*;
pub use rebind::*;
pub use storage::*;
pub use system::*;
pub use tracker::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for bindery.
///
/// All options have sensible defaults. Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct BinderyConfig {
    pub tracker: TrackerConfig,
    pub rebind: RebindConfig,
    pub storage: StorageConfig,
    pub icons: IconsConfig,
    pub layouts: Vec<LayoutEntry>,
    pub logging: LoggingConfig,
}
