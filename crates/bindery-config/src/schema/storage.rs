//! Override persistence configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where binding overrides are persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Key under which the override blob is stored.
    pub key: String,
    /// Backing file for the key-value store. Defaults to the platform data dir.
    pub file: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: "bindery.overrides".into(),
            file: None,
        }
    }
}
