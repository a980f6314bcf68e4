//! Device tracker configuration types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Last-used-device tracking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Minimum time between two committed device changes (valid range: 0-5000).
    pub debounce_ms: u64,
    /// Collapse keyboard and mouse into one group, every gamepad into another.
    pub group_devices: bool,
    /// Layouts reported under another layout name for icon lookup.
    pub layout_redirects: BTreeMap<String, String>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        let mut layout_redirects = BTreeMap::new();
        layout_redirects.insert("Mouse".to_string(), "Keyboard".to_string());
        Self {
            debounce_ms: 100,
            group_devices: true,
            layout_redirects,
        }
    }
}
