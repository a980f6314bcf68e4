//! Interactive rebind configuration types.

use serde::{Deserialize, Serialize};

/// Interactive rebind behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RebindConfig {
    /// Controls that abort a capture immediately.
    pub cancel_paths: Vec<String>,
    /// Seconds without a qualifying input before the capture times out.
    /// `0` disables the timeout (valid range: 0-120).
    pub timeout_secs: f64,
    /// Minimum actuation magnitude for a control to be captured (valid range: 0.0-1.0).
    pub min_actuation: f32,
    /// Controls that are never captured (pointer motion and similar).
    pub excluded_paths: Vec<String>,
    /// Refuse a capture already used by another binding in the same action map.
    pub reject_duplicates: bool,
}

impl Default for RebindConfig {
    fn default() -> Self {
        Self {
            cancel_paths: vec!["<Keyboard>/escape".into()],
            timeout_secs: 5.0,
            min_actuation: 0.5,
            excluded_paths: vec![
                "<Mouse>/position".into(),
                "<Mouse>/delta".into(),
                "<Mouse>/scroll".into(),
            ],
            reject_duplicates: false,
        }
    }
}
