//! Icon map and device layout configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Icon map selection.
///
/// `priority` lists device layout names, most specific first. Maps found in
/// `directory` but absent from `priority` are appended in file name order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct IconsConfig {
    pub directory: Option<PathBuf>,
    pub priority: Vec<String>,
    pub fallback: Option<String>,
}

/// An extra entry in the device layout inheritance table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEntry {
    pub name: String,
    pub base: Option<String>,
}
