use std::collections::HashMap;

use bindery_common::IconMapError;
use serde::{Deserialize, Serialize};

use crate::path::normalize_control_path;

/// Opaque reference to an icon asset. Rendering is someone else's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconHandle(pub String);

/// One control's icon and fallback text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconMapping {
    /// Control path without device prefix, e.g. `buttonSouth`.
    #[serde(rename = "control")]
    pub control_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconHandle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl IconMapping {
    pub fn new(control_path: impl Into<String>) -> Self {
        Self {
            control_path: control_path.into(),
            icon: None,
            text: None,
        }
    }

    pub fn icon(mut self, handle: impl Into<String>) -> Self {
        self.icon = Some(IconHandle(handle.into()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// The result of looking a control up in an icon map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIcon {
    pub icon: Option<IconHandle>,
    pub text: String,
}

/// On-disk shape of an icon map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconMapFile {
    pub layout: String,
    #[serde(default)]
    pub entries: Vec<IconMapping>,
}

/// Immutable control-path → icon table for one device layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IconMapFile", into = "IconMapFile")]
pub struct IconMap {
    layout: String,
    entries: Vec<IconMapping>,
    /// Lowercased control path -> entry index.
    index: HashMap<String, usize>,
}

impl IconMap {
    /// Build a map, rejecting control paths that collide case-insensitively.
    pub fn new(layout: impl Into<String>, entries: Vec<IconMapping>) -> Result<Self, IconMapError> {
        let layout = layout.into();
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            let key = normalize_control_path(&entry.control_path).to_lowercase();
            if index.insert(key, i).is_some() {
                return Err(IconMapError::DuplicateControl {
                    layout,
                    path: entry.control_path.clone(),
                });
            }
        }
        Ok(Self {
            layout,
            entries,
            index,
        })
    }

    pub fn layout(&self) -> &str {
        &self.layout
    }

    pub fn entries(&self) -> &[IconMapping] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, control_path: &str) -> Option<&IconMapping> {
        let key = normalize_control_path(control_path).to_lowercase();
        self.index.get(&key).map(|&i| &self.entries[i])
    }

    /// Icon and text for a control. Misses, and hits without text, fall back
    /// to the normalized control path as text.
    pub fn lookup(&self, control_path: &str) -> ResolvedIcon {
        let normalized = normalize_control_path(control_path);
        match self.get(normalized) {
            Some(entry) => ResolvedIcon {
                icon: entry.icon.clone(),
                text: entry
                    .text
                    .clone()
                    .unwrap_or_else(|| normalized.to_string()),
            },
            None => ResolvedIcon {
                icon: None,
                text: normalized.to_string(),
            },
        }
    }
}

impl TryFrom<IconMapFile> for IconMap {
    type Error = IconMapError;

    fn try_from(file: IconMapFile) -> Result<Self, Self::Error> {
        IconMap::new(file.layout, file.entries)
    }
}

impl From<IconMap> for IconMapFile {
    fn from(map: IconMap) -> Self {
        IconMapFile {
            layout: map.layout,
            entries: map.entries,
        }
    }
}
