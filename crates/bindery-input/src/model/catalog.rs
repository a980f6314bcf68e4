use std::path::Path;

use bindery_common::{ActionId, BinderyError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::action::Action;

fn enabled_by_default() -> bool {
    true
}

/// A named, enable-able set of actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionMap {
    pub name: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl ActionMap {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            actions: Vec::new(),
        }
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }
}

/// A control scheme: a display name plus the binding group it selects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlScheme {
    pub name: String,
    pub binding_group: String,
}

impl ControlScheme {
    pub fn new(name: impl Into<String>, binding_group: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            binding_group: binding_group.into(),
        }
    }
}

/// Where an action lives inside an [`InputCatalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionLocation {
    Mapped { map: usize, action: usize },
    Runtime(usize),
}

/// The full set of actions the application knows about.
///
/// Static actions live in action maps loaded with the catalog. Runtime
/// actions are created and disposed by name while the application runs
/// and are never serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputCatalog {
    #[serde(default)]
    pub maps: Vec<ActionMap>,
    #[serde(default)]
    pub control_schemes: Vec<ControlScheme>,
    #[serde(skip)]
    runtime: Vec<Action>,
}

impl InputCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_map(mut self, map: ActionMap) -> Self {
        self.maps.push(map);
        self
    }

    pub fn with_scheme(mut self, scheme: ControlScheme) -> Self {
        self.control_schemes.push(scheme);
        self
    }

    /// Load a catalog from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self, BinderyError> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            BinderyError::Catalog(format!("failed to parse {}: {e}", path.display()))
        })
    }

    /// Find an action by id, by `"Map/Action"`, or by bare name.
    ///
    /// Bare names resolve to the first mapped action with that name, then to
    /// runtime actions.
    pub fn find(&self, key: &str) -> Option<ActionLocation> {
        if key.is_empty() {
            return None;
        }
        for (m, map) in self.maps.iter().enumerate() {
            for (a, action) in map.actions.iter().enumerate() {
                if action.id.as_str() == key {
                    return Some(ActionLocation::Mapped { map: m, action: a });
                }
            }
        }
        if let Some((map_name, action_name)) = key.split_once('/') {
            for (m, map) in self.maps.iter().enumerate() {
                if !map.name.eq_ignore_ascii_case(map_name) {
                    continue;
                }
                if let Some(a) = map
                    .actions
                    .iter()
                    .position(|x| x.name.eq_ignore_ascii_case(action_name))
                {
                    return Some(ActionLocation::Mapped { map: m, action: a });
                }
            }
        }
        for (m, map) in self.maps.iter().enumerate() {
            if let Some(a) = map
                .actions
                .iter()
                .position(|x| x.name.eq_ignore_ascii_case(key))
            {
                return Some(ActionLocation::Mapped { map: m, action: a });
            }
        }
        self.runtime
            .iter()
            .position(|x| x.id.as_str() == key || x.name == key)
            .map(ActionLocation::Runtime)
    }

    pub fn action(&self, loc: ActionLocation) -> Option<&Action> {
        match loc {
            ActionLocation::Mapped { map, action } => self.maps.get(map)?.actions.get(action),
            ActionLocation::Runtime(i) => self.runtime.get(i),
        }
    }

    pub fn action_mut(&mut self, loc: ActionLocation) -> Option<&mut Action> {
        match loc {
            ActionLocation::Mapped { map, action } => {
                self.maps.get_mut(map)?.actions.get_mut(action)
            }
            ActionLocation::Runtime(i) => self.runtime.get_mut(i),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Action> {
        self.find(key).and_then(|loc| self.action(loc))
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Action> {
        let loc = self.find(key)?;
        self.action_mut(loc)
    }

    /// `"Map/Action"` for mapped actions, the bare name for runtime ones.
    pub fn qualified_name(&self, loc: ActionLocation) -> Option<String> {
        match loc {
            ActionLocation::Mapped { map, action } => {
                let m = self.maps.get(map)?;
                Some(format!("{}/{}", m.name, m.actions.get(action)?.name))
            }
            ActionLocation::Runtime(i) => self.runtime.get(i).map(|a| a.name.clone()),
        }
    }

    /// Enablement of the action's owning map, or of the action itself when
    /// it has no map.
    pub fn owner_enabled(&self, loc: ActionLocation) -> bool {
        match loc {
            ActionLocation::Mapped { map, .. } => self.maps.get(map).is_some_and(|m| m.enabled),
            ActionLocation::Runtime(i) => self.runtime.get(i).is_some_and(|a| a.enabled),
        }
    }

    pub fn set_owner_enabled(&mut self, loc: ActionLocation, enabled: bool) {
        match loc {
            ActionLocation::Mapped { map, .. } => {
                if let Some(m) = self.maps.get_mut(map) {
                    m.enabled = enabled;
                }
            }
            ActionLocation::Runtime(i) => {
                if let Some(a) = self.runtime.get_mut(i) {
                    a.enabled = enabled;
                }
            }
        }
    }

    /// Every action location, mapped actions first.
    pub fn locations(&self) -> Vec<ActionLocation> {
        let mut out = Vec::new();
        for (m, map) in self.maps.iter().enumerate() {
            out.extend((0..map.actions.len()).map(|a| ActionLocation::Mapped { map: m, action: a }));
        }
        out.extend((0..self.runtime.len()).map(ActionLocation::Runtime));
        out
    }

    /// Actions sharing an owner with `loc` (the same map, or just itself).
    pub fn siblings(&self, loc: ActionLocation) -> Vec<ActionLocation> {
        match loc {
            ActionLocation::Mapped { map, .. } => self
                .maps
                .get(map)
                .map(|m| {
                    (0..m.actions.len())
                        .map(|a| ActionLocation::Mapped { map, action: a })
                        .collect()
                })
                .unwrap_or_default(),
            ActionLocation::Runtime(_) => vec![loc],
        }
    }

    pub fn clear_all_overrides(&mut self) {
        for map in &mut self.maps {
            for action in &mut map.actions {
                action.clear_overrides();
            }
        }
        for action in &mut self.runtime {
            action.clear_overrides();
        }
    }

    pub fn override_count(&self) -> usize {
        self.locations()
            .into_iter()
            .filter_map(|loc| self.action(loc))
            .map(|a| a.slots().iter().filter(|s| s.binding.has_override()).count())
            .sum()
    }

    /// Create a runtime action, or return the existing one with that name.
    pub fn create_runtime_action(&mut self, name: &str) -> ActionId {
        if let Some(existing) = self.runtime.iter().find(|a| a.name == name) {
            return existing.id.clone();
        }
        let action = Action::new(name);
        let id = action.id.clone();
        debug!(name, id = %id, "created runtime action");
        self.runtime.push(action);
        id
    }

    pub fn runtime_action(&self, name: &str) -> Option<&Action> {
        self.runtime.iter().find(|a| a.name == name)
    }

    pub fn runtime_action_mut(&mut self, name: &str) -> Option<&mut Action> {
        self.runtime.iter_mut().find(|a| a.name == name)
    }

    /// Dispose a runtime action. Returns whether one existed.
    pub fn dispose_runtime_action(&mut self, name: &str) -> bool {
        let before = self.runtime.len();
        self.runtime.retain(|a| a.name != name);
        let removed = self.runtime.len() != before;
        if removed {
            debug!(name, "disposed runtime action");
        }
        removed
    }

    pub fn runtime_action_count(&self) -> usize {
        self.runtime.len()
    }
}
