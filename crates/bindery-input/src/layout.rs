//! Device layout inheritance.
//!
//! Layouts form a single-inheritance tree (`DualSenseGamepadHID` is a
//! `DualShockGamepad` is a `Gamepad`). The rest of the crate only asks
//! [`LayoutGraph::is_based_on`]; [`LayoutTable`] is the in-process answer.

use std::collections::HashMap;

use bindery_config::schema::LayoutEntry;

/// Upper bound on inheritance depth; protects against cycles from config.
const MAX_DEPTH: usize = 32;

/// Query interface onto a device layout inheritance graph.
pub trait LayoutGraph {
    /// The direct base of `layout`, if it has one.
    fn base_of(&self, layout: &str) -> Option<String>;

    /// Whether `layout` is `base` or inherits from it, case-insensitively.
    fn is_based_on(&self, layout: &str, base: &str) -> bool {
        if layout.is_empty() || base.is_empty() {
            return false;
        }
        let mut current = layout.to_string();
        for _ in 0..MAX_DEPTH {
            if current.eq_ignore_ascii_case(base) {
                return true;
            }
            match self.base_of(&current) {
                Some(next) => current = next,
                None => return false,
            }
        }
        false
    }
}

/// Table-backed layout graph.
#[derive(Debug, Clone, Default)]
pub struct LayoutTable {
    /// Lowercased layout name -> base name as declared.
    bases: HashMap<String, Option<String>>,
}

impl LayoutTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The layouts every platform backend reports.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (name, base) in [
            ("Keyboard", None),
            ("Pointer", None),
            ("Mouse", Some("Pointer")),
            ("Pen", Some("Pointer")),
            ("Touchscreen", Some("Pointer")),
            ("Joystick", None),
            ("Gamepad", None),
            ("DualShockGamepad", Some("Gamepad")),
            ("DualShock3GamepadHID", Some("DualShockGamepad")),
            ("DualShock4GamepadHID", Some("DualShockGamepad")),
            ("DualSenseGamepadHID", Some("DualShockGamepad")),
            ("XInputController", Some("Gamepad")),
            ("XInputControllerWindows", Some("XInputController")),
            ("XboxOneGampadMacOSWireless", Some("XInputController")),
            ("SwitchProControllerHID", Some("Gamepad")),
        ] {
            table.insert(name, base);
        }
        table
    }

    /// Built-in layouts extended by config entries. Config entries win.
    pub fn with_entries(entries: &[LayoutEntry]) -> Self {
        let mut table = Self::builtin();
        for entry in entries {
            table.insert(&entry.name, entry.base.as_deref());
        }
        table
    }

    pub fn insert(&mut self, name: &str, base: Option<&str>) {
        self.bases
            .insert(name.to_lowercase(), base.map(str::to_string));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bases.contains_key(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}

impl LayoutGraph for LayoutTable {
    fn base_of(&self, layout: &str) -> Option<String> {
        self.bases.get(&layout.to_lowercase()).cloned().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_based_on_itself() {
        let table = LayoutTable::builtin();
        assert!(table.is_based_on("Gamepad", "gamepad"));
    }

    #[test]
    fn deep_inheritance_chain() {
        let table = LayoutTable::builtin();
        assert!(table.is_based_on("DualSenseGamepadHID", "DualShockGamepad"));
        assert!(table.is_based_on("DualSenseGamepadHID", "Gamepad"));
        assert!(!table.is_based_on("DualSenseGamepadHID", "XInputController"));
        assert!(!table.is_based_on("Gamepad", "DualShockGamepad"));
    }

    #[test]
    fn mouse_is_a_pointer_not_a_keyboard() {
        let table = LayoutTable::builtin();
        assert!(table.is_based_on("Mouse", "Pointer"));
        assert!(!table.is_based_on("Mouse", "Keyboard"));
    }

    #[test]
    fn unknown_layout_only_matches_itself() {
        let table = LayoutTable::builtin();
        assert!(table.is_based_on("SteeringWheel", "SteeringWheel"));
        assert!(!table.is_based_on("SteeringWheel", "Gamepad"));
        assert!(!table.is_based_on("", ""));
    }

    #[test]
    fn config_entries_extend_builtin() {
        let table = LayoutTable::with_entries(&[LayoutEntry {
            name: "ArcadeStick".into(),
            base: Some("Gamepad".into()),
        }]);
        assert!(table.contains("arcadestick"));
        assert!(table.is_based_on("ArcadeStick", "Gamepad"));
        assert_eq!(table.len(), LayoutTable::builtin().len() + 1);
    }

    #[test]
    fn cycles_terminate() {
        let mut table = LayoutTable::new();
        table.insert("A", Some("B"));
        table.insert("B", Some("A"));
        assert!(!table.is_based_on("A", "C"));
        assert!(table.is_based_on("A", "B"));
    }
}
