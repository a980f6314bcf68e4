use std::fmt;

use serde::{Deserialize, Serialize};

use crate::layout::LayoutGraph;

/// Activation threshold above which a button counts as pressed.
pub const DEFAULT_PRESS_POINT: f32 = 0.5;

/// Platform-assigned device identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeviceId(pub u32);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An input device as reported by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub layout: String,
    pub enabled: bool,
}

impl Device {
    pub fn new(id: u32, layout: impl Into<String>) -> Self {
        Self {
            id: DeviceId(id),
            layout: layout.into(),
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Coarse classification used to decide whether the player switched devices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceGroup {
    KeyboardMouse,
    Gamepad,
    Other(String),
}

impl DeviceGroup {
    pub fn name(&self) -> &str {
        match self {
            DeviceGroup::KeyboardMouse => "KeyboardMouse",
            DeviceGroup::Gamepad => "Gamepad",
            DeviceGroup::Other(layout) => layout,
        }
    }
}

impl fmt::Display for DeviceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Keyboards and mice collapse to one group, every gamepad to another; any
/// other layout is its own group.
pub fn classify(layout: &str, graph: &dyn LayoutGraph) -> DeviceGroup {
    if graph.is_based_on(layout, "Keyboard") || graph.is_based_on(layout, "Mouse") {
        DeviceGroup::KeyboardMouse
    } else if graph.is_based_on(layout, "Gamepad") {
        DeviceGroup::Gamepad
    } else {
        DeviceGroup::Other(layout.to_string())
    }
}

/// How a control reports its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlKind {
    /// Pressable control with a 0..1 value.
    Button,
    /// Absolute analog value (sticks, triggers).
    Axis,
    /// Relative motion (mouse delta, scroll).
    Delta,
}

/// One low-level state change of a control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputEvent {
    pub device: DeviceId,
    /// Full control path, e.g. `<DualSenseGamepadHID>/buttonSouth`.
    pub path: String,
    pub kind: ControlKind,
    pub value: f32,
    pub previous: f32,
}

impl InputEvent {
    pub fn button(device: DeviceId, path: impl Into<String>, pressed: bool) -> Self {
        Self {
            device,
            path: path.into(),
            kind: ControlKind::Button,
            value: if pressed { 1.0 } else { 0.0 },
            previous: if pressed { 0.0 } else { 1.0 },
        }
    }

    pub fn axis(device: DeviceId, path: impl Into<String>, value: f32) -> Self {
        Self {
            device,
            path: path.into(),
            kind: ControlKind::Axis,
            value,
            previous: 0.0,
        }
    }

    pub fn delta(device: DeviceId, path: impl Into<String>, value: f32) -> Self {
        Self {
            device,
            path: path.into(),
            kind: ControlKind::Delta,
            value,
            previous: 0.0,
        }
    }

    /// A button crossing the press point upwards. Analog motion never counts.
    pub fn is_press(&self) -> bool {
        self.kind == ControlKind::Button
            && self.value >= DEFAULT_PRESS_POINT
            && self.previous < DEFAULT_PRESS_POINT
    }

    /// Magnitude relevant for capture: presses for buttons, |value| for axes.
    pub fn actuation(&self) -> f32 {
        match self.kind {
            ControlKind::Button if self.previous >= DEFAULT_PRESS_POINT => 0.0,
            ControlKind::Button | ControlKind::Axis => self.value.abs(),
            ControlKind::Delta => 0.0,
        }
    }
}

/// Device lifecycle notifications from the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceChange {
    Added(Device),
    Removed(DeviceId),
    Reconnected(Device),
    Enabled(DeviceId),
    Disabled(DeviceId),
}

/// Emitted whenever the tracker commits a new current device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceChanged {
    pub previous: Option<Device>,
    pub current: Option<Device>,
}
