//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# bindery configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[tracker]
# debounce_ms = 100        # 0-5000, minimum time between device switches
# group_devices = true     # keyboard+mouse count as one device, gamepads as another

[tracker.layout_redirects]
Mouse = "Keyboard"         # mice use the keyboard icon set

[rebind]
# cancel_paths = ["<Keyboard>/escape"]
# timeout_secs = 5.0       # 0-120, 0 disables the timeout
# min_actuation = 0.5      # 0.0-1.0
# excluded_paths = ["<Mouse>/position", "<Mouse>/delta", "<Mouse>/scroll"]
# reject_duplicates = false

[storage]
# key = "bindery.overrides"
# file = "/path/to/overrides.json"

[icons]
# directory = "/path/to/icon-maps"
# priority = ["DualSenseGamepadHID", "DualShockGamepad", "XInputController", "Gamepad", "Keyboard"]
# fallback = "Keyboard"

# [[layouts]]
# name = "ArcadeStick"
# base = "Gamepad"

[logging]
# level = "info"           # trace, debug, info, warn, error
"##
    .to_string()
}
