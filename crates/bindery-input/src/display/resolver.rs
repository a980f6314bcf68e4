use bindery_common::BindingId;
use tracing::warn;

use crate::model::{Action, Binding, BindingRole, BindingSlot, ControlScheme, InputCatalog};
use crate::path::{normalize_control_path, BindingPath};

use super::names::{control_display_name, layout_display_name, part_display_name};

/// Knobs for [`resolve_display`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Leave out the `[Device]` suffix.
    pub omit_device: bool,
    /// Display the default path even when an override is set.
    pub ignore_overrides: bool,
}

/// Display data for one binding.
///
/// `device_layout` and `control_path` are what this particular binding
/// resolved to, so callers can look up icons per binding rather than per
/// current device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingDisplay {
    pub display: String,
    pub device_layout: String,
    pub control_path: String,
}

impl BindingDisplay {
    pub fn is_empty(&self) -> bool {
        self.display.is_empty() && self.device_layout.is_empty() && self.control_path.is_empty()
    }
}

/// Read-only display resolution over a catalog.
pub struct BindingResolver<'a> {
    catalog: &'a InputCatalog,
}

impl<'a> BindingResolver<'a> {
    pub fn new(catalog: &'a InputCatalog) -> Self {
        Self { catalog }
    }

    /// Resolve by action key (id, `"Map/Action"` or name). A missing action
    /// logs a warning and yields an empty result.
    pub fn resolve(
        &self,
        action_key: &str,
        binding_id: &BindingId,
        options: DisplayOptions,
    ) -> BindingDisplay {
        match self.catalog.get(action_key) {
            Some(action) => resolve_display(action, &self.catalog.control_schemes, binding_id, options),
            None => {
                warn!(action = action_key, "display requested for unknown action");
                BindingDisplay::default()
            }
        }
    }

    /// Display data for every binding of an action, in flat order.
    pub fn resolve_all(&self, action_key: &str, options: DisplayOptions) -> Vec<BindingDisplay> {
        let Some(action) = self.catalog.get(action_key) else {
            warn!(action = action_key, "display requested for unknown action");
            return Vec::new();
        };
        action
            .slots()
            .iter()
            .map(|slot| display_slot(action, slot, &self.catalog.control_schemes, options))
            .collect()
    }
}

/// Display data for the binding with `binding_id`, or the first binding
/// when the id is not found.
pub fn resolve_display(
    action: &Action,
    schemes: &[ControlScheme],
    binding_id: &BindingId,
    options: DisplayOptions,
) -> BindingDisplay {
    let index = action.index_of(binding_id).unwrap_or(0);
    match action.slot(index) {
        Some(slot) => display_slot(action, &slot, schemes, options),
        None => BindingDisplay::default(),
    }
}

fn display_slot(
    action: &Action,
    slot: &BindingSlot<'_>,
    schemes: &[ControlScheme],
    options: DisplayOptions,
) -> BindingDisplay {
    let (mut display, device_layout, control_path, groups) = match slot.role {
        BindingRole::Composite { .. } => {
            let parts: Vec<&Binding> = action
                .part_range(slot.index)
                .map(|range| range.filter_map(|i| action.binding(i)).collect())
                .unwrap_or_default();
            composite_display(slot.binding, &parts, options)
        }
        _ => {
            let (display, layout, control) = single_display(slot.binding, options);
            (display, layout, control, slot.binding.groups.clone())
        }
    };

    if let Some(part) = slot.part_name() {
        display = format!("{}: {}", part_display_name(part), display);
    }
    display = display.replace('/', "\\");

    let scheme_names = scheme_names(&groups, schemes);
    if !scheme_names.is_empty() {
        display = format!("{display} ({})", scheme_names.join(", "));
    }

    BindingDisplay {
        display,
        device_layout,
        control_path,
    }
}

/// `(display, layout, control path)` for a plain binding or a part.
fn single_display(binding: &Binding, options: DisplayOptions) -> (String, String, String) {
    let path = if options.ignore_overrides {
        binding.path.as_str()
    } else {
        binding.effective_path()
    };
    if path.is_empty() {
        return (String::new(), String::new(), String::new());
    }
    match BindingPath::parse(path) {
        Some(parsed) => {
            let control = parsed.control_path();
            let mut display = control_display_name(&control);
            if !options.omit_device && !parsed.layout_name().is_empty() {
                display = format!("{display} [{}]", layout_display_name(parsed.layout_name()));
            }
            (display, parsed.layout_name().to_string(), control)
        }
        None => {
            let control = normalize_control_path(path).to_string();
            (control_display_name(&control), String::new(), control)
        }
    }
}

/// Parts joined with `/`, device suffix from the first part. Groups of the
/// header, or of its parts when the header has none.
fn composite_display(
    header: &Binding,
    parts: &[&Binding],
    options: DisplayOptions,
) -> (String, String, String, Vec<String>) {
    let short = DisplayOptions {
        omit_device: true,
        ..options
    };
    let names: Vec<String> = parts
        .iter()
        .map(|p| single_display(p, short).0)
        .filter(|d| !d.is_empty())
        .collect();
    let (_, layout, control) = parts
        .first()
        .map(|p| single_display(p, options))
        .unwrap_or_default();

    let mut display = names.join("/");
    if !options.omit_device && !layout.is_empty() && !display.is_empty() {
        display = format!("{display} [{}]", layout_display_name(&layout));
    }

    let groups = if header.groups.is_empty() {
        let mut groups: Vec<String> = Vec::new();
        for g in parts.iter().flat_map(|p| p.groups.iter()) {
            if !groups.contains(g) {
                groups.push(g.clone());
            }
        }
        groups
    } else {
        header.groups.clone()
    };
    (display, layout, control, groups)
}

/// Display names of the schemes whose binding group appears in `groups`.
fn scheme_names(groups: &[String], schemes: &[ControlScheme]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for group in groups {
        if let Some(scheme) = schemes
            .iter()
            .find(|s| s.binding_group.eq_ignore_ascii_case(group))
        {
            if !names.contains(&scheme.name) {
                names.push(scheme.name.clone());
            }
        }
    }
    names
}
