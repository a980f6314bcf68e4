//! Binding path expressions: `<Layout>{usage}/control/sub`.
//!
//! A path names a device layout (or `*` for any device), an optional usage,
//! and one or more control segments. Comparison is case-insensitive and
//! layout matching is inheritance-aware through a [`LayoutGraph`].

use std::fmt;

use crate::layout::LayoutGraph;

/// A parsed binding path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingPath {
    /// `None` for the `*` wildcard.
    pub layout: Option<String>,
    pub usage: Option<String>,
    pub controls: Vec<String>,
}

impl BindingPath {
    /// Parses `"<Gamepad>/buttonSouth"`, `"*/start"`,
    /// `"<XRController>{LeftHand}/trigger"` or `"/Keyboard/space"`.
    ///
    /// Returns `None` when the string has no device segment or no control.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let (device, rest) = if let Some(stripped) = s.strip_prefix('<') {
            let end = stripped.find('>')?;
            (&stripped[..end], &stripped[end + 1..])
        } else if let Some(stripped) = s.strip_prefix('/') {
            let end = stripped.find('/')?;
            (&stripped[..end], &stripped[end..])
        } else if let Some(stripped) = s.strip_prefix('*') {
            ("*", stripped)
        } else {
            return None;
        };

        let (usage, rest) = match rest.strip_prefix('{') {
            Some(stripped) => {
                let end = stripped.find('}')?;
                (Some(stripped[..end].to_string()), &stripped[end + 1..])
            }
            None => (None, rest),
        };

        let rest = rest.strip_prefix('/')?;
        let controls: Vec<String> = rest.split('/').map(str::to_string).collect();
        if device.is_empty() || controls.iter().any(String::is_empty) {
            return None;
        }

        Some(Self {
            layout: (device != "*").then(|| device.to_string()),
            usage,
            controls,
        })
    }

    /// The control-local part, without the device segment (`"leftStick/up"`).
    pub fn control_path(&self) -> String {
        self.controls.join("/")
    }

    /// Layout name, or an empty string for the wildcard.
    pub fn layout_name(&self) -> &str {
        self.layout.as_deref().unwrap_or("")
    }

    /// Whether `self`, used as a pattern, matches the concrete path `other`.
    ///
    /// The pattern layout matches any layout based on it; `*` matches any
    /// device and `*` control segments match any single segment.
    pub fn matches(&self, other: &BindingPath, graph: &dyn LayoutGraph) -> bool {
        if let Some(layout) = &self.layout {
            match &other.layout {
                Some(concrete) if graph.is_based_on(concrete, layout) => {}
                _ => return false,
            }
        }
        if let Some(usage) = &self.usage {
            if !other
                .usage
                .as_deref()
                .is_some_and(|u| u.eq_ignore_ascii_case(usage))
            {
                return false;
            }
        }
        self.controls.len() == other.controls.len()
            && self
                .controls
                .iter()
                .zip(&other.controls)
                .all(|(p, c)| p == "*" || p.eq_ignore_ascii_case(c))
    }
}

impl fmt::Display for BindingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.layout {
            Some(layout) => write!(f, "<{layout}>")?,
            None => write!(f, "*")?,
        }
        if let Some(usage) = &self.usage {
            write!(f, "{{{usage}}}")?;
        }
        write!(f, "/{}", self.control_path())
    }
}

/// Strips exactly one leading device-prefix segment from a control path.
///
/// `"<Keyboard>/leftShift"` → `"leftShift"`, `"<Gamepad>/leftStick/up"` →
/// `"leftStick/up"`. Paths without a device prefix are returned unchanged.
pub fn normalize_control_path(path: &str) -> &str {
    let path = path.trim();
    let body = match path.strip_prefix('/') {
        Some(stripped) => stripped,
        None if path.starts_with('<') || path.starts_with('*') => path,
        None => return path,
    };
    match body.find('/') {
        Some(i) => &body[i + 1..],
        None => path,
    }
}

/// Whether `path` matches any pattern in `patterns`.
pub fn matches_any(patterns: &[BindingPath], path: &BindingPath, graph: &dyn LayoutGraph) -> bool {
    patterns.iter().any(|p| p.matches(path, graph))
}
