use bindery_common::BindingId;
use serde::{Deserialize, Serialize};

/// One physical input source bound to an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    #[serde(default)]
    pub id: BindingId,
    /// Default path, e.g. `<Gamepad>/buttonSouth`. For a composite header
    /// this is the composite kind (`2DVector`, `Dpad`).
    pub path: String,
    /// Control scheme groups this binding belongs to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
    /// User-chosen replacement for `path`. `Some("")` means explicitly unbound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_path: Option<String>,
}

impl Binding {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            id: BindingId::new(),
            path: path.into(),
            groups: Vec::new(),
            override_path: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<BindingId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }

    /// The override if one is set, otherwise the default path.
    pub fn effective_path(&self) -> &str {
        self.override_path.as_deref().unwrap_or(&self.path)
    }

    pub fn has_override(&self) -> bool {
        self.override_path.is_some()
    }
}

/// A named part of a composite (`up`, `down`, `negative`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositePart {
    pub name: String,
    pub binding: Binding,
}

impl CompositePart {
    pub fn new(name: impl Into<String>, binding: Binding) -> Self {
        Self {
            name: name.into(),
            binding,
        }
    }
}

/// A composite header owning its ordered parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeBinding {
    pub header: Binding,
    #[serde(default)]
    pub parts: Vec<CompositePart>,
}

/// An entry in an action's binding list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BindingNode {
    Single(Binding),
    Composite(CompositeBinding),
}

impl BindingNode {
    /// Number of entries this node occupies in the flat binding index.
    pub fn flat_len(&self) -> usize {
        match self {
            BindingNode::Single(_) => 1,
            BindingNode::Composite(c) => 1 + c.parts.len(),
        }
    }
}

/// What a flat binding index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingRole<'a> {
    Single,
    /// A composite header followed by `parts` part entries.
    Composite { parts: usize },
    /// A part of the composite whose header sits at flat index `composite`.
    Part { name: &'a str, composite: usize },
}

/// A binding together with its flat index and role.
#[derive(Debug, Clone, Copy)]
pub struct BindingSlot<'a> {
    pub index: usize,
    pub binding: &'a Binding,
    pub role: BindingRole<'a>,
}

impl BindingSlot<'_> {
    pub fn is_part(&self) -> bool {
        matches!(self.role, BindingRole::Part { .. })
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.role, BindingRole::Composite { .. })
    }

    pub fn part_name(&self) -> Option<&str> {
        match self.role {
            BindingRole::Part { name, .. } => Some(name),
            _ => None,
        }
    }
}
