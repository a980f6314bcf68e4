use std::ops::Range;

use bindery_common::{ActionId, BindingId};
use serde::{Deserialize, Serialize};

use super::binding::{Binding, BindingNode, BindingRole, BindingSlot, CompositeBinding, CompositePart};

fn enabled_by_default() -> bool {
    true
}

/// A named, bindable intent with an ordered list of bindings.
///
/// Bindings are stored as a tree (composites own their parts) and addressed
/// through a flat index: a composite header at `i` is followed by its parts
/// at `i + 1 ..= i + n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    #[serde(default)]
    pub id: ActionId,
    pub name: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub bindings: Vec<BindingNode>,
}

impl Action {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ActionId::new(),
            name: name.into(),
            enabled: true,
            bindings: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<ActionId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_binding(mut self, binding: Binding) -> Self {
        self.bindings.push(BindingNode::Single(binding));
        self
    }

    pub fn with_composite(mut self, header: Binding, parts: Vec<CompositePart>) -> Self {
        self.bindings
            .push(BindingNode::Composite(CompositeBinding { header, parts }));
        self
    }

    /// Total number of flat binding entries (headers and parts included).
    pub fn binding_count(&self) -> usize {
        self.bindings.iter().map(BindingNode::flat_len).sum()
    }

    /// Every binding in flat order.
    pub fn slots(&self) -> Vec<BindingSlot<'_>> {
        let mut out = Vec::with_capacity(self.binding_count());
        for node in &self.bindings {
            let index = out.len();
            match node {
                BindingNode::Single(binding) => out.push(BindingSlot {
                    index,
                    binding,
                    role: BindingRole::Single,
                }),
                BindingNode::Composite(c) => {
                    out.push(BindingSlot {
                        index,
                        binding: &c.header,
                        role: BindingRole::Composite {
                            parts: c.parts.len(),
                        },
                    });
                    for part in &c.parts {
                        out.push(BindingSlot {
                            index: out.len(),
                            binding: &part.binding,
                            role: BindingRole::Part {
                                name: &part.name,
                                composite: index,
                            },
                        });
                    }
                }
            }
        }
        out
    }

    pub fn slot(&self, index: usize) -> Option<BindingSlot<'_>> {
        self.slots().into_iter().nth(index)
    }

    pub fn binding(&self, index: usize) -> Option<&Binding> {
        self.slot(index).map(|s| s.binding)
    }

    pub fn binding_mut(&mut self, index: usize) -> Option<&mut Binding> {
        let mut start = 0;
        for node in &mut self.bindings {
            let len = node.flat_len();
            if index < start + len {
                return match node {
                    BindingNode::Single(binding) => Some(binding),
                    BindingNode::Composite(c) => {
                        if index == start {
                            Some(&mut c.header)
                        } else {
                            c.parts.get_mut(index - start - 1).map(|p| &mut p.binding)
                        }
                    }
                };
            }
            start += len;
        }
        None
    }

    pub fn index_of(&self, id: &BindingId) -> Option<usize> {
        self.slots()
            .into_iter()
            .find(|s| &s.binding.id == id)
            .map(|s| s.index)
    }

    /// Flat indices of the parts of the composite whose header is at `index`.
    /// `None` if `index` is not a composite header.
    pub fn part_range(&self, index: usize) -> Option<Range<usize>> {
        match self.slot(index)?.role {
            BindingRole::Composite { parts } => Some(index + 1..index + 1 + parts),
            _ => None,
        }
    }

    /// The first binding that is not itself a composite part.
    pub fn first_non_part(&self) -> Option<usize> {
        self.slots().into_iter().find(|s| !s.is_part()).map(|s| s.index)
    }

    pub fn has_overrides(&self) -> bool {
        self.slots().iter().any(|s| s.binding.has_override())
    }

    pub fn clear_overrides(&mut self) {
        for i in 0..self.binding_count() {
            if let Some(binding) = self.binding_mut(i) {
                binding.override_path = None;
            }
        }
    }
}
