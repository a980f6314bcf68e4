use std::sync::Arc;

use tracing::trace;

use crate::layout::LayoutGraph;

use super::map::{IconMap, ResolvedIcon};

/// Picks the most specific [`IconMap`] for a device layout.
///
/// Maps are tried in priority order, so more specific layouts must be listed
/// before the generic ones they derive from.
pub struct IconResolver {
    maps: Vec<IconMap>,
    fallback: Option<IconMap>,
    graph: Arc<dyn LayoutGraph + Send + Sync>,
}

impl IconResolver {
    pub fn new(graph: Arc<dyn LayoutGraph + Send + Sync>) -> Self {
        Self {
            maps: Vec::new(),
            fallback: None,
            graph,
        }
    }

    pub fn with_map(mut self, map: IconMap) -> Self {
        self.maps.push(map);
        self
    }

    pub fn with_fallback(mut self, map: IconMap) -> Self {
        self.fallback = Some(map);
        self
    }

    pub fn push(&mut self, map: IconMap) {
        self.maps.push(map);
    }

    pub fn set_fallback(&mut self, map: Option<IconMap>) {
        self.fallback = map;
    }

    pub fn maps(&self) -> &[IconMap] {
        &self.maps
    }

    pub fn fallback(&self) -> Option<&IconMap> {
        self.fallback.as_ref()
    }

    /// The best map for `layout`: exact name, then nearest-listed ancestor,
    /// then the fallback.
    pub fn resolve(&self, layout: &str) -> Option<&IconMap> {
        if layout.is_empty() {
            return self.fallback.as_ref();
        }

        if let Some(map) = self
            .maps
            .iter()
            .find(|m| m.layout().eq_ignore_ascii_case(layout))
        {
            trace!(layout, map = map.layout(), "icon map exact match");
            return Some(map);
        }

        if let Some(map) = self
            .maps
            .iter()
            .find(|m| self.graph.is_based_on(layout, m.layout()))
        {
            trace!(layout, map = map.layout(), "icon map inherited match");
            return Some(map);
        }

        self.fallback.as_ref()
    }

    /// Icon and display text for `control_path` on a device of `layout`.
    ///
    /// With no map at all the control path is returned untouched as text.
    pub fn resolve_binding(&self, layout: &str, control_path: &str) -> ResolvedIcon {
        match self.resolve(layout) {
            Some(map) => map.lookup(control_path),
            None => ResolvedIcon {
                icon: None,
                text: control_path.to_string(),
            },
        }
    }
}
