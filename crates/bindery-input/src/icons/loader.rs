//! Loading icon maps from TOML files and assembling a resolver from config.

use std::path::Path;
use std::sync::Arc;

use bindery_common::{BinderyError, IconMapError};
use bindery_config::schema::IconsConfig;
use tracing::{debug, info, warn};

use crate::layout::LayoutGraph;

use super::map::IconMap;
use super::resolver::IconResolver;

/// Parse one icon map from TOML text.
pub fn parse_icon_map(content: &str) -> Result<IconMap, IconMapError> {
    toml::from_str(content).map_err(|e| IconMapError::ParseError(e.to_string()))
}

/// Load every `*.toml` icon map in `dir`, in file name order.
///
/// Files that fail to parse are logged and skipped.
pub fn load_icon_maps(dir: &Path) -> Result<Vec<IconMap>, BinderyError> {
    let mut files: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    files.sort();

    let mut maps = Vec::with_capacity(files.len());
    for file in files {
        let content = match std::fs::read_to_string(&file) {
            Ok(c) => c,
            Err(e) => {
                warn!("failed to read icon map {}: {e}", file.display());
                continue;
            }
        };
        match parse_icon_map(&content) {
            Ok(map) => {
                debug!(layout = map.layout(), entries = map.len(), "loaded icon map");
                maps.push(map);
            }
            Err(e) => warn!("skipping icon map {}: {e}", file.display()),
        }
    }
    Ok(maps)
}

/// Order `maps` by the configured priority and pick the fallback.
///
/// Layouts named in `priority` come first in that order; the rest follow in
/// their original order. A priority entry with no map is logged and ignored.
pub fn build_resolver(
    config: &IconsConfig,
    maps: Vec<IconMap>,
    graph: Arc<dyn LayoutGraph + Send + Sync>,
) -> IconResolver {
    let fallback = config.fallback.as_deref().and_then(|name| {
        let found = maps
            .iter()
            .find(|m| m.layout().eq_ignore_ascii_case(name))
            .cloned();
        if found.is_none() {
            warn!("icon fallback layout '{name}' has no icon map");
        }
        found
    });

    let mut remaining: Vec<Option<IconMap>> = maps.into_iter().map(Some).collect();
    let mut resolver = IconResolver::new(graph);

    for name in &config.priority {
        let slot = remaining
            .iter_mut()
            .find(|m| m.as_ref().is_some_and(|m| m.layout().eq_ignore_ascii_case(name)));
        match slot.and_then(Option::take) {
            Some(map) => resolver.push(map),
            None => warn!("icon priority layout '{name}' has no icon map"),
        }
    }
    for map in remaining.into_iter().flatten() {
        resolver.push(map);
    }
    resolver.set_fallback(fallback);
    resolver
}

/// Build the resolver described by `config`, loading maps from its directory.
pub fn resolver_from_config(
    config: &IconsConfig,
    graph: Arc<dyn LayoutGraph + Send + Sync>,
) -> IconResolver {
    let maps = match &config.directory {
        Some(dir) => match load_icon_maps(dir) {
            Ok(maps) => {
                info!("loaded {} icon maps from {}", maps.len(), dir.display());
                maps
            }
            Err(e) => {
                warn!("failed to load icon maps from {}: {e}", dir.display());
                Vec::new()
            }
        },
        None => Vec::new(),
    };
    build_resolver(config, maps, graph)
}
