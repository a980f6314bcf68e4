//! Device-layout icon resolution.
//!
//! An [`IconMap`] maps control paths of one device layout to an icon handle
//! and fallback text. The [`IconResolver`] picks the best map for a layout by
//! exact name, then by layout inheritance, then a configured fallback.

mod loader;
mod map;
mod resolver;

pub use loader::{build_resolver, load_icon_maps, parse_icon_map, resolver_from_config};
pub use map::{IconHandle, IconMap, IconMapFile, IconMapping, ResolvedIcon};
pub use resolver::IconResolver;
