use std::path::{Path, PathBuf};
use std::sync::Arc;

use bindery_common::{BinderyError, BindingEvent};
use bindery_config::schema::BinderyConfig;
use bindery_input::icons::resolver_from_config;
use bindery_input::{
    paths, BindingManager, DeviceId, DeviceTracker, DisplayOptions, FileStore, InputCatalog,
    InputEvent, LayoutGraph, LayoutTable, OverrideStore,
};

pub struct Context {
    pub config: BinderyConfig,
    pub graph: Arc<dyn LayoutGraph + Send + Sync>,
    pub store_path: PathBuf,
}

impl Context {
    pub fn new(config: BinderyConfig, store: Option<PathBuf>) -> Result<Self, BinderyError> {
        let store_path = match store.or_else(|| config.storage.file.clone()) {
            Some(path) => path,
            None => paths::overrides_file()?,
        };
        Ok(Self {
            graph: Arc::new(LayoutTable::with_entries(&config.layouts)),
            config,
            store_path,
        })
    }

    fn manager(&self, catalog: &Path) -> Result<BindingManager<FileStore>, BinderyError> {
        let catalog = InputCatalog::load_json(catalog)?;
        let mut manager = BindingManager::new(
            catalog,
            &self.config,
            FileStore::new(&self.store_path),
            Arc::clone(&self.graph),
        );
        manager.load()?;
        Ok(manager)
    }
}

pub fn show(ctx: &Context, catalog: &Path, short: bool, defaults: bool, json: bool) -> Result<(), BinderyError> {
    let manager = ctx.manager(catalog)?;
    let tracker = DeviceTracker::new(&ctx.config.tracker, Arc::clone(&ctx.graph));

    let mut icons_config = ctx.config.icons.clone();
    if icons_config.directory.is_none() {
        icons_config.directory = paths::icons_dir().ok().filter(|d| d.is_dir());
    }
    let icons = resolver_from_config(&icons_config, Arc::clone(&ctx.graph));

    let options = DisplayOptions {
        omit_device: short,
        ignore_overrides: defaults,
    };
    let catalog = manager.catalog();
    for loc in catalog.locations() {
        let (Some(action), Some(name)) = (catalog.action(loc), catalog.qualified_name(loc)) else {
            continue;
        };
        for slot in action.slots() {
            let d = bindery_input::display::resolve_display(
                action,
                &catalog.control_schemes,
                &slot.binding.id,
                options,
            );
            let icon = if d.device_layout.is_empty() {
                None
            } else {
                let layout = tracker.icon_layout(&d.device_layout);
                Some(icons.resolve_binding(&layout, &d.control_path))
            };
            if json {
                let line = serde_json::json!({
                    "action": name,
                    "index": slot.index,
                    "binding_id": slot.binding.id,
                    "display": d.display,
                    "device_layout": d.device_layout,
                    "control_path": d.control_path,
                    "icon": icon.as_ref().and_then(|i| i.icon.as_ref()).map(|h| h.0.clone()),
                    "icon_text": icon.as_ref().map(|i| i.text.clone()),
                });
                println!("{line}");
            } else {
                let text = icon.map(|i| i.text).unwrap_or_default();
                println!("{name}[{}]\t{}\t{text}", slot.index, d.display);
            }
        }
    }
    Ok(())
}

pub fn rebind(
    ctx: &Context,
    catalog: &Path,
    action: &str,
    binding: Option<usize>,
    captures: &[String],
) -> Result<(), BinderyError> {
    let mut manager = ctx.manager(catalog)?;
    let mut rx = manager.subscribe();

    if !manager.start_rebind(action, binding) {
        return Err(BinderyError::Other(format!("cannot rebind '{action}'")));
    }
    for path in captures {
        if !manager.is_rebinding() {
            tracing::warn!(path = %path, "rebind already finished, ignoring capture");
            continue;
        }
        if !manager.on_input(&InputEvent::button(DeviceId(0), path.as_str(), true)) {
            tracing::warn!(path = %path, "capture was not accepted");
        }
    }
    if manager.is_rebinding() {
        tracing::warn!("not enough captures for every part, canceling");
        manager.cancel_rebind();
    }

    let mut completed = false;
    while let Ok(event) = rx.try_recv() {
        match &event {
            BindingEvent::RebindPartCaptured { binding_index, path, .. } => {
                println!("captured [{binding_index}] {path}");
            }
            BindingEvent::RebindDuplicate { binding_index, path, .. } => {
                println!("duplicate [{binding_index}] {path}");
            }
            BindingEvent::RebindCompleted { .. } => completed = true,
            BindingEvent::RebindCanceled { .. } | BindingEvent::RebindTimedOut { .. } => {
                println!("rebind aborted");
            }
            _ => {}
        }
    }
    if completed {
        manager.save()?;
        println!("saved to {}", ctx.store_path.display());
    }
    Ok(())
}

pub fn reset(
    ctx: &Context,
    catalog: &Path,
    action: Option<&str>,
    binding: Option<usize>,
) -> Result<(), BinderyError> {
    let mut manager = ctx.manager(catalog)?;
    match action {
        Some(action) => {
            let index = binding
                .map(|i| isize::try_from(i).unwrap_or(isize::MAX))
                .unwrap_or(-1);
            if !manager.reset_binding(action, index) {
                return Err(BinderyError::Other(format!("nothing to reset for '{action}'")));
            }
            manager.save()?;
        }
        None => manager.reset_all_bindings()?,
    }
    println!("{} overrides remain", manager.catalog().override_count());
    Ok(())
}

pub fn clear(ctx: &Context) -> Result<(), BinderyError> {
    let mut store = OverrideStore::new(FileStore::new(&ctx.store_path));
    store.clear(&ctx.config.storage.key)?;
    println!("cleared '{}' in {}", ctx.config.storage.key, ctx.store_path.display());
    Ok(())
}
