//! Owner of the catalog and the services that mutate it.

use std::sync::Arc;
use std::time::Instant;

use bindery_common::{BindingEvent, BindingId, EventBus, StoreError};
use bindery_config::schema::BinderyConfig;
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::device::InputEvent;
use crate::display::{BindingDisplay, BindingResolver, DisplayOptions};
use crate::layout::LayoutGraph;
use crate::model::InputCatalog;
use crate::overrides::{KeyValueStore, LoadReport, OverrideStore};
use crate::rebind::{RebindEngine, RebindState};

/// Ties a catalog to its rebind engine, override store and event bus.
///
/// Dropping the manager cancels an active rebind so no capture outlives it.
pub struct BindingManager<S: KeyValueStore> {
    catalog: InputCatalog,
    engine: RebindEngine,
    store: OverrideStore<S>,
    bus: EventBus,
    storage_key: String,
}

impl<S: KeyValueStore> BindingManager<S> {
    pub fn new(
        catalog: InputCatalog,
        config: &BinderyConfig,
        store: S,
        graph: Arc<dyn LayoutGraph + Send + Sync>,
    ) -> Self {
        Self {
            catalog,
            engine: RebindEngine::new(&config.rebind, graph),
            store: OverrideStore::new(store),
            bus: EventBus::default(),
            storage_key: config.storage.key.clone(),
        }
    }

    pub fn catalog(&self) -> &InputCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut InputCatalog {
        &mut self.catalog
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BindingEvent> {
        self.bus.subscribe()
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn rebind_state(&self) -> RebindState {
        self.engine.state()
    }

    pub fn is_rebinding(&self) -> bool {
        self.engine.is_active()
    }

    pub fn display(
        &self,
        action: &str,
        binding_id: &BindingId,
        options: DisplayOptions,
    ) -> BindingDisplay {
        BindingResolver::new(&self.catalog).resolve(action, binding_id, options)
    }

    pub fn start_rebind(&mut self, action: &str, index: Option<usize>) -> bool {
        self.start_rebind_at(action, index, Instant::now())
    }

    pub fn start_rebind_at(&mut self, action: &str, index: Option<usize>, now: Instant) -> bool {
        self.engine
            .start_rebind(&mut self.catalog, &self.bus, action, index, now)
    }

    pub fn on_input(&mut self, event: &InputEvent) -> bool {
        self.on_input_at(event, Instant::now())
    }

    pub fn on_input_at(&mut self, event: &InputEvent, now: Instant) -> bool {
        self.engine.on_input(&mut self.catalog, &self.bus, event, now)
    }

    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> bool {
        self.engine.tick(&mut self.catalog, &self.bus, now)
    }

    pub fn cancel_rebind(&mut self) -> bool {
        self.engine.cancel_rebind(&mut self.catalog, &self.bus)
    }

    pub fn reset_binding(&mut self, action: &str, index: isize) -> bool {
        self.engine
            .reset_binding(&mut self.catalog, &self.bus, action, index)
    }

    /// Clear every override in the catalog and purge the persisted blob.
    pub fn reset_all_bindings(&mut self) -> Result<(), StoreError> {
        self.cancel_rebind();
        self.catalog.clear_all_overrides();
        self.store.clear(&self.storage_key)?;
        info!(key = %self.storage_key, "reset all bindings");
        self.bus.publish(BindingEvent::BindingsReset { action: None });
        Ok(())
    }

    /// Persist the current overrides. Skipped (returns `None`) while a rebind
    /// is in progress so a half-captured composite is never saved.
    pub fn save(&mut self) -> Result<Option<String>, StoreError> {
        if self.engine.is_active() {
            warn!("save requested during an active rebind; skipping");
            return Ok(None);
        }
        self.store
            .save(&self.catalog, &self.storage_key, &self.bus)
            .map(Some)
    }

    pub fn load(&mut self) -> Result<LoadReport, StoreError> {
        if self.engine.is_active() {
            warn!("load requested during an active rebind; canceling it first");
            self.cancel_rebind();
        }
        self.store
            .load(&mut self.catalog, &self.storage_key, &self.bus)
    }

    pub fn store(&self) -> &OverrideStore<S> {
        &self.store
    }

    /// Consume the manager and return the catalog. Cancels an active rebind.
    pub fn into_catalog(mut self) -> InputCatalog {
        self.cancel_rebind();
        std::mem::take(&mut self.catalog)
    }
}

impl<S: KeyValueStore> Drop for BindingManager<S> {
    fn drop(&mut self) {
        if self.engine.is_active() {
            warn!("binding manager dropped during an active rebind; canceling");
            self.engine.cancel_rebind(&mut self.catalog, &self.bus);
        }
    }
}
