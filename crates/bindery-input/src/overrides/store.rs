use bindery_common::{BindingEvent, EventBus, StoreError};
use tracing::{debug, info, warn};

use crate::model::InputCatalog;

use super::blob::{OverrideBlob, OverrideRecord};
use super::kv::KeyValueStore;

/// Outcome of [`OverrideStore::load`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Whether a blob existed under the key.
    pub found: bool,
    pub applied: usize,
    /// Records whose action or binding no longer exists.
    pub skipped: usize,
}

/// Saves and restores a catalog's overrides through a [`KeyValueStore`].
pub struct OverrideStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> OverrideStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn backend(&self) -> &S {
        &self.store
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Serialize every override in `catalog` under `key` and return the blob.
    pub fn save(
        &mut self,
        catalog: &InputCatalog,
        key: &str,
        bus: &EventBus,
    ) -> Result<String, StoreError> {
        let records = collect_records(catalog);
        let count = records.len();
        let blob = OverrideBlob::new(records).encode()?;
        self.store.set(key, &blob)?;
        info!(key, count, "saved binding overrides");
        bus.publish(BindingEvent::BindingsSaved {
            key: key.to_string(),
            count,
        });
        Ok(blob)
    }

    /// Restore overrides saved under `key`.
    ///
    /// A missing or empty blob is a no-op. A present blob replaces every
    /// override in the catalog; records whose target is gone are skipped.
    /// An unreadable blob leaves the catalog untouched.
    pub fn load(
        &mut self,
        catalog: &mut InputCatalog,
        key: &str,
        bus: &EventBus,
    ) -> Result<LoadReport, StoreError> {
        let blob = match self.store.get(key)? {
            Some(blob) if !blob.trim().is_empty() => blob,
            _ => {
                debug!(key, "no saved binding overrides");
                return Ok(LoadReport::default());
            }
        };
        let decoded = OverrideBlob::decode(&blob).inspect_err(|e| {
            warn!(key, error = %e, "ignoring unreadable override blob");
        })?;

        catalog.clear_all_overrides();
        let mut report = LoadReport {
            found: true,
            ..LoadReport::default()
        };
        for record in &decoded.overrides {
            if apply_record(catalog, record) {
                report.applied += 1;
            } else {
                debug!(
                    action = %record.action,
                    binding = %record.binding_id,
                    "skipping override for missing binding"
                );
                report.skipped += 1;
            }
        }

        info!(key, applied = report.applied, skipped = report.skipped, "loaded binding overrides");
        bus.publish(BindingEvent::BindingsLoaded {
            key: key.to_string(),
            applied: report.applied,
            skipped: report.skipped,
        });
        Ok(report)
    }

    /// Delete the blob saved under `key`.
    pub fn clear(&mut self, key: &str) -> Result<(), StoreError> {
        self.store.delete(key)?;
        info!(key, "cleared saved binding overrides");
        Ok(())
    }
}

fn collect_records(catalog: &InputCatalog) -> Vec<OverrideRecord> {
    let mut records = Vec::new();
    for loc in catalog.locations() {
        let (Some(action), Some(name)) = (catalog.action(loc), catalog.qualified_name(loc)) else {
            continue;
        };
        for slot in action.slots() {
            if let Some(path) = &slot.binding.override_path {
                records.push(OverrideRecord {
                    action: name.clone(),
                    action_id: Some(action.id.clone()),
                    binding_id: slot.binding.id.clone(),
                    path: path.clone(),
                });
            }
        }
    }
    records
}

/// Resolve the action by id, then by name, and set the binding's override.
fn apply_record(catalog: &mut InputCatalog, record: &OverrideRecord) -> bool {
    let location = record
        .action_id
        .as_ref()
        .and_then(|id| catalog.find(id.as_str()))
        .or_else(|| catalog.find(&record.action));
    let Some(action) = location.and_then(|loc| catalog.action_mut(loc)) else {
        return false;
    };
    let Some(index) = action.index_of(&record.binding_id) else {
        return false;
    };
    match action.binding_mut(index) {
        Some(binding) => {
            binding.override_path = Some(record.path.clone());
            true
        }
        None => false,
    }
}
