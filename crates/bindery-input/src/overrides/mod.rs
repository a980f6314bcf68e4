//! Override persistence.
//!
//! [`OverrideStore`] writes every binding override of a catalog as one
//! versioned JSON blob under a caller-supplied key of a [`KeyValueStore`],
//! and applies it back by action and binding id.

mod blob;
mod kv;
mod store;

pub use blob::{OverrideBlob, OverrideRecord, BLOB_VERSION};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use store::{LoadReport, OverrideStore};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Action, ActionMap, Binding, CompositePart, InputCatalog};
    use bindery_common::{BindingEvent, EventBus, StoreError};

    const KEY: &str = "test.overrides";

    fn catalog() -> InputCatalog {
        InputCatalog::new()
            .with_map(
                ActionMap::new("Player")
                    .with_action(
                        Action::new("Jump")
                            .with_id("a-jump")
                            .with_binding(Binding::new("<Keyboard>/space").with_id("b-space"))
                            .with_binding(Binding::new("<Gamepad>/buttonSouth").with_id("b-south")),
                    )
                    .with_action(Action::new("Move").with_id("a-move").with_composite(
                        Binding::new("2DVector").with_id("b-wasd"),
                        vec![
                            CompositePart::new("up", Binding::new("<Keyboard>/w").with_id("b-w")),
                            CompositePart::new("down", Binding::new("<Keyboard>/s").with_id("b-s")),
                        ],
                    )),
            )
            .with_map(
                ActionMap::new("Menu").with_action(
                    Action::new("Back")
                        .with_id("a-back")
                        .with_binding(Binding::new("<Keyboard>/escape").with_id("b-esc")),
                ),
            )
    }

    fn set(cat: &mut InputCatalog, action: &str, index: usize, path: &str) {
        cat.get_mut(action).unwrap().binding_mut(index).unwrap().override_path = Some(path.into());
    }

    fn overrides(cat: &InputCatalog) -> Vec<(String, Option<String>)> {
        cat.locations()
            .into_iter()
            .filter_map(|loc| cat.action(loc))
            .flat_map(|a| {
                a.slots()
                    .into_iter()
                    .map(|s| (s.binding.id.to_string(), s.binding.override_path.clone()))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    #[test]
    fn save_load_round_trip() {
        let mut source = catalog();
        set(&mut source, "Jump", 0, "<Keyboard>/j");
        set(&mut source, "Move", 2, "<Keyboard>/downArrow");
        set(&mut source, "Back", 0, "");

        let bus = EventBus::default();
        let mut rx = bus.subscribe();
        let mut store = OverrideStore::new(MemoryStore::new());
        store.save(&source, KEY, &bus).unwrap();

        let mut target = catalog();
        let report = store.load(&mut target, KEY, &bus).unwrap();
        assert_eq!(report.applied, 3);
        assert_eq!(report.skipped, 0);
        assert_eq!(overrides(&target), overrides(&source));

        assert!(matches!(rx.try_recv().unwrap(), BindingEvent::BindingsSaved { count: 3, .. }));
        assert!(matches!(
            rx.try_recv().unwrap(),
            BindingEvent::BindingsLoaded { applied: 3, skipped: 0, .. }
        ));
    }

    #[test]
    fn unknown_key_is_noop() {
        let mut cat = catalog();
        set(&mut cat, "Jump", 1, "<Gamepad>/buttonEast");
        let bus = EventBus::default();
        let mut rx = bus.subscribe();
        let mut store = OverrideStore::new(MemoryStore::new());

        let report = store.load(&mut cat, "never.saved", &bus).unwrap();
        assert!(!report.found);
        assert_eq!(cat.override_count(), 1);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn empty_blob_is_noop() {
        let mut kv = MemoryStore::new();
        kv.set(KEY, "  ").unwrap();
        let mut store = OverrideStore::new(kv);
        let report = store.load(&mut catalog(), KEY, &EventBus::default()).unwrap();
        assert_eq!(report, LoadReport::default());
    }

    #[test]
    fn missing_targets_are_skipped() {
        let mut source = catalog();
        set(&mut source, "Jump", 0, "<Keyboard>/j");
        set(&mut source, "Back", 0, "<Keyboard>/backspace");
        let bus = EventBus::default();
        let mut store = OverrideStore::new(MemoryStore::new());
        store.save(&source, KEY, &bus).unwrap();

        let mut drifted = InputCatalog::new().with_map(
            ActionMap::new("Player").with_action(
                Action::new("Jump")
                    .with_id("a-jump")
                    .with_binding(Binding::new("<Keyboard>/space").with_id("b-space")),
            ),
        );
        let report = store.load(&mut drifted, KEY, &bus).unwrap();
        assert_eq!(report.applied, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(drifted.override_count(), 1);
    }

    #[test]
    fn records_fall_back_to_action_name() {
        let mut store = OverrideStore::new(MemoryStore::new());
        let blob = OverrideBlob::new(vec![OverrideRecord {
            action: "Player/Jump".into(),
            action_id: Some("stale-id".into()),
            binding_id: "b-south".into(),
            path: "<Gamepad>/buttonNorth".into(),
        }]);
        store.backend_mut().set(KEY, &blob.encode().unwrap()).unwrap();

        let mut cat = catalog();
        let report = store.load(&mut cat, KEY, &EventBus::default()).unwrap();
        assert_eq!(report.applied, 1);
        assert_eq!(
            cat.get("Jump").unwrap().binding(1).unwrap().override_path.as_deref(),
            Some("<Gamepad>/buttonNorth")
        );
    }

    #[test]
    fn load_replaces_existing_overrides() {
        let mut source = catalog();
        set(&mut source, "Jump", 0, "<Keyboard>/j");
        let bus = EventBus::default();
        let mut store = OverrideStore::new(MemoryStore::new());
        store.save(&source, KEY, &bus).unwrap();

        let mut target = catalog();
        set(&mut target, "Move", 1, "<Keyboard>/upArrow");
        store.load(&mut target, KEY, &bus).unwrap();
        assert_eq!(target.override_count(), 1);
        assert_eq!(
            target.get("Move").unwrap().binding(1).unwrap().override_path,
            None
        );
    }

    #[test]
    fn unsupported_version_leaves_catalog_untouched() {
        let mut kv = MemoryStore::new();
        kv.set(KEY, r#"{"version":99,"overrides":[]}"#).unwrap();
        let mut store = OverrideStore::new(kv);
        let mut cat = catalog();
        set(&mut cat, "Jump", 0, "<Keyboard>/j");

        let err = store.load(&mut cat, KEY, &EventBus::default()).unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedVersion { found: 99, .. }));
        assert_eq!(cat.override_count(), 1);
    }

    #[test]
    fn cleared_key_loads_nothing() {
        let mut source = catalog();
        set(&mut source, "Jump", 0, "<Keyboard>/j");
        let bus = EventBus::default();
        let mut store = OverrideStore::new(MemoryStore::new());
        store.save(&source, KEY, &bus).unwrap();
        store.clear(KEY).unwrap();

        let mut target = catalog();
        store.load(&mut target, KEY, &bus).unwrap();
        assert_eq!(target.override_count(), 0);
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overrides.json");
        let bus = EventBus::default();

        let mut source = catalog();
        set(&mut source, "Move", 1, "<Keyboard>/upArrow");
        OverrideStore::new(FileStore::new(&path))
            .save(&source, KEY, &bus)
            .unwrap();

        let mut target = catalog();
        let report = OverrideStore::new(FileStore::new(&path))
            .load(&mut target, KEY, &bus)
            .unwrap();
        assert_eq!(report.applied, 1);
        assert_eq!(overrides(&target), overrides(&source));
    }
}
