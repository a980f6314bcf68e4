//! The action/binding model the rest of the crate reads and mutates.
//!
//! An [`InputCatalog`] holds action maps, each holding actions, each holding
//! binding nodes. Composite bindings own their parts structurally; flat
//! indices are derived on demand.

mod action;
mod binding;
mod catalog;

pub use action::Action;
pub use binding::{Binding, BindingNode, BindingRole, BindingSlot, CompositeBinding, CompositePart};
pub use catalog::{ActionLocation, ActionMap, ControlScheme, InputCatalog};

#[cfg(test)]
mod tests {
    use super::*;

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
                    .with_action(Action::new("Fire").with_id("a-fire")),
            )
            .with_map(ActionMap::new("UI").with_action(Action::new("Jump").with_id("a-ui-jump")))
            .with_scheme(ControlScheme::new("Keyboard & Mouse", "KeyboardMouse"))
    }

    #[test]
    fn find_by_id_qualified_and_bare_name() {
        let cat = catalog();
        assert_eq!(
            cat.find("a-fire"),
            Some(ActionLocation::Mapped { map: 0, action: 1 })
        );
        assert_eq!(
            cat.find("UI/Jump"),
            Some(ActionLocation::Mapped { map: 1, action: 0 })
        );
        assert_eq!(
            cat.find("jump"),
            Some(ActionLocation::Mapped { map: 0, action: 0 })
        );
        assert_eq!(cat.find(""), None);
        assert_eq!(cat.find("Crouch"), None);
    }

    #[test]
    fn qualified_name_includes_map() {
        let cat = catalog();
        let loc = cat.find("a-ui-jump").unwrap();
        assert_eq!(cat.qualified_name(loc).as_deref(), Some("UI/Jump"));
    }

    #[test]
    fn owner_enablement_is_per_map() {
        let mut cat = catalog();
        let loc = cat.find("Player/Jump").unwrap();
        cat.set_owner_enabled(loc, false);
        assert!(!cat.owner_enabled(loc));
        assert!(cat.maps[1].enabled);
    }

    #[test]
    fn runtime_actions_are_idempotent() {
        let mut cat = catalog();
        let a = cat.create_runtime_action("Debug/Screenshot");
        let b = cat.create_runtime_action("Debug/Screenshot");
        assert_eq!(a, b);
        assert_eq!(cat.runtime_action_count(), 1);

        let loc = cat.find(a.as_str()).unwrap();
        assert!(matches!(loc, ActionLocation::Runtime(0)));
        assert_eq!(cat.siblings(loc), vec![loc]);

        assert!(cat.dispose_runtime_action("Debug/Screenshot"));
        assert!(!cat.dispose_runtime_action("Debug/Screenshot"));
        assert!(cat.runtime_action("Debug/Screenshot").is_none());
    }

    #[test]
    fn runtime_action_bindings_are_mutable() {
        let mut cat = InputCatalog::new();
        cat.create_runtime_action("Photo");
        cat.runtime_action_mut("Photo")
            .unwrap()
            .bindings
            .push(BindingNode::Single(Binding::new("<Keyboard>/p")));
        assert_eq!(cat.get("Photo").unwrap().binding_count(), 1);
    }

    #[test]
    fn override_count_and_clear_all() {
        let mut cat = catalog();
        let loc = cat.find("Jump").unwrap();
        cat.action_mut(loc).unwrap().binding_mut(1).unwrap().override_path =
            Some("<Gamepad>/buttonEast".into());
        assert_eq!(cat.override_count(), 1);
        cat.clear_all_overrides();
        assert_eq!(cat.override_count(), 0);
    }

    #[test]
    fn catalog_json_round_trip_keeps_composites() {
        let cat = InputCatalog::new().with_map(ActionMap::new("Player").with_action(
            Action::new("Move").with_composite(
                Binding::new("2DVector"),
                vec![CompositePart::new("up", Binding::new("<Keyboard>/w"))],
            ),
        ));
        let json = serde_json::to_string(&cat).unwrap();
        assert!(json.contains("\"kind\":\"composite\""));
        let back: InputCatalog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cat);
    }

    #[test]
    fn load_json_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{"maps":[{"name":"Player","actions":[{"name":"Jump","bindings":[
                {"kind":"single","path":"<Keyboard>/space"}]}]}]}"#,
        )
        .unwrap();
        let cat = InputCatalog::load_json(&path).unwrap();
        let jump = cat.get("Player/Jump").unwrap();
        assert!(jump.enabled);
        assert_eq!(jump.binding(0).unwrap().path, "<Keyboard>/space");
        assert!(!jump.binding(0).unwrap().id.is_empty());
    }
}
