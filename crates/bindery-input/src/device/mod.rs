//! Last-used-device tracking.
//!
//! [`DeviceTracker`] infers which device the player is using from action
//! activity, raw button presses and device lifecycle changes, and notifies
//! listeners through an [`Observers`] registry. Consumers created before the
//! tracker attach through a [`Deferred`] cell.

mod deferred;
mod observers;
mod tracker;
mod types;

pub use deferred::Deferred;
pub use observers::{ListenerId, ObserverHandle, Observers};
pub use tracker::DeviceTracker;
pub use types::{
    classify, ControlKind, Device, DeviceChange, DeviceChanged, DeviceGroup, DeviceId, InputEvent,
    DEFAULT_PRESS_POINT,
};

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use super::*;
    use crate::layout::LayoutTable;
    use bindery_config::schema::TrackerConfig;

    fn tracker() -> DeviceTracker {
        DeviceTracker::new(&TrackerConfig::default(), Arc::new(LayoutTable::builtin()))
    }

    fn keyboard() -> Device {
        Device::new(1, "Keyboard")
    }

    fn mouse() -> Device {
        Device::new(2, "Mouse")
    }

    fn pad() -> Device {
        Device::new(3, "DualSenseGamepadHID")
    }

    fn record(t: &DeviceTracker) -> Rc<RefCell<Vec<DeviceChanged>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = Rc::clone(&log);
        t.subscribe(move |e| l.borrow_mut().push(e.clone()));
        log
    }

    #[test]
    fn classify_groups() {
        let t = tracker();
        assert_eq!(t.classify(&keyboard()), DeviceGroup::KeyboardMouse);
        assert_eq!(t.classify(&mouse()), DeviceGroup::KeyboardMouse);
        assert_eq!(t.classify(&pad()), DeviceGroup::Gamepad);
        assert_eq!(t.classify(&Device::new(9, "Pen")), DeviceGroup::Other("Pen".into()));
    }

    #[test]
    fn bootstrap_is_silent_and_prefers_gamepad() {
        let mut t = tracker();
        let log = record(&t);
        t.bootstrap([keyboard(), mouse(), pad()]);
        assert_eq!(t.current_device(), Some(&pad()));
        assert_eq!(t.current_group(), Some(&DeviceGroup::Gamepad));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn rapid_same_group_proposals_commit_once() {
        let mut t = tracker();
        t.bootstrap([keyboard(), mouse(), pad()]);
        let log = record(&t);
        let start = Instant::now();

        assert!(t.try_propose_device(&keyboard(), start));
        assert!(!t.try_propose_device(&keyboard(), start + Duration::from_millis(10)));
        assert!(!t.try_propose_device(&mouse(), start + Duration::from_millis(20)));
        assert!(!t.try_propose_device(&keyboard(), start + Duration::from_millis(300)));

        assert_eq!(log.borrow().len(), 1);
        assert_eq!(log.borrow()[0].previous, Some(pad()));
        assert_eq!(log.borrow()[0].current, Some(keyboard()));
    }

    #[test]
    fn debounce_rejects_other_group_inside_window() {
        let mut t = tracker();
        t.bootstrap([keyboard(), pad()]);
        let start = Instant::now();
        assert!(t.try_propose_device(&keyboard(), start));
        assert!(!t.try_propose_device(&pad(), start + Duration::from_millis(50)));
        assert!(t.try_propose_device(&pad(), start + Duration::from_millis(100)));
    }

    #[test]
    fn mouse_after_keyboard_is_no_change_but_gamepad_switches() {
        let mut t = tracker();
        t.bootstrap([keyboard(), mouse(), pad()]);
        let start = Instant::now();
        t.try_propose_device(&keyboard(), start);
        let log = record(&t);

        assert!(!t.try_propose_device(&mouse(), start + Duration::from_secs(1)));
        assert!(log.borrow().is_empty());

        assert!(t.try_propose_device(&pad(), start + Duration::from_secs(2)));
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(t.current_group(), Some(&DeviceGroup::Gamepad));
    }

    #[test]
    fn ungrouped_tracker_switches_between_keyboard_and_mouse() {
        let config = TrackerConfig {
            group_devices: false,
            ..TrackerConfig::default()
        };
        let mut t = DeviceTracker::new(&config, Arc::new(LayoutTable::builtin()));
        t.bootstrap([keyboard(), mouse()]);
        let start = Instant::now();
        assert!(!t.try_propose_device(&keyboard(), start));
        assert!(t.try_propose_device(&mouse(), start));
        assert_eq!(t.current_device(), Some(&mouse()));
    }

    #[test]
    fn disabled_devices_are_rejected() {
        let mut t = tracker();
        t.bootstrap([keyboard()]);
        assert!(!t.try_propose_device(&pad().disabled(), Instant::now()));
    }

    #[test]
    fn analog_motion_never_proposes() {
        let mut t = tracker();
        t.bootstrap([keyboard(), mouse(), pad()]);
        let now = Instant::now();
        t.try_propose_device(&keyboard(), now);
        let later = now + Duration::from_secs(1);

        let stick = InputEvent::axis(pad().id, "<Gamepad>/leftStick/x", 0.9);
        assert!(!t.on_input_event(&stick, later));
        let release = InputEvent::button(pad().id, "<Gamepad>/buttonSouth", false);
        assert!(!t.on_input_event(&release, later));

        let press = InputEvent::button(pad().id, "<Gamepad>/buttonSouth", true);
        assert!(t.on_input_event(&press, later));
    }

    #[test]
    fn raw_events_ignored_once_actions_are_wired() {
        let mut t = tracker();
        t.bootstrap([keyboard(), pad()]);
        t.set_action_signals(true);
        let now = Instant::now();
        let press = InputEvent::button(keyboard().id, "<Keyboard>/space", true);
        assert!(!t.on_input_event(&press, now));
        assert!(t.on_action_started(keyboard().id, now));
        assert!(!t.on_action_started(DeviceId(99), now + Duration::from_secs(1)));
    }

    #[test]
    fn added_device_adopted_silently_when_none() {
        let mut t = tracker();
        let log = record(&t);
        t.on_device_change(DeviceChange::Added(keyboard()), Instant::now());
        assert_eq!(t.current_device(), Some(&keyboard()));
        t.on_device_change(DeviceChange::Added(pad()), Instant::now());
        assert_eq!(t.current_device(), Some(&keyboard()));
        assert!(log.borrow().is_empty());
        assert_eq!(t.connected_devices().len(), 2);
    }

    #[test]
    fn removing_current_device_falls_back_in_priority_order() {
        let mut t = tracker();
        let other_pad = Device::new(4, "XInputController");
        t.bootstrap([pad(), keyboard(), other_pad.clone()]);
        let log = record(&t);
        let now = Instant::now();

        t.on_device_change(DeviceChange::Removed(pad().id), now);
        assert_eq!(t.current_device(), Some(&other_pad));

        // Fallback bypasses the debounce window armed by the first fallback.
        t.on_device_change(DeviceChange::Removed(other_pad.id), now);
        assert_eq!(t.current_device(), Some(&keyboard()));

        t.on_device_change(DeviceChange::Removed(keyboard().id), now);
        assert_eq!(t.current_device(), None);
        assert_eq!(t.current_group(), None);

        let log = log.borrow();
        assert_eq!(log.len(), 3);
        assert_eq!(log[2].previous, Some(keyboard()));
        assert_eq!(log[2].current, None);
    }

    #[test]
    fn removing_unregistered_current_device_still_falls_back() {
        let mut t = tracker();
        let start = Instant::now();
        t.on_device_change(DeviceChange::Added(keyboard()), start);
        assert!(t.try_propose_device(&pad(), start));
        let log = record(&t);

        t.on_device_change(DeviceChange::Removed(pad().id), start);
        assert_eq!(t.current_device(), Some(&keyboard()));
        let log = log.borrow();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].previous, Some(pad()));
        assert_eq!(log[0].current, Some(keyboard()));
    }

    #[test]
    fn removing_non_current_device_is_quiet() {
        let mut t = tracker();
        t.bootstrap([pad(), keyboard()]);
        let log = record(&t);
        t.on_device_change(DeviceChange::Removed(keyboard().id), Instant::now());
        assert!(log.borrow().is_empty());
        assert_eq!(t.current_device(), Some(&pad()));
    }

    #[test]
    fn disabling_current_device_acts_like_removal() {
        let mut t = tracker();
        t.bootstrap([pad(), keyboard()]);
        t.on_device_change(DeviceChange::Disabled(pad().id), Instant::now());
        assert_eq!(t.current_device(), Some(&keyboard()));
        assert_eq!(t.connected_devices().len(), 2);
    }

    #[test]
    fn icon_layout_redirects_mouse_to_keyboard() {
        let mut t = tracker();
        t.bootstrap([mouse()]);
        assert_eq!(t.current_icon_layout().as_deref(), Some("Keyboard"));
        assert_eq!(t.icon_layout("DualSenseGamepadHID"), "DualSenseGamepadHID");
    }

    #[test]
    fn listener_can_unsubscribe_inside_handler() {
        let mut t = tracker();
        t.bootstrap([keyboard(), pad()]);
        let hits = Rc::new(Cell::new(0));
        let own: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));
        let handle = t.observers().handle();
        let (h, me) = (Rc::clone(&hits), Rc::clone(&own));
        let id = t.subscribe(move |_| {
            h.set(h.get() + 1);
            if let Some(id) = me.get() {
                handle.unsubscribe(id);
            }
        });
        own.set(Some(id));

        let start = Instant::now();
        t.try_propose_device(&keyboard(), start);
        t.try_propose_device(&pad(), start + Duration::from_secs(1));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn deferred_consumer_subscribes_exactly_once() {
        let cell: Rc<Deferred<Observers<DeviceChanged>>> = Rc::new(Deferred::new());
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        cell.when_ready(move |obs| {
            let h = Rc::clone(&h);
            obs.subscribe(move |_| h.set(h.get() + 1));
        });

        let mut t = tracker();
        t.bootstrap([keyboard(), pad()]);
        cell.provide(t.observers());
        cell.provide(t.observers());
        assert_eq!(t.observers().len(), 1);

        t.try_propose_device(&keyboard(), Instant::now());
        assert_eq!(hits.get(), 1);
    }
}
