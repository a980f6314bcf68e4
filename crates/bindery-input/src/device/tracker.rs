use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bindery_config::schema::TrackerConfig;
use tracing::{debug, info, trace};

use crate::layout::LayoutGraph;

use super::observers::{ListenerId, Observers};
use super::types::{classify, Device, DeviceChange, DeviceChanged, DeviceGroup, DeviceId, InputEvent};

/// Best guess of the device the player is currently using.
///
/// Fed from three signal sources: started actions, raw input events (only
/// while no action signals are wired up), and device lifecycle changes.
/// Accepted changes are debounced and grouped so incidental input from a
/// second device does not make prompts flicker.
pub struct DeviceTracker {
    debounce: Duration,
    group_devices: bool,
    layout_redirects: BTreeMap<String, String>,
    graph: Arc<dyn LayoutGraph + Send + Sync>,
    devices: Vec<Device>,
    current: Option<Device>,
    current_group: Option<DeviceGroup>,
    last_change: Option<Instant>,
    action_signals: bool,
    observers: Observers<DeviceChanged>,
}

impl DeviceTracker {
    pub fn new(config: &TrackerConfig, graph: Arc<dyn LayoutGraph + Send + Sync>) -> Self {
        Self {
            debounce: Duration::from_millis(config.debounce_ms),
            group_devices: config.group_devices,
            layout_redirects: config.layout_redirects.clone(),
            graph,
            devices: Vec::new(),
            current: None,
            current_group: None,
            last_change: None,
            action_signals: false,
            observers: Observers::new(),
        }
    }

    /// Register the devices present at startup and silently adopt the best one.
    pub fn bootstrap(&mut self, devices: impl IntoIterator<Item = Device>) {
        for device in devices {
            self.upsert(device);
        }
        if self.current.is_none() {
            if let Some(device) = self.fallback_candidate(None) {
                debug!(device = %device.id, layout = %device.layout, "adopting initial device");
                self.commit(device, None);
            }
        }
    }

    pub fn current_device(&self) -> Option<&Device> {
        self.current.as_ref()
    }

    pub fn current_group(&self) -> Option<&DeviceGroup> {
        self.current_group.as_ref()
    }

    /// Layout of the current device as icon lookup should see it.
    pub fn current_icon_layout(&self) -> Option<String> {
        self.current.as_ref().map(|d| self.icon_layout(&d.layout))
    }

    /// Apply the configured layout redirects (Mouse -> Keyboard by default).
    pub fn icon_layout(&self, layout: &str) -> String {
        self.layout_redirects
            .iter()
            .find(|(from, _)| self.graph.is_based_on(layout, from))
            .map(|(_, to)| to.clone())
            .unwrap_or_else(|| layout.to_string())
    }

    pub fn connected_devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn classify(&self, device: &Device) -> DeviceGroup {
        classify(&device.layout, self.graph.as_ref())
    }

    pub fn subscribe(&self, listener: impl FnMut(&DeviceChanged) + 'static) -> ListenerId {
        self.observers.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// The registry itself, for consumers that attach through a deferred cell.
    pub fn observers(&self) -> Observers<DeviceChanged> {
        self.observers.clone()
    }

    /// Once actions are wired up, raw events stop proposing devices.
    pub fn set_action_signals(&mut self, enabled: bool) {
        self.action_signals = enabled;
    }

    /// An action started; `device` is the owner of the control that triggered it.
    pub fn on_action_started(&mut self, device: DeviceId, now: Instant) -> bool {
        match self.device(device).cloned() {
            Some(d) => self.try_propose_device(&d, now),
            None => {
                trace!(device = %device, "action started on unknown device");
                false
            }
        }
    }

    /// A raw input event. Only discrete presses propose a device.
    pub fn on_input_event(&mut self, event: &InputEvent, now: Instant) -> bool {
        if self.action_signals || !event.is_press() {
            return false;
        }
        match self.device(event.device).cloned() {
            Some(d) => self.try_propose_device(&d, now),
            None => false,
        }
    }

    pub fn on_device_change(&mut self, change: DeviceChange, now: Instant) {
        match change {
            DeviceChange::Added(device) | DeviceChange::Reconnected(device) => {
                self.upsert(device.clone());
                if self.current.is_none() && device.enabled {
                    debug!(device = %device.id, layout = %device.layout, "adopting first device");
                    self.commit(device, None);
                }
            }
            DeviceChange::Removed(id) => {
                let removed = self.known_or_current(id);
                self.devices.retain(|d| d.id != id);
                if let Some(removed) = removed {
                    self.replace_if_current(removed, now);
                }
            }
            DeviceChange::Enabled(id) => {
                if let Some(d) = self.devices.iter_mut().find(|d| d.id == id) {
                    d.enabled = true;
                }
                if self.current.is_none() {
                    if let Some(device) = self.device(id).cloned() {
                        self.commit(device, None);
                    }
                }
            }
            DeviceChange::Disabled(id) => {
                if let Some(d) = self.devices.iter_mut().find(|d| d.id == id) {
                    d.enabled = false;
                }
                if let Some(device) = self.known_or_current(id) {
                    self.replace_if_current(device, now);
                }
            }
        }
    }

    /// Propose `device` as the current one. Returns whether it was committed.
    pub fn try_propose_device(&mut self, device: &Device, now: Instant) -> bool {
        if !device.enabled {
            return false;
        }
        if let Some(last) = self.last_change {
            if now.saturating_duration_since(last) < self.debounce {
                trace!(device = %device.id, "device proposal debounced");
                return false;
            }
        }

        let group = self.classify(device);
        if self.group_devices {
            if self.current_group.as_ref() == Some(&group) {
                return false;
            }
        } else if self.current.as_ref().is_some_and(|c| c.id == device.id) {
            return false;
        }

        let previous = self.current.clone();
        self.commit(device.clone(), Some(now));
        info!(
            from = previous.as_ref().map(|d| d.layout.as_str()).unwrap_or("none"),
            to = %device.layout,
            group = %group,
            "active device changed"
        );
        self.observers.notify(&DeviceChanged {
            previous,
            current: Some(device.clone()),
        });
        true
    }

    /// Proposed devices need not be registered, so fall back to the current one.
    fn known_or_current(&self, id: DeviceId) -> Option<Device> {
        self.device(id)
            .or_else(|| self.current.as_ref().filter(|c| c.id == id))
            .cloned()
    }

    /// Adoptions without a timestamp are silent and do not arm the debounce.
    fn commit(&mut self, device: Device, now: Option<Instant>) {
        self.current_group = Some(self.classify(&device));
        self.current = Some(device);
        if let Some(now) = now {
            self.last_change = Some(now);
        }
    }

    /// The current device went away: pick a replacement, bypassing debounce.
    fn replace_if_current(&mut self, gone: Device, now: Instant) {
        if self.current.as_ref().map(|d| d.id) != Some(gone.id) {
            return;
        }
        let replacement = self.fallback_candidate(Some(gone.id));
        match &replacement {
            Some(device) => {
                info!(from = %gone.layout, to = %device.layout, "current device lost, falling back");
                self.commit(device.clone(), Some(now));
            }
            None => {
                info!(layout = %gone.layout, "current device lost, none left");
                self.current = None;
                self.current_group = None;
            }
        }
        self.observers.notify(&DeviceChanged {
            previous: Some(gone),
            current: replacement,
        });
    }

    /// Any gamepad, else any keyboard, else any other enabled device.
    fn fallback_candidate(&self, exclude: Option<DeviceId>) -> Option<Device> {
        let candidates: Vec<&Device> = self
            .devices
            .iter()
            .filter(|d| d.enabled && Some(d.id) != exclude)
            .collect();
        candidates
            .iter()
            .find(|d| self.classify(d) == DeviceGroup::Gamepad)
            .or_else(|| {
                candidates
                    .iter()
                    .find(|d| self.graph.is_based_on(&d.layout, "Keyboard"))
            })
            .or_else(|| candidates.first())
            .map(|d| (*d).clone())
    }

    fn device(&self, id: DeviceId) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }

    fn upsert(&mut self, device: Device) {
        match self.devices.iter_mut().find(|d| d.id == device.id) {
            Some(existing) => *existing = device,
            None => self.devices.push(device),
        }
    }
}
