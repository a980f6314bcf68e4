use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Lifecycle events produced by the rebind engine and the override store.
///
/// Device changes are not published here: they are delivered synchronously
/// through the device tracker's observer registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum BindingEvent {
    RebindStarted { action: String, binding_index: usize },
    RebindPartCaptured { action: String, binding_index: usize, path: String },
    RebindDuplicate { action: String, binding_index: usize, path: String },
    RebindCompleted { action: String, binding_index: usize },
    RebindCanceled { action: String, binding_index: usize },
    RebindTimedOut { action: String, binding_index: usize },
    BindingsReset { action: Option<String> },
    BindingsSaved { key: String, count: usize },
    BindingsLoaded { key: String, applied: usize, skipped: usize },
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<BindingEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BindingEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: BindingEvent) -> usize {
        tracing::trace!(?event, "publishing binding event");
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
