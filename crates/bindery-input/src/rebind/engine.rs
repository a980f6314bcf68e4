use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bindery_common::{BindingEvent, EventBus};
use bindery_config::schema::RebindConfig;
use tracing::{debug, info, warn};

use crate::device::InputEvent;
use crate::layout::LayoutGraph;
use crate::model::{ActionLocation, InputCatalog};
use crate::path::{matches_any, BindingPath};

use super::session::{AbortReason, RebindSession, RebindState};

/// Interactive rebind state machine.
///
/// At most one session exists at a time. `start_rebind` returns
/// immediately; captures arrive through `on_input` and the timeout is
/// checked by `tick` (and on every input).
pub struct RebindEngine {
    cancel_paths: Vec<BindingPath>,
    excluded_paths: Vec<BindingPath>,
    timeout: Option<Duration>,
    min_actuation: f32,
    reject_duplicates: bool,
    graph: Arc<dyn LayoutGraph + Send + Sync>,
    session: Option<RebindSession>,
}

fn timeout_from_secs(secs: f64) -> Option<Duration> {
    if secs.is_nan() || secs <= 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(secs)
        .inspect_err(|e| warn!(secs, "rebind timeout out of range, disabling it: {e}"))
        .ok()
}

fn parse_paths(kind: &str, paths: &[String]) -> Vec<BindingPath> {
    paths
        .iter()
        .filter_map(|p| {
            let parsed = BindingPath::parse(p);
            if parsed.is_none() {
                warn!(path = %p, kind, "ignoring unparseable binding path");
            }
            parsed
        })
        .collect()
}

impl RebindEngine {
    pub fn new(config: &RebindConfig, graph: Arc<dyn LayoutGraph + Send + Sync>) -> Self {
        let timeout = timeout_from_secs(config.timeout_secs);
        Self {
            cancel_paths: parse_paths("cancel", &config.cancel_paths),
            excluded_paths: parse_paths("excluded", &config.excluded_paths),
            timeout,
            min_actuation: config.min_actuation,
            reject_duplicates: config.reject_duplicates,
            graph,
            session: None,
        }
    }

    pub fn state(&self) -> RebindState {
        self.session
            .as_ref()
            .map(RebindSession::state)
            .unwrap_or(RebindState::Idle)
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Flat index currently being captured.
    pub fn current_binding(&self) -> Option<usize> {
        self.session.as_ref().and_then(RebindSession::current)
    }

    /// Start capturing for `action_key`. `index` defaults to the first
    /// binding that is not a composite part; a composite header starts at
    /// its first part. Returns whether a session started.
    pub fn start_rebind(
        &mut self,
        catalog: &mut InputCatalog,
        bus: &EventBus,
        action_key: &str,
        index: Option<usize>,
        now: Instant,
    ) -> bool {
        if self.session.is_some() {
            debug!("rebind already active, canceling it first");
            self.cancel_rebind(catalog, bus);
        }

        let Some(location) = catalog.find(action_key) else {
            warn!(action = action_key, "rebind requested for unknown action");
            return false;
        };
        let Some(action) = catalog.action(location) else {
            warn!(action = action_key, "rebind requested for unknown action");
            return false;
        };
        let Some(target) = index.or_else(|| action.first_non_part()) else {
            warn!(action = action_key, "action has no bindings to rebind");
            return false;
        };
        if target >= action.binding_count() {
            warn!(action = action_key, index = target, "binding index out of range");
            return false;
        }

        let queue: VecDeque<usize> = match action.part_range(target) {
            Some(parts) => parts.collect(),
            None => VecDeque::from([target]),
        };
        if queue.is_empty() {
            warn!(action = action_key, index = target, "composite has no parts to rebind");
            return false;
        }

        let name = catalog
            .qualified_name(location)
            .unwrap_or_else(|| action_key.to_string());
        let owner_was_enabled = catalog.owner_enabled(location);
        catalog.set_owner_enabled(location, false);

        let mut session = RebindSession {
            location,
            action: name.clone(),
            target,
            total: queue.len(),
            queue,
            started_at: now,
            deadline: None,
            owner_was_enabled,
            touched: Vec::new(),
        };
        session.arm(now, self.timeout);
        info!(action = %name, index = target, parts = session.total, "rebind started");
        self.session = Some(session);

        bus.publish(BindingEvent::RebindStarted {
            action: name,
            binding_index: target,
        });
        true
    }

    /// Feed one input event. Returns whether the engine used it (a capture,
    /// a rejected duplicate or a cancel).
    pub fn on_input(
        &mut self,
        catalog: &mut InputCatalog,
        bus: &EventBus,
        event: &InputEvent,
        now: Instant,
    ) -> bool {
        if self.session.is_none() || self.tick(catalog, bus, now) {
            return false;
        }
        let Some(path) = BindingPath::parse(&event.path) else {
            debug!(path = %event.path, "ignoring unparseable input path");
            return false;
        };

        if matches_any(&self.cancel_paths, &path, self.graph.as_ref()) {
            if event.is_press() {
                self.abort(catalog, bus, AbortReason::Canceled);
                return true;
            }
            return false;
        }
        if matches_any(&self.excluded_paths, &path, self.graph.as_ref()) {
            return false;
        }
        let actuation = event.actuation();
        if actuation <= 0.0 || actuation < self.min_actuation {
            return false;
        }

        self.capture(catalog, bus, path.to_string(), now)
    }

    /// Check the timeout. Returns whether the session timed out.
    pub fn tick(&mut self, catalog: &mut InputCatalog, bus: &EventBus, now: Instant) -> bool {
        match &self.session {
            Some(session) if session.expired(now) => {
                self.abort(catalog, bus, AbortReason::TimedOut);
                true
            }
            _ => false,
        }
    }

    /// Abort the active session, restoring every override it wrote.
    /// Returns `false` when idle.
    pub fn cancel_rebind(&mut self, catalog: &mut InputCatalog, bus: &EventBus) -> bool {
        if self.session.is_none() {
            return false;
        }
        self.abort(catalog, bus, AbortReason::Canceled);
        true
    }

    /// Clear overrides. A negative index clears the whole action, a composite
    /// header clears itself and its parts.
    pub fn reset_binding(
        &mut self,
        catalog: &mut InputCatalog,
        bus: &EventBus,
        action_key: &str,
        index: isize,
    ) -> bool {
        let Some(location) = catalog.find(action_key) else {
            warn!(action = action_key, "reset requested for unknown action");
            return false;
        };
        let name = catalog.qualified_name(location);
        let Some(action) = catalog.action_mut(location) else {
            warn!(action = action_key, "reset requested for unknown action");
            return false;
        };

        let Ok(index) = usize::try_from(index) else {
            action.clear_overrides();
            debug!(action = action_key, "cleared all overrides of action");
            bus.publish(BindingEvent::BindingsReset { action: name });
            return true;
        };

        let indices: Vec<usize> = match action.part_range(index) {
            Some(parts) => std::iter::once(index).chain(parts).collect(),
            None => vec![index],
        };
        let mut cleared = false;
        for i in indices {
            if let Some(binding) = action.binding_mut(i) {
                binding.override_path = None;
                cleared = true;
            }
        }
        if !cleared {
            warn!(action = action_key, index, "reset requested for missing binding");
            return false;
        }
        debug!(action = action_key, index, "cleared binding override");
        bus.publish(BindingEvent::BindingsReset { action: name });
        true
    }

    fn capture(
        &mut self,
        catalog: &mut InputCatalog,
        bus: &EventBus,
        path: String,
        now: Instant,
    ) -> bool {
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        let (location, current) = match session.current() {
            Some(current) => (session.location, current),
            None => return false,
        };
        let action_name = session.action.clone();

        if self.reject_duplicates && is_duplicate(catalog, location, current, &path) {
            info!(action = %action_name, path = %path, "capture already bound, still listening");
            bus.publish(BindingEvent::RebindDuplicate {
                action: action_name,
                binding_index: current,
                path,
            });
            return true;
        }

        let Some(binding) = catalog
            .action_mut(location)
            .and_then(|a| a.binding_mut(current))
        else {
            warn!(action = %action_name, index = current, "rebind target vanished, canceling");
            self.abort(catalog, bus, AbortReason::Canceled);
            return true;
        };
        let previous = binding.override_path.replace(path.clone());

        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.remember(current, previous);
        session.queue.pop_front();
        debug!(action = %action_name, index = current, path = %path, "captured binding");
        bus.publish(BindingEvent::RebindPartCaptured {
            action: action_name.clone(),
            binding_index: current,
            path,
        });

        if session.queue.is_empty() {
            let target = session.target;
            let elapsed = now.saturating_duration_since(session.started_at);
            self.finish(catalog);
            info!(action = %action_name, index = target, ?elapsed, "rebind completed");
            bus.publish(BindingEvent::RebindCompleted {
                action: action_name,
                binding_index: target,
            });
        } else {
            session.arm(now, self.timeout);
        }
        true
    }

    fn abort(&mut self, catalog: &mut InputCatalog, bus: &EventBus, reason: AbortReason) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let (location, action, target) = (session.location, session.action.clone(), session.target);
        if let Some(a) = catalog.action_mut(location) {
            for (index, previous) in session.touched.iter().rev() {
                if let Some(binding) = a.binding_mut(*index) {
                    binding.override_path = previous.clone();
                }
            }
        }
        self.finish(catalog);

        let event = match reason {
            AbortReason::Canceled => {
                info!(action = %action, index = target, "rebind canceled");
                BindingEvent::RebindCanceled {
                    action,
                    binding_index: target,
                }
            }
            AbortReason::TimedOut => {
                info!(action = %action, index = target, "rebind timed out");
                BindingEvent::RebindTimedOut {
                    action,
                    binding_index: target,
                }
            }
        };
        bus.publish(event);
    }

    /// Drop the session and restore the owner's enablement.
    fn finish(&mut self, catalog: &mut InputCatalog) {
        if let Some(session) = self.session.take() {
            catalog.set_owner_enabled(session.location, session.owner_was_enabled);
        }
    }
}

/// Whether `path` is already the effective path of another binding owned by
/// the same action map (or the same runtime action).
fn is_duplicate(
    catalog: &InputCatalog,
    location: ActionLocation,
    index: usize,
    path: &str,
) -> bool {
    catalog.siblings(location).into_iter().any(|loc| {
        catalog.action(loc).is_some_and(|action| {
            action.slots().iter().any(|slot| {
                !(loc == location && slot.index == index)
                    && !slot.is_composite()
                    && slot.binding.effective_path().eq_ignore_ascii_case(path)
            })
        })
    })
}
