use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::model::ActionLocation;

/// Observable engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebindState {
    Idle,
    /// Capturing `part` (1-based) of `of` consecutive bindings.
    Listening { part: usize, of: usize },
}

/// How a session ended short of completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AbortReason {
    Canceled,
    TimedOut,
}

/// The single in-flight capture. Owned exclusively by the engine.
#[derive(Debug)]
pub(crate) struct RebindSession {
    pub location: ActionLocation,
    /// Qualified action name used in events and logs.
    pub action: String,
    /// The index the caller asked for (a composite header or a single binding).
    pub target: usize,
    /// Flat indices still to capture; the front is the one being listened for.
    pub queue: VecDeque<usize>,
    pub total: usize,
    pub started_at: Instant,
    pub deadline: Option<Instant>,
    /// Owner enablement before the session disabled it.
    pub owner_was_enabled: bool,
    /// Prior override of every binding written so far, for a full abort.
    pub touched: Vec<(usize, Option<String>)>,
}

impl RebindSession {
    pub fn current(&self) -> Option<usize> {
        self.queue.front().copied()
    }

    pub fn state(&self) -> RebindState {
        RebindState::Listening {
            part: self.total - self.queue.len() + 1,
            of: self.total,
        }
    }

    pub fn arm(&mut self, now: Instant, timeout: Option<Duration>) {
        self.deadline = timeout.and_then(|t| now.checked_add(t));
    }

    pub fn expired(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| now >= d)
    }

    /// Remember the override of `index` before its first write.
    pub fn remember(&mut self, index: usize, previous: Option<String>) {
        if !self.touched.iter().any(|(i, _)| *i == index) {
            self.touched.push((index, previous));
        }
    }
}
