//! Deferred access to a service that may not exist yet.
//!
//! Consumers call [`Deferred::when_ready`] at their own initialization. If
//! the service was already provided the callback runs immediately, otherwise
//! it runs exactly once when [`Deferred::provide`] is called.

use std::cell::RefCell;

use tracing::warn;

type Pending<T> = Box<dyn FnOnce(&T)>;

pub struct Deferred<T: Clone> {
    value: RefCell<Option<T>>,
    pending: RefCell<Vec<Pending<T>>>,
}

impl<T: Clone> Default for Deferred<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Deferred<T> {
    pub fn new() -> Self {
        Self {
            value: RefCell::new(None),
            pending: RefCell::new(Vec::new()),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.value.borrow().is_some()
    }

    pub fn get(&self) -> Option<T> {
        self.value.borrow().clone()
    }

    pub fn when_ready(&self, f: impl FnOnce(&T) + 'static) {
        let ready = self.get();
        match ready {
            Some(value) => f(&value),
            None => self.pending.borrow_mut().push(Box::new(f)),
        }
    }

    /// Provide the service and run every queued callback. Later calls are ignored.
    pub fn provide(&self, value: T) {
        if self.is_ready() {
            warn!("deferred service provided twice; keeping the first instance");
            return;
        }
        *self.value.borrow_mut() = Some(value.clone());
        let pending = std::mem::take(&mut *self.pending.borrow_mut());
        for f in pending {
            f(&value);
        }
    }
}
