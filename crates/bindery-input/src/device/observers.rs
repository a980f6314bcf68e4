//! Synchronous observer registry.
//!
//! Listeners are called in subscription order on the notifying thread.
//! A listener may unsubscribe itself (or others) while being notified:
//! notification iterates a snapshot and skips entries removed meanwhile.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

type Callback<E> = Rc<RefCell<Box<dyn FnMut(&E)>>>;

/// Handle returned by [`Observers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

struct Registry<E> {
    next: u64,
    listeners: HashMap<u64, Callback<E>>,
}

/// A cloneable, single-threaded list of listeners for events of type `E`.
pub struct Observers<E> {
    inner: Rc<RefCell<Registry<E>>>,
}

impl<E> Clone for Observers<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Observers<E> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                next: 0,
                listeners: HashMap::new(),
            })),
        }
    }

    pub fn subscribe(&self, listener: impl FnMut(&E) + 'static) -> ListenerId {
        let callback: Box<dyn FnMut(&E)> = Box::new(listener);
        let mut reg = self.inner.borrow_mut();
        let id = reg.next;
        reg.next += 1;
        reg.listeners.insert(id, Rc::new(RefCell::new(callback)));
        ListenerId(id)
    }

    /// Returns whether the listener was registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.inner.borrow_mut().listeners.remove(&id.0).is_some()
    }

    pub fn is_subscribed(&self, id: ListenerId) -> bool {
        self.inner.borrow().listeners.contains_key(&id.0)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().listeners.is_empty()
    }

    /// A weak handle listeners can capture to unsubscribe from inside a callback.
    pub fn handle(&self) -> ObserverHandle<E> {
        ObserverHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn notify(&self, event: &E) {
        let mut snapshot: Vec<(u64, Callback<E>)> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(id, cb)| (*id, Rc::clone(cb)))
            .collect();
        snapshot.sort_by_key(|(id, _)| *id);

        for (id, callback) in snapshot {
            if !self.inner.borrow().listeners.contains_key(&id) {
                continue;
            }
            // A listener that re-enters notify is not called recursively.
            if let Ok(mut f) = callback.try_borrow_mut() {
                f(event);
            }
        }
    }
}

/// Weak reference to an [`Observers`] registry.
pub struct ObserverHandle<E> {
    inner: Weak<RefCell<Registry<E>>>,
}

impl<E> Clone for ObserverHandle<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<E> ObserverHandle<E> {
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        match self.inner.upgrade() {
            Some(inner) => inner.borrow_mut().listeners.remove(&id.0).is_some(),
            None => false,
        }
    }
}
