//! Scoped listener registration
//!
//! `ListenerRegistry::subscribe` hands back a `Subscription` that owns the
//! registration. Dropping it (or calling `unsubscribe`) removes the listener
//! exactly once, so repeated start/stop cycles never accumulate listeners.
//!
//! Everything here is single-threaded: callbacks run on the thread that
//! dispatches, and the types are deliberately `!Send`.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;

type Callback<E> = Rc<dyn Fn(&E)>;

/// Registration flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerOptions {
    /// The listener only observes and never blocks the host's default
    /// scroll handling
    pub passive: bool,
}

impl Default for ListenerOptions {
    fn default() -> Self {
        Self { passive: true }
    }
}

impl ListenerOptions {
    pub fn passive() -> Self {
        Self { passive: true }
    }

    pub fn active() -> Self {
        Self { passive: false }
    }
}

struct Entry<E> {
    id: u64,
    options: ListenerOptions,
    callback: Callback<E>,
}

struct Inner<E> {
    next_id: u64,
    entries: Vec<Entry<E>>,
}

/// Removal side of a registry, erased over the event type so that
/// `Subscription` does not need a type parameter
trait Detach {
    fn detach(&self, id: u64) -> bool;
    fn contains(&self, id: u64) -> bool;
}

impl<E> Detach for RefCell<Inner<E>> {
    fn detach(&self, id: u64) -> bool {
        let mut inner = self.borrow_mut();
        let before = inner.entries.len();
        inner.entries.retain(|entry| entry.id != id);
        inner.entries.len() != before
    }

    fn contains(&self, id: u64) -> bool {
        self.borrow().entries.iter().any(|entry| entry.id == id)
    }
}

/// Set of callbacks interested in events of type `E`
pub struct ListenerRegistry<E> {
    inner: Rc<RefCell<Inner<E>>>,
}

impl<E: 'static> Default for ListenerRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for ListenerRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.inner.borrow().entries.len())
            .finish()
    }
}

impl<E: 'static> ListenerRegistry<E> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                next_id: 1,
                entries: Vec::new(),
            })),
        }
    }

    /// Register a callback; it stays registered until the returned
    /// `Subscription` is dropped or unsubscribed
    #[must_use = "dropping the subscription immediately removes the listener"]
    pub fn subscribe<F>(&self, options: ListenerOptions, callback: F) -> Subscription
    where
        F: Fn(&E) + 'static,
    {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.entries.push(Entry {
                id,
                options,
                callback: Rc::new(callback),
            });
            id
        };
        trace!(id, passive = options.passive, "listener registered");

        let registry: Weak<dyn Detach> = Rc::downgrade(&self.inner) as Weak<dyn Detach>;
        Subscription {
            id,
            registry: Some(registry),
        }
    }

    /// Invoke every registered listener with `event`
    ///
    /// Callbacks may subscribe or unsubscribe while the dispatch is running.
    /// A listener removed mid-dispatch is not called afterwards; one added
    /// mid-dispatch first sees the next event.
    pub fn dispatch(&self, event: &E) {
        let snapshot: Vec<(u64, Callback<E>)> = self
            .inner
            .borrow()
            .entries
            .iter()
            .map(|entry| (entry.id, Rc::clone(&entry.callback)))
            .collect();

        for (id, callback) in snapshot {
            if self.inner.contains(id) {
                (*callback)(event);
            }
        }
    }

    /// Number of live listeners
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Number of live listeners registered as passive
    pub fn passive_count(&self) -> usize {
        self.inner
            .borrow()
            .entries
            .iter()
            .filter(|entry| entry.options.passive)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.listener_count() == 0
    }
}

/// Handle owning one listener registration
///
/// The registration is released when this handle is dropped. The handle holds
/// only a weak reference, so it never keeps the registry alive.
pub struct Subscription {
    id: u64,
    registry: Option<Weak<dyn Detach>>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// True while the listener is still registered
    pub fn is_active(&self) -> bool {
        self.registry
            .as_ref()
            .and_then(Weak::upgrade)
            .is_some_and(|registry| registry.contains(self.id))
    }

    /// Remove the listener now
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(registry) = self.registry.take().and_then(|weak| weak.upgrade()) {
            if registry.detach(self.id) {
                trace!(id = self.id, "listener released");
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
