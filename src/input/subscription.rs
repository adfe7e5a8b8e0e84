//! Callback registration with scoped release.
//!
//! Every registration hands back a [`Subscription`]. Dropping it (or
//! calling [`Subscription::release`]) removes the callback, so listener
//! lifetime is tied to the owner of the handle rather than to whatever
//! the closure happens to capture.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Handler<T> = Box<dyn FnMut(&T)>;

struct Slots<T> {
    next_id: u64,
    handlers: Vec<(u64, Handler<T>)>,
    /// Number of `emit` calls in progress, counting nested ones.
    emit_depth: usize,
    /// Releases that arrived while handlers were detached. Cleared when
    /// the outermost `emit` finishes.
    released_during_emit: Vec<u64>,
}

impl<T> Slots<T> {
    fn remove(&mut self, id: u64) {
        if let Some(index) = self.handlers.iter().position(|(h, _)| *h == id) {
            drop(self.handlers.remove(index));
        } else if self.emit_depth > 0 {
            self.released_during_emit.push(id);
        }
    }
}

/// A list of callbacks notified with a `&T`.
///
/// Single-threaded: handlers run synchronously inside [`Registry::emit`].
/// Handlers may subscribe or release during an emit; new handlers are
/// first called on the next emit.
pub struct Registry<T> {
    slots: Rc<RefCell<Slots<T>>>,
}

impl<T: 'static> Registry<T> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Slots {
                next_id: 0,
                handlers: Vec::new(),
                emit_depth: 0,
                released_during_emit: Vec::new(),
            })),
        }
    }

    /// Register `handler`. It stays registered until the returned handle
    /// is dropped.
    #[must_use = "dropping the subscription unregisters the handler"]
    pub fn subscribe(&self, handler: impl FnMut(&T) + 'static) -> Subscription {
        let id = {
            let mut slots = self.slots.borrow_mut();
            let id = slots.next_id;
            slots.next_id += 1;
            slots.handlers.push((id, Box::new(handler)));
            id
        };

        let weak: Weak<RefCell<Slots<T>>> = Rc::downgrade(&self.slots);
        Subscription::new(move || {
            if let Some(slots) = weak.upgrade() {
                if let Ok(mut slots) = slots.try_borrow_mut() {
                    slots.remove(id);
                }
            }
        })
    }

    /// Call every registered handler with `value`.
    ///
    /// A handler may emit on the same registry; the nested call only
    /// reaches handlers subscribed since the outer call began.
    pub fn emit(&self, value: &T) {
        let mut handlers = {
            let mut slots = self.slots.borrow_mut();
            slots.emit_depth += 1;
            std::mem::take(&mut slots.handlers)
        };

        for (_, handler) in &mut handlers {
            handler(value);
        }

        let mut slots = self.slots.borrow_mut();
        slots.emit_depth -= 1;
        handlers.retain(|(id, _)| !slots.released_during_emit.contains(id));
        if slots.emit_depth == 0 {
            slots.released_during_emit.clear();
        }
        handlers.append(&mut slots.handlers);
        slots.handlers = handlers;
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.borrow().handlers.len()
    }

    /// Whether no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Registry<T> {
    /// Clones share the same handler list.
    fn clone(&self) -> Self {
        Self {
            slots: Rc::clone(&self.slots),
        }
    }
}

impl<T> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.slots.try_borrow().map_or(0, |s| s.handlers.len());
        f.debug_struct("Registry").field("handlers", &len).finish()
    }
}

/// Handle for a registered listener. Dropping it unregisters.
#[must_use = "dropping the subscription unregisters the handler"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wrap an arbitrary release action.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Unregister now.
    pub fn release(mut self) {
        self.run_release();
    }

    /// Whether the handle still holds a registration.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
