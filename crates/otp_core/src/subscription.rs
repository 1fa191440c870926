//! Change-listener registry and the subscription handle that owns a listener.
//!
//! A [`Subscription`] is a scoped resource: the listener stays registered
//! exactly as long as the handle is alive (or until [`Subscription::close`]).
//! Closing is synchronous, so once `close` returns the listener can no longer
//! fire, even if the store is rebuilt immediately afterwards.

use crate::segment::Segment;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

pub(crate) type Listener = Box<dyn FnMut(&[Segment])>;

#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

impl ListenerRegistry {
    pub(crate) fn insert(&mut self, listener: Listener) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push((id, listener));
        id
    }

    fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|(entry_id, _)| *entry_id == id)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Invoke every listener in registration order.
    ///
    /// Listeners must not subscribe or unsubscribe from inside the callback.
    pub(crate) fn emit(&mut self, segments: &[Segment]) {
        for (_, listener) in self.entries.iter_mut() {
            listener(segments);
        }
    }
}

pub(crate) type SharedRegistry = Rc<RefCell<ListenerRegistry>>;

/// Handle to a registered change listener.
///
/// Dropping the handle closes it.
#[must_use = "dropping a Subscription immediately unregisters its listener"]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<ListenerRegistry>>,
}

impl Subscription {
    pub(crate) fn new(id: u64, registry: &SharedRegistry) -> Self {
        Self {
            id,
            registry: Rc::downgrade(registry),
        }
    }

    /// Returns `true` once the listener can no longer fire.
    pub fn is_closed(&self) -> bool {
        self.registry
            .upgrade()
            .is_none_or(|registry| !registry.borrow().contains(self.id))
    }

    /// Unregister the listener now.
    pub fn close(self) {
        // Drop does the work.
    }

    fn release(&self) {
        if let Some(registry) = self.registry.upgrade()
            && registry.borrow_mut().remove(self.id)
        {
            log::trace!(target: "otp.store", "subscription {} closed", self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("closed", &self.is_closed())
            .finish()
    }
}
