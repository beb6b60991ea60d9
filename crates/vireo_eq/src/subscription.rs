//! Band-Change Notifications
//!
//! A preset owns a [`ListenerRegistry`]; observers register a callback and
//! receive a [`Subscription`] handle. Dropping the handle detaches the
//! callback, so swapping the observed preset is just replacing the handle.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

/// A single band value change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandChange {
    pub band: usize,
    pub gain_db: f32,
}

type Listener = Arc<dyn Fn(BandChange) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: AtomicU64,
    entries: Mutex<Vec<(u64, Listener)>>,
}

/// Set of callbacks interested in band changes of one preset
#[derive(Default)]
pub struct ListenerRegistry {
    inner: Arc<Listeners>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback. It stays attached until the returned handle drops.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(BandChange) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.entries.lock().push((id, Arc::new(listener)));
        Subscription {
            id,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Deliver a change to every attached callback
    ///
    /// Callbacks run on a snapshot taken outside the registry lock, so a
    /// callback may drop its own subscription without deadlocking.
    pub fn notify(&self, change: BandChange) {
        let snapshot: Vec<Listener> = self
            .inner
            .entries
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in snapshot {
            listener(change);
        }
    }

    /// Number of attached callbacks
    pub fn len(&self) -> usize {
        self.inner.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Owned handle to a registered callback
#[must_use = "dropping a Subscription detaches the listener immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<Listeners>,
}

impl Subscription {
    /// Detach the callback now
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        // Registry already gone with its preset
        if let Some(registry) = self.registry.upgrade() {
            registry.entries.lock().retain(|(id, _)| *id != self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
