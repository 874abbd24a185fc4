//! Signal/slot system for Slat.
//!
//! This module provides a type-safe signal/slot mechanism for change
//! notification. Signals are emitted by controls when their state changes,
//! and connected slots (callbacks) are invoked in response.
//!
//! Slots are always invoked directly on the emitting thread: the list core
//! is single-threaded and cooperative, so there is no queued delivery.
//! Signals themselves are still `Send + Sync` so controls that embed them
//! can cross thread boundaries before use.
//!
//! # Example
//!
//! ```
//! use slat_core::Signal;
//!
//! let selection_changed = Signal::<usize>::new();
//!
//! let conn_id = selection_changed.connect(|&index| {
//!     println!("Selected item {index}");
//! });
//!
//! selection_changed.emit(3);
//! selection_changed.disconnect(conn_id);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via
    /// [`Signal::disconnect`]. The ID remains valid until the connection is
    /// explicitly disconnected or the signal is dropped.
    pub struct ConnectionId;
}

/// Internal storage for a single connection.
struct Connection<Args> {
    /// The slot function to invoke (Arc-wrapped so emission can run outside
    /// the connection table lock).
    slot: Arc<dyn Fn(&Args) + Send + Sync>,
}

/// Shared state behind a signal and its guards.
struct SignalInner<Args> {
    connections: Mutex<SlotMap<ConnectionId, Connection<Args>>>,
    blocked: AtomicBool,
}

/// A type-safe signal that can have multiple connected slots.
///
/// When a signal is emitted, every connected slot is invoked with a
/// reference to the emitted arguments, in connection order.
///
/// Cloning a signal produces another handle to the same connection table:
/// emitting through either handle invokes the same slots.
pub struct Signal<Args = ()> {
    inner: Arc<SignalInner<Args>>,
}

impl<Args> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SignalInner {
                connections: Mutex::new(SlotMap::with_key()),
                blocked: AtomicBool::new(false),
            }),
        }
    }

    /// Connect a slot to this signal.
    ///
    /// The slot is invoked with a reference to the arguments every time the
    /// signal is emitted. Returns a [`ConnectionId`] that can be used to
    /// disconnect later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let mut connections = self.inner.connections.lock();
        connections.insert(Connection {
            slot: Arc::new(slot),
        })
    }

    /// Connect a slot, returning a guard that disconnects when dropped.
    pub fn connect_with_guard<F>(&self, slot: F) -> ConnectionGuard<Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard {
            inner: Arc::clone(&self.inner),
            id,
        }
    }

    /// Disconnect a previously connected slot.
    ///
    /// Returns `true` if the connection existed and was removed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.inner.connections.lock().remove(id).is_some()
    }

    /// Remove all connections.
    pub fn disconnect_all(&self) {
        self.inner.connections.lock().clear();
    }

    /// The number of currently connected slots.
    pub fn connection_count(&self) -> usize {
        self.inner.connections.lock().len()
    }

    /// Whether emission is currently blocked.
    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.inner.blocked.load(Ordering::Relaxed)
    }

    /// Block or unblock emission.
    ///
    /// While blocked, [`emit`](Signal::emit) is a no-op. Used to suppress
    /// notification while synchronizing redundant state.
    pub fn set_blocked(&self, blocked: bool) {
        self.inner.blocked.store(blocked, Ordering::Relaxed);
    }

    /// Emit the signal, invoking every connected slot with the arguments.
    ///
    /// Slots are invoked outside the connection table lock, so a slot may
    /// connect or disconnect other slots without deadlocking; such changes
    /// take effect from the next emission.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            return;
        }

        let slots: Vec<Arc<dyn Fn(&Args) + Send + Sync>> = {
            let connections = self.inner.connections.lock();
            connections.values().map(|c| Arc::clone(&c.slot)).collect()
        };

        for slot in slots {
            slot(&args);
        }
    }
}

impl<Args> Clone for Signal<Args> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<Args> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connection_count())
            .field("blocked", &self.is_blocked())
            .finish()
    }
}

/// RAII guard that disconnects a slot when dropped.
pub struct ConnectionGuard<Args = ()> {
    inner: Arc<SignalInner<Args>>,
    id: ConnectionId,
}

impl<Args> ConnectionGuard<Args> {
    /// The ID of the guarded connection.
    #[inline]
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        self.inner.connections.lock().remove(self.id);
    }
}

static_assertions::assert_impl_all!(Signal<usize>: Send, Sync);
static_assertions::assert_impl_all!(ConnectionGuard<usize>: Send, Sync);
