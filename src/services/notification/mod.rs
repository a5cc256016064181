//! Typed notification bus for scheduler diagnostics.
//!
//! Observers register a closure and receive every [`SchedulerNotice`] the
//! scheduler publishes. Registration hands back a [`Subscription`]; dropping
//! it (or calling [`Subscription::unsubscribe`]) removes the observer.

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use crate::scheduler::drag::DragMode;

/// Which remote call a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOperation {
    FetchRoutines,
    FetchEvents,
    CreateEvent,
    DeleteEvent,
    /// Re-creating a moved event after its replacement could not be created.
    RestoreEvent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerNotice {
    DragStarted { routine_id: String, mode: DragMode },
    DragCancelled { routine_id: String },
    EventsReplaced { count: usize },
    SyncFailed { operation: SyncOperation, message: String },
}

type Handler = Arc<dyn Fn(&SchedulerNotice) + Send + Sync>;

#[derive(Default)]
struct BusState {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
}

fn lock(state: &Mutex<BusState>) -> MutexGuard<'_, BusState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Cloneable handle; clones share the same observer list.
#[derive(Clone, Default)]
pub struct NotificationBus {
    state: Arc<Mutex<BusState>>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&SchedulerNotice) + Send + Sync + 'static,
    {
        let mut state = lock(&self.state);
        let id = state.next_id;
        state.next_id += 1;
        state.handlers.push((id, Arc::new(handler)));

        Subscription {
            id,
            state: Arc::downgrade(&self.state),
        }
    }

    /// Forward every notice to the `log` facade at debug level.
    pub fn subscribe_logger(&self) -> Subscription {
        self.subscribe(|notice| log::debug!("NOTE: {:?}", notice))
    }

    pub fn publish(&self, notice: &SchedulerNotice) {
        // Handlers run outside the lock so they may subscribe or unsubscribe.
        let handlers: Vec<Handler> = lock(&self.state)
            .handlers
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        for handler in handlers {
            handler(notice);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.state).handlers.len()
    }
}

/// Disposer returned by [`NotificationBus::subscribe`].
#[must_use = "dropping a Subscription unregisters its handler"]
pub struct Subscription {
    id: u64,
    state: Weak<Mutex<BusState>>,
}

impl Subscription {
    pub fn unsubscribe(self) {}

    /// Keep the handler registered for the lifetime of the bus.
    pub fn detach(mut self) {
        self.state = Weak::new();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            lock(&state).handlers.retain(|(id, _)| *id != self.id);
        }
    }
}
