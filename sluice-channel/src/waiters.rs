use std::sync::Arc;

use crate::signal::Signal;

/// The select notifiers attached to a channel.
///
/// Handles are compared by identity, and the same handle may be present
/// more than once: a select that lists one channel in several entries
/// registers once per entry and unregisters the same number of times.
pub(crate) struct WaiterList {
    entries: Vec<Arc<Signal>>,
}

impl WaiterList {
    pub(crate) fn new() -> WaiterList {
        WaiterList {
            entries: Vec::new(),
        }
    }

    pub(crate) fn insert(&mut self, handle: Arc<Signal>) {
        self.entries.push(handle);
    }

    /// Removes one occurrence of `handle`, if present.
    pub(crate) fn remove(&mut self, handle: &Arc<Signal>) {
        if let Some(pos) = self.entries.iter().position(|w| Arc::ptr_eq(w, handle)) {
            self.entries.swap_remove(pos);
        }
    }

    /// Posts every attached notifier.
    pub(crate) fn notify_all(&self) {
        for waiter in &self.entries {
            waiter.notify();
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
