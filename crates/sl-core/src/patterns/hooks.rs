//! Lifecycle hook registration and dispatch.
//!
//! [`HookList`] manages a list of subscriber callbacks and notifies them
//! in registration order.  Registration and notification both work
//! through `&self` references; the list itself is guarded by a mutex so a
//! host may dispatch events from any thread.

use std::sync::{Arc, Mutex};

/// A shared callback invoked with a reference to each dispatched event.
pub type Hook<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// A thread-safe list of event callbacks.
pub struct HookList<E> {
    hooks: Mutex<Vec<Hook<E>>>,
}

impl<E> Default for HookList<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> HookList<E> {
    /// Create a new, empty hook list.
    pub fn new() -> Self {
        Self {
            hooks: Mutex::new(Vec::new()),
        }
    }

    /// Register a hook to receive all future events.
    pub fn register(&self, hook: Hook<E>) {
        self.hooks.lock().expect("hook list mutex poisoned").push(hook);
    }

    /// Register a plain closure as a hook.
    pub fn register_fn(&self, hook: impl Fn(&E) + Send + Sync + 'static) {
        self.register(Arc::new(hook));
    }

    /// Invoke every registered hook with `event`, in registration order.
    ///
    /// The list lock is released before any hook runs, so a hook may
    /// register further hooks (they receive only later events).
    pub fn notify(&self, event: &E) {
        let hooks: Vec<Hook<E>> = self
            .hooks
            .lock()
            .expect("hook list mutex poisoned")
            .clone();
        for hook in hooks {
            hook(event);
        }
    }

    /// Number of currently registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.lock().expect("hook list mutex poisoned").len()
    }

    /// Return `true` if no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
