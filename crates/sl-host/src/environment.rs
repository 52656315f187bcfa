//! The host-environment collaborator interface.
//!
//! [`HostEnvironment`] abstracts the runtime that owns and lifecycle-manages
//! the actual objects: searching the live object graph, creating container
//! objects, attaching components, exempting objects from scene teardown,
//! and delivering lifecycle notifications.  The singleton core talks only
//! to this trait.

use sl_core::Result;

use crate::object::{ContainerId, SharedComponent, TypeKey};

/// A lifecycle notification delivered to registered shutdown hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The whole application is quitting.
    ApplicationQuit,
    /// A single container object has been destroyed.
    ObjectDestroyed(ContainerId),
}

/// Callback signature for lifecycle subscriptions.
pub type LifecycleHook = sl_core::Hook<LifecycleEvent>;

/// The runtime environment that owns host-managed objects.
///
/// Implementations must be safe to call from multiple threads; hosts that
/// are inherently single-threaded should serialize internally.
pub trait HostEnvironment: Send + Sync {
    /// Search the running object graph for any live component with the
    /// given type key, returning it together with its backing container.
    ///
    /// If several candidate objects exist, the host returns the first one
    /// it finds; which candidate that is, is unspecified.
    fn find_existing(&self, key: TypeKey) -> Option<(ContainerId, SharedComponent)>;

    /// Create a new, empty container object named `name`.
    ///
    /// Fails if the host can no longer create objects, e.g. during
    /// teardown.
    fn create_container(&self, name: &str) -> Result<ContainerId>;

    /// Attach an already-constructed component to `container` under `key`.
    fn attach_component(
        &self,
        container: ContainerId,
        key: TypeKey,
        component: SharedComponent,
    ) -> Result<()>;

    /// Exempt `container` from the teardown that occurs on scene
    /// transitions.
    fn mark_persistent(&self, container: ContainerId) -> Result<()>;

    /// Subscribe to application-quit and per-object-destruction events.
    ///
    /// Hooks stay registered for the lifetime of the host and are invoked
    /// on whichever thread triggers the event.
    fn register_shutdown_hook(&self, hook: LifecycleHook);
}
