//! `SceneHost`, an in-memory reference host.
//!
//! `SceneHost` models exactly the part of a component runtime this library
//! needs: container objects with attached components, a per-container
//! persistent flag, scene loads that tear down every non-persistent
//! container, and lifecycle notification.  It is the host the test suites
//! run against, and a usable default for embedders without a runtime of
//! their own.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use log::{debug, trace};
use sl_core::{ensure, fail, Error, HookList, Result, ShutdownLatch};

use crate::environment::{HostEnvironment, LifecycleEvent, LifecycleHook};
use crate::object::{ContainerId, SharedComponent, TypeKey};

struct Container {
    name: String,
    persistent: bool,
    components: HashMap<TypeKey, SharedComponent>,
}

/// In-memory host environment with named scenes.
///
/// # Example
/// ```
/// use sl_host::SceneHost;
///
/// let host = SceneHost::new();
/// let id = host.spawn("Player").unwrap();
/// host.attach(id, 100u32).unwrap();
/// host.load_scene("level-2");
/// assert!(!host.contains(id)); // not persistent, torn down with the scene
/// ```
pub struct SceneHost {
    containers: RwLock<HashMap<ContainerId, Container>>,
    next_id: AtomicU64,
    active_scene: RwLock<String>,
    hooks: HookList<LifecycleEvent>,
    torn_down: ShutdownLatch,
}

impl Default for SceneHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneHost {
    /// Create an empty host in its boot scene.
    pub fn new() -> Self {
        Self {
            containers: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            active_scene: RwLock::new(String::from("boot")),
            hooks: HookList::new(),
            torn_down: ShutdownLatch::new(),
        }
    }

    /// Place a new, empty container in the active scene.
    ///
    /// Fails once the host has begun tearing down.
    pub fn spawn(&self, name: &str) -> Result<ContainerId> {
        if self.torn_down.is_set() {
            fail!("host is tearing down, cannot create '{name}'");
        }
        let id = ContainerId::from_raw(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.write().insert(
            id,
            Container {
                name: name.to_owned(),
                persistent: false,
                components: HashMap::new(),
            },
        );
        trace!("spawned container {id} '{name}'");
        Ok(id)
    }

    /// Attach a component to `container`, returning the shared handle.
    ///
    /// Convenience over [`HostEnvironment::attach_component`] for
    /// statically-typed callers.
    pub fn attach<T: Send + Sync + 'static>(
        &self,
        container: ContainerId,
        component: T,
    ) -> Result<Arc<T>> {
        let typed = Arc::new(component);
        self.attach_component(container, TypeKey::of::<T>(), typed.clone())?;
        Ok(typed)
    }

    /// Destroy a single container, notifying lifecycle hooks.
    pub fn destroy(&self, id: ContainerId) -> Result<()> {
        let removed = self.write().remove(&id);
        ensure!(removed.is_some(), "no such container {id}");
        trace!("destroyed container {id}");
        self.hooks.notify(&LifecycleEvent::ObjectDestroyed(id));
        Ok(())
    }

    /// Switch to another scene, destroying every non-persistent container.
    ///
    /// Persistent containers carry over unchanged.
    pub fn load_scene(&self, name: &str) {
        let dropped: Vec<ContainerId> = {
            let mut containers = self.write();
            let ids: Vec<ContainerId> = containers
                .iter()
                .filter(|(_, c)| !c.persistent)
                .map(|(id, _)| *id)
                .collect();
            for id in &ids {
                containers.remove(id);
            }
            ids
        };
        *self.active_scene.write().expect("scene name lock poisoned") = name.to_owned();
        debug!("loaded scene '{name}', destroyed {} containers", dropped.len());
        for id in dropped {
            self.hooks.notify(&LifecycleEvent::ObjectDestroyed(id));
        }
    }

    /// Quit the application: notify hooks, then destroy every container.
    ///
    /// The quit notification goes out before any per-object destruction
    /// notification.  After this the host refuses to create objects.
    pub fn quit(&self) {
        self.torn_down.set();
        debug!("application quit");
        self.hooks.notify(&LifecycleEvent::ApplicationQuit);
        let dropped: Vec<ContainerId> = {
            let mut containers = self.write();
            let ids: Vec<ContainerId> = containers.keys().copied().collect();
            containers.clear();
            ids
        };
        for id in dropped {
            self.hooks.notify(&LifecycleEvent::ObjectDestroyed(id));
        }
    }

    // ── Introspection ─────────────────────────────────────────────────────────

    /// Number of live containers.
    pub fn container_count(&self) -> usize {
        self.read().len()
    }

    /// Return `true` if `id` refers to a live container.
    pub fn contains(&self, id: ContainerId) -> bool {
        self.read().contains_key(&id)
    }

    /// The name a container was created with, if it is alive.
    pub fn container_name(&self, id: ContainerId) -> Option<String> {
        self.read().get(&id).map(|c| c.name.clone())
    }

    /// Whether a live container is exempt from scene teardown.
    pub fn is_persistent(&self, id: ContainerId) -> Option<bool> {
        self.read().get(&id).map(|c| c.persistent)
    }

    /// Name of the currently active scene.
    pub fn active_scene(&self) -> String {
        self.active_scene
            .read()
            .expect("scene name lock poisoned")
            .clone()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<ContainerId, Container>> {
        self.containers.read().expect("container table lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<ContainerId, Container>> {
        self.containers.write().expect("container table lock poisoned")
    }
}

impl HostEnvironment for SceneHost {
    fn find_existing(&self, key: TypeKey) -> Option<(ContainerId, SharedComponent)> {
        // Map order is arbitrary: with several candidates, which one wins
        // is unspecified.
        let containers = self.read();
        containers.iter().find_map(|(id, container)| {
            container
                .components
                .get(&key)
                .map(|component| (*id, component.clone()))
        })
    }

    fn create_container(&self, name: &str) -> Result<ContainerId> {
        self.spawn(name)
    }

    fn attach_component(
        &self,
        container: ContainerId,
        key: TypeKey,
        component: SharedComponent,
    ) -> Result<()> {
        let mut containers = self.write();
        let record = containers
            .get_mut(&container)
            .ok_or_else(|| Error::Precondition(format!("no such container {container}")))?;
        // Replaces any component previously attached under the same key.
        record.components.insert(key, component);
        Ok(())
    }

    fn mark_persistent(&self, container: ContainerId) -> Result<()> {
        let mut containers = self.write();
        let record = containers
            .get_mut(&container)
            .ok_or_else(|| Error::Precondition(format!("no such container {container}")))?;
        record.persistent = true;
        trace!("container {container} marked persistent");
        Ok(())
    }

    fn register_shutdown_hook(&self, hook: LifecycleHook) {
        self.hooks.register(hook);
    }
}
