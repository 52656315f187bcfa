//! The process-wide singleton registry.
//!
//! [`SingletonRegistry`] owns every piece of shared state: one slot per
//! tracked component type (the instance handle and its guard) and the
//! registry-wide shutdown latch.  It is an explicit context object rather
//! than a static: embedders construct one against their
//! [`HostEnvironment`] and tests construct a fresh one per case.
//!
//! The check-then-create sequence is double-checked: a shared read is the
//! uncontended fast path, and the exclusive per-type guard is taken only
//! when that read finds no instance.  The guard stays held through host
//! lookup and creation, so concurrent first-time callers cannot create two
//! instances.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, Weak};

use log::warn;
use sl_core::{Error, Result, ShutdownLatch};
use sl_host::{
    short_type_name, type_key, ContainerId, HostEnvironment, LifecycleEvent, SharedComponent,
    TypeKey,
};

struct Resident {
    container: ContainerId,
    component: SharedComponent,
}

#[derive(Default)]
struct Slot {
    resident: RwLock<Option<Resident>>,
}

/// Explicit process-wide registry of lazily-created singleton instances.
///
/// The registry subscribes to its host's lifecycle events at construction.
/// Application quit, or destruction of any container backing a managed
/// instance, latches the registry shut: from then on every access yields
/// `None` and nothing is ever created again.
pub struct SingletonRegistry {
    host: Arc<dyn HostEnvironment>,
    shutdown: ShutdownLatch,
    slots: RwLock<HashMap<TypeKey, Arc<Slot>>>,
}

impl SingletonRegistry {
    /// Construct a registry bound to `host` and subscribe it to the host's
    /// lifecycle events.
    pub fn new(host: Arc<dyn HostEnvironment>) -> Arc<Self> {
        let registry = Arc::new(Self {
            host: host.clone(),
            shutdown: ShutdownLatch::new(),
            slots: RwLock::new(HashMap::new()),
        });
        // The host outlives its hooks; a weak reference keeps the registry
        // collectable once the embedder drops it.
        let weak: Weak<Self> = Arc::downgrade(&registry);
        host.register_shutdown_hook(Arc::new(move |event| {
            if let Some(registry) = weak.upgrade() {
                registry.observe(event);
            }
        }));
        registry
    }

    /// Return the instance of `T`, creating or adopting it if necessary.
    ///
    /// Every call within one epoch (construction of the registry until
    /// shutdown) returns a handle to the same instance.  After shutdown
    /// this yields `None` and logs a warning; host faults also yield
    /// `None`.  Use [`try_get`][Self::try_get] to observe the cause.
    pub fn get_instance<T, F>(&self, factory: F) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        match self.try_get(factory) {
            Ok(instance) => Some(instance),
            Err(Error::PostShutdownAccess { type_name }) => {
                warn!("[Singleton] instance '{type_name}' already destroyed; returning None");
                None
            }
            Err(err) => {
                warn!(
                    "[Singleton] could not provide instance '{}': {err}",
                    short_type_name::<T>()
                );
                None
            }
        }
    }

    /// Fallible twin of [`get_instance`][Self::get_instance]: returns the
    /// cause of an absent instance instead of logging it.
    pub fn try_get<T, F>(&self, factory: F) -> Result<Arc<T>>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        // Fast path for post-shutdown access, before any guard.
        if self.shutdown.is_set() {
            return Err(Error::PostShutdownAccess {
                type_name: short_type_name::<T>(),
            });
        }

        let slot = self.slot(type_key::<T>());

        // Uncontended check: shared read, no exclusive guard.
        if let Some(resident) = self.read_slot(&slot).as_ref() {
            return downcast::<T>(&resident.component);
        }

        // Exclusive guard, held through re-check, host lookup, and
        // creation.
        let mut resident = slot.resident.write().expect("slot lock poisoned");
        if let Some(resident) = resident.as_ref() {
            return downcast::<T>(&resident.component);
        }

        let (container, component) = match self.host.find_existing(type_key::<T>()) {
            Some(found) => found,
            None => self.create::<T, _>(factory)?,
        };
        let typed = downcast::<T>(&component)?;
        *resident = Some(Resident {
            container,
            component,
        });
        Ok(typed)
    }

    /// Latch the registry into its shut-down state.
    ///
    /// Idempotent; normally driven by the host's lifecycle events, but
    /// embedders may also call it directly.
    pub fn on_shutdown_signal(&self) {
        self.shutdown.set();
    }

    /// Return `true` once shutdown has been signaled.
    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.is_set()
    }

    /// The container backing the managed instance of `T`, if one exists.
    pub fn container_of<T: Send + Sync + 'static>(&self) -> Option<ContainerId> {
        let slot = {
            let slots = self.slots.read().expect("slot table lock poisoned");
            slots.get(&type_key::<T>()).cloned()
        }?;
        let resident = self.read_slot(&slot);
        resident.as_ref().map(|r| r.container)
    }

    fn observe(&self, event: &LifecycleEvent) {
        match event {
            LifecycleEvent::ApplicationQuit => self.on_shutdown_signal(),
            LifecycleEvent::ObjectDestroyed(id) if self.owns(*id) => self.on_shutdown_signal(),
            LifecycleEvent::ObjectDestroyed(_) => {}
        }
    }

    fn owns(&self, id: ContainerId) -> bool {
        let slots: Vec<Arc<Slot>> = {
            let table = self.slots.read().expect("slot table lock poisoned");
            table.values().cloned().collect()
        };
        slots.iter().any(|slot| {
            self.read_slot(slot)
                .as_ref()
                .is_some_and(|r| r.container == id)
        })
    }

    fn slot(&self, key: TypeKey) -> Arc<Slot> {
        if let Some(slot) = self.slots.read().expect("slot table lock poisoned").get(&key) {
            return slot.clone();
        }
        let mut slots = self.slots.write().expect("slot table lock poisoned");
        slots.entry(key).or_default().clone()
    }

    fn read_slot<'a>(&self, slot: &'a Slot) -> std::sync::RwLockReadGuard<'a, Option<Resident>> {
        slot.resident.read().expect("slot lock poisoned")
    }

    fn create<T, F>(&self, factory: F) -> Result<(ContainerId, SharedComponent)>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        let name = format!("{} (Singleton)", short_type_name::<T>());
        let container = self.host.create_container(&name)?;
        let component: SharedComponent = Arc::new(factory());
        self.host
            .attach_component(container, type_key::<T>(), component.clone())?;
        self.host.mark_persistent(container)?;
        Ok((container, component))
    }
}

fn downcast<T: Send + Sync + 'static>(component: &SharedComponent) -> Result<Arc<T>> {
    component.clone().downcast::<T>().map_err(|_| Error::TypeMismatch {
        type_name: short_type_name::<T>(),
    })
}
