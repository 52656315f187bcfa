//! The typed `SingletonAccessor<T>` handle.

use std::sync::Arc;

use sl_core::Result;

use crate::registry::SingletonRegistry;

/// A typed handle to the process-wide instance of component `T`.
///
/// The accessor carries the factory used to construct `T` on first access;
/// construction happens at most once per registry, however many accessors
/// for `T` exist.  Accessors are cheap to clone and share.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use sl_host::SceneHost;
/// use sl_singleton::{SingletonAccessor, SingletonRegistry};
///
/// #[derive(Default)]
/// struct AudioMixer;
///
/// let host = Arc::new(SceneHost::new());
/// let registry = SingletonRegistry::new(host);
/// let mixer = SingletonAccessor::<AudioMixer>::with_default(registry);
///
/// let a = mixer.instance().unwrap();
/// let b = mixer.instance().unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
pub struct SingletonAccessor<T> {
    registry: Arc<SingletonRegistry>,
    factory: Arc<dyn Fn() -> T + Send + Sync>,
}

impl<T> Clone for SingletonAccessor<T> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            factory: self.factory.clone(),
        }
    }
}

impl<T: Send + Sync + 'static> SingletonAccessor<T> {
    /// Create an accessor that constructs `T` with `factory` on first
    /// access.
    pub fn new(
        registry: Arc<SingletonRegistry>,
        factory: impl Fn() -> T + Send + Sync + 'static,
    ) -> Self {
        Self {
            registry,
            factory: Arc::new(factory),
        }
    }

    /// Create an accessor for a `Default`-constructible component.
    pub fn with_default(registry: Arc<SingletonRegistry>) -> Self
    where
        T: Default,
    {
        Self::new(registry, T::default)
    }

    /// Return the instance, creating or adopting it if necessary.
    ///
    /// Yields `None` after shutdown (with a logged warning) or on a host
    /// fault; callers must not assume presence.
    pub fn instance(&self) -> Option<Arc<T>> {
        self.registry.get_instance(|| (self.factory)())
    }

    /// Fallible twin of [`instance`][Self::instance]: returns the cause of
    /// an absent instance instead of logging it.
    pub fn try_instance(&self) -> Result<Arc<T>> {
        self.registry.try_get(|| (self.factory)())
    }

    /// The registry this accessor resolves against.
    pub fn registry(&self) -> &Arc<SingletonRegistry> {
        &self.registry
    }
}
