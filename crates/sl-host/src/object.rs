//! Identifiers and type-erased component handles for host-managed objects.
//!
//! Hosts store components type-erased; the typed accessor downcasts on the
//! way out.  Reference equality of two [`SharedComponent`] handles
//! (`Arc::ptr_eq`) means they refer to the same live component.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Identity of a component type as tracked by hosts and registries.
pub type TypeKey = TypeId;

/// A shared, type-erased reference to a live component.
pub type SharedComponent = Arc<dyn Any + Send + Sync>;

/// Return the [`TypeKey`] for a component type.
pub fn type_key<T: Any>() -> TypeKey {
    TypeId::of::<T>()
}

/// The last path segment of a type's name, used for diagnostics and for
/// deterministic container naming.
///
/// Generic arguments are dropped: `short_type_name::<Wrapper<Inner>>()`
/// yields `"Wrapper"`.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = match full.find('<') {
        Some(lt) => &full[..lt],
        None => full,
    };
    base.rsplit("::").next().unwrap_or(base)
}

/// Opaque identifier of a host-managed container object.
///
/// Hosts hand these out; callers treat them as opaque tokens and never
/// fabricate them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(u64);

impl ContainerId {
    /// Build an id from its raw value.  Intended for host implementations.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw value backing this id.
    pub const fn into_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
