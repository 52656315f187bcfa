//! # sl-singleton
//!
//! The singleton lifecycle core of solus-rs: [`SingletonRegistry`], an
//! explicit process-wide context object that lazily creates (or adopts)
//! exactly one instance per tracked component type, and
//! [`SingletonAccessor`], the typed handle application code holds.
//!
//! Instances are created on first access, reused on every later access,
//! kept alive across scene transitions, and never recreated once shutdown
//! has been signaled by the host.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// The typed `SingletonAccessor<T>` handle.
pub mod accessor;

/// The `SingletonRegistry` context object.
pub mod registry;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use accessor::SingletonAccessor;
pub use registry::SingletonRegistry;
