//! # sl-host
//!
//! The host-environment surface of solus-rs: identifiers for host-managed
//! container objects, the [`HostEnvironment`] trait the singleton core is
//! written against, lifecycle events, and [`SceneHost`], an in-memory
//! reference host with scene-transition semantics.
//!
//! The singleton core has no compile-time dependency on any concrete
//! runtime; embedders implement [`HostEnvironment`] over their own object
//! model, or use [`SceneHost`] directly (it is also what the test suites
//! run against).

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// The `HostEnvironment` trait and lifecycle events.
pub mod environment;

/// Container identifiers and type-erased component handles.
pub mod object;

/// `SceneHost`, the in-memory reference host.
pub mod scene;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use environment::{HostEnvironment, LifecycleEvent, LifecycleHook};
pub use object::{short_type_name, type_key, ContainerId, SharedComponent, TypeKey};
pub use scene::SceneHost;
