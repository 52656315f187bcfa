//! # solus
//!
//! Lazily-initialized, shutdown-aware singleton lifecycle management for
//! component-based host runtimes.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `sl-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! solus = "0.1"
//! ```
//!
//! ```rust
//! use std::sync::Arc;
//! use solus::host::SceneHost;
//! use solus::singleton::{SingletonAccessor, SingletonRegistry};
//!
//! #[derive(Default)]
//! struct AudioMixer;
//!
//! let host = Arc::new(SceneHost::new());
//! let registry = SingletonRegistry::new(host.clone());
//! let mixer = SingletonAccessor::<AudioMixer>::with_default(registry);
//!
//! // Created once, reused on every later access.
//! let a = mixer.instance().unwrap();
//! let b = mixer.instance().unwrap();
//! assert!(Arc::ptr_eq(&a, &b));
//!
//! // Survives scene transitions.
//! host.load_scene("level-2");
//! assert!(mixer.instance().is_some());
//!
//! // Inert after shutdown.
//! host.quit();
//! assert!(mixer.instance().is_none());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core error types and lifecycle patterns.
pub use sl_core as core;

/// Host-environment interface and the in-memory reference host.
pub use sl_host as host;

/// The singleton registry and typed accessor.
pub use sl_singleton as singleton;
