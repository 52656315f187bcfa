//! Write-once shutdown latch.
//!
//! A [`ShutdownLatch`] marks that teardown has begun and that no further
//! managed instances may be created.  It starts clear, moves to set at
//! most once per lifetime, and is never cleared again.  The set is a
//! `Release` store and reads are `Acquire` loads, so the latch is safe to
//! set from a host callback without holding any lock.

use std::sync::atomic::{AtomicBool, Ordering};

/// A boolean flag that can only move from clear to set.
///
/// # Example
/// ```
/// use sl_core::ShutdownLatch;
///
/// let latch = ShutdownLatch::new();
/// assert!(!latch.is_set());
/// latch.set();
/// latch.set(); // idempotent
/// assert!(latch.is_set());
/// ```
#[derive(Debug, Default)]
pub struct ShutdownLatch {
    flag: AtomicBool,
}

impl ShutdownLatch {
    /// Create a new latch in the clear state.
    pub fn new() -> Self {
        Self {
            flag: AtomicBool::new(false),
        }
    }

    /// Return `true` once the latch has been set.
    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Set the latch.
    ///
    /// Idempotent: calling this any number of times after the first has no
    /// further observable effect.
    pub fn set(&self) {
        self.flag.store(true, Ordering::Release);
    }
}
