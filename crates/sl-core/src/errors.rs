//! Error types for solus-rs.
//!
//! Every failure in the workspace is expressed through a single
//! `thiserror`-derived enum.  The `ensure!` and `fail!` convenience macros
//! cover the two common cases: precondition checks against the host object
//! model, and outright host-environment faults.

use thiserror::Error;

/// The top-level error type used throughout solus-rs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// An instance was requested after shutdown began.
    ///
    /// The infallible accessor surface handles this locally (it logs a
    /// warning and yields `None`); only the fallible `try_*` accessors
    /// hand it to the caller.
    #[error("instance '{type_name}' already destroyed")]
    PostShutdownAccess {
        /// Short name of the requested component type.
        type_name: &'static str,
    },

    /// The host environment could not carry out an operation, e.g. object
    /// creation was requested while the host is tearing down.
    #[error("host environment fault: {0}")]
    Host(String),

    /// A component found in the host did not have the expected concrete
    /// type.
    #[error("component does not have type '{type_name}'")]
    TypeMismatch {
        /// Short name of the expected component type.
        type_name: &'static str,
    },

    /// Precondition violated (maps to `ensure!`).
    #[error("precondition not satisfied: {0}")]
    Precondition(String),
}

/// Shorthand `Result` type used throughout solus-rs.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use sl_core::ensure;
/// fn positive(x: i64) -> sl_core::Result<i64> {
///     ensure!(x > 0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1).is_ok());
/// assert!(positive(-1).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Err(Error::Host(...))` immediately.
///
/// # Example
/// ```
/// use sl_core::fail;
/// fn always_err() -> sl_core::Result<()> {
///     fail!("object creation refused");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Host(format!($($msg)*)))
    };
}
