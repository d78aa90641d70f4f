//! Structural self-checks for topology containers.
//!
//! Checks run automatically in debug builds and, in release builds, only
//! with the `check-invariants` (or `strict-invariants`) feature.

use crate::mesh_error::MeshError;

/// Containers that can verify their own structural invariants.
pub trait DebugInvariants {
    /// Panic on a broken invariant when checking is compiled in; no-op otherwise.
    fn debug_assert_invariants(&self);
    /// Return the first broken invariant as an error.
    fn validate_invariants(&self) -> Result<(), MeshError>;
}

/// Evaluate a `Result`-returning check and panic with context on `Err`,
/// but only when invariant checking is compiled in.
#[macro_export]
macro_rules! debug_invariants {
    ($check:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $check {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
