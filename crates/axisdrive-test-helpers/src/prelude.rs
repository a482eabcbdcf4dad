//! Convenience re-exports.
//!
//! ```rust,ignore
//! use axisdrive_test_helpers::prelude::*;
//! ```

pub use crate::must::{must, must_err, must_some, must_with};

#[cfg(feature = "tracking")]
pub use crate::tracking::{AllocationGuard, TrackingAllocator, track};

/// Result type for tests that propagate errors with `?`.
pub type TestResult = Result<(), Box<dyn std::error::Error>>;
