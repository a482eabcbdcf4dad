//! Shared test utilities for AxisDrive.
//!
//! # Modules
//!
//! - [`mod@must`] - Unwrap helpers that report the caller's location
//! - [`assertions`] - Float and range assertions for control-loop tests
//! - [`tracking`] - Allocation tracking for the per-tick path
//! - [`prelude`] - Convenience re-exports
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! axisdrive-test-helpers = { path = "crates/axisdrive-test-helpers" }
//! ```
//!
//! ```rust,ignore
//! use axisdrive_test_helpers::prelude::*;
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::unwrap_used, clippy::panic)]

pub mod assertions;
pub mod must;
pub mod prelude;

#[cfg(feature = "tracking")]
pub mod tracking;

#[cfg(all(test, feature = "tracking"))]
#[global_allocator]
static GLOBAL_TEST: tracking::TrackingAllocator = tracking::TrackingAllocator;

pub use must::*;

#[cfg(feature = "tracking")]
pub use tracking::track;
