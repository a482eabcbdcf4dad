//! Error types for AxisDrive
//!
//! The per-tick control path never fails: invalid runtime conditions degrade to
//! clamped outputs. Errors only exist at configuration time, when tuning
//! parameters are checked before a controller accepts them.
//!
//! - [`validation`]: field-level validation errors for configuration values
//! - [`common`]: severity classification shared by all error types
//!
//! # Example
//!
//! ```
//! use axisdrive_errors::prelude::*;
//!
//! fn check_gear_ratio(ratio: f64) -> Result<f64> {
//!     ValidationError::require_positive("motor.gear_ratio", ratio)
//! }
//!
//! assert!(check_gear_ratio(100.0).is_ok());
//! assert!(check_gear_ratio(0.0).is_err());
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod common;
pub mod prelude;
pub mod validation;

pub use common::ErrorSeverity;
pub use validation::ValidationError;

/// A specialized `Result` type for configuration validation.
pub type Result<T> = std::result::Result<T, ValidationError>;
