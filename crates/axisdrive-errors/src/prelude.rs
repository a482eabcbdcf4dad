//! Prelude module for convenient error handling imports.
//!
//! ```
//! use axisdrive_errors::prelude::*;
//!
//! fn load_limit(value: f64) -> Result<f64> {
//!     ValidationError::require_finite("profile.limit_vel", value)
//! }
//!
//! assert!(load_limit(f64::NAN).is_err());
//! ```

pub use crate::{Result, common::ErrorSeverity, validation::ValidationError};
