//! Configuration validation error types.
//!
//! Every tuning parameter a controller accepts passes through one of the
//! `require_*` checks below before it reaches the per-tick path.

use core::fmt;

use crate::common::ErrorSeverity;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Value out of range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Field name
        field: String,
        /// The invalid value
        value: String,
        /// Minimum allowed value
        min: String,
        /// Maximum allowed value
        max: String,
    },

    /// Value is NaN or infinite
    #[error("{field} must be finite, got {value}")]
    NonFinite {
        /// Field name
        field: String,
        /// The invalid value
        value: f64,
    },

    /// Value must be strictly positive
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive {
        /// Field name
        field: String,
        /// The invalid value
        value: f64,
    },

    /// Value must be zero or positive
    #[error("{field} must not be negative, got {value}")]
    Negative {
        /// Field name
        field: String,
        /// The invalid value
        value: f64,
    },

    /// Lower bound is above upper bound
    #[error("{field} range is inverted: min {min} > max {max}")]
    InvertedRange {
        /// Field name
        field: String,
        /// Configured lower bound
        min: f64,
        /// Configured upper bound
        max: f64,
    },

    /// Torque-speed envelope rejected
    #[error("Invalid torque-speed curve for '{field}': {reason}")]
    InvalidCurve {
        /// Field name
        field: String,
        /// Reason the curve was rejected
        reason: String,
    },

    /// Constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Custom validation error
    #[error("Validation error: {0}")]
    Custom(String),
}

impl ValidationError {
    /// Get the error severity.
    ///
    /// Non-finite values are critical: they would poison every integrator
    /// downstream of the field.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ValidationError::NonFinite { .. } => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    /// Name of the offending field, when the error is tied to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::OutOfRange { field, .. }
            | ValidationError::NonFinite { field, .. }
            | ValidationError::NotPositive { field, .. }
            | ValidationError::Negative { field, .. }
            | ValidationError::InvertedRange { field, .. }
            | ValidationError::InvalidCurve { field, .. } => Some(field),
            ValidationError::ConstraintViolation(_) | ValidationError::Custom(_) => None,
        }
    }

    /// Create an out of range error for a numeric value.
    pub fn out_of_range<T: fmt::Debug>(field: impl Into<String>, value: T, min: T, max: T) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            value: format!("{:?}", value),
            min: format!("{:?}", min),
            max: format!("{:?}", max),
        }
    }

    /// Create a non-finite value error.
    pub fn non_finite(field: impl Into<String>, value: f64) -> Self {
        ValidationError::NonFinite {
            field: field.into(),
            value,
        }
    }

    /// Create an inverted range error.
    pub fn inverted_range(field: impl Into<String>, min: f64, max: f64) -> Self {
        ValidationError::InvertedRange {
            field: field.into(),
            min,
            max,
        }
    }

    /// Create an invalid curve error.
    pub fn invalid_curve(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidCurve {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a constraint violation error.
    pub fn constraint(msg: impl Into<String>) -> Self {
        ValidationError::ConstraintViolation(msg.into())
    }

    /// Create a custom validation error.
    pub fn custom(msg: impl Into<String>) -> Self {
        ValidationError::Custom(msg.into())
    }

    /// Accept `value` if it is finite.
    pub fn require_finite(field: &str, value: f64) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::non_finite(field, value))
        }
    }

    /// Accept `value` if it is finite and strictly positive.
    pub fn require_positive(field: &str, value: f64) -> Result<f64, Self> {
        let value = Self::require_finite(field, value)?;
        if value > 0.0 {
            Ok(value)
        } else {
            Err(ValidationError::NotPositive {
                field: field.to_string(),
                value,
            })
        }
    }

    /// Accept `value` if it is finite and not negative.
    pub fn require_non_negative(field: &str, value: f64) -> Result<f64, Self> {
        let value = Self::require_finite(field, value)?;
        if value >= 0.0 {
            Ok(value)
        } else {
            Err(ValidationError::Negative {
                field: field.to_string(),
                value,
            })
        }
    }

    /// Accept `value` if it lies within `[min, max]`.
    pub fn require_in_range(field: &str, value: f64, min: f64, max: f64) -> Result<f64, Self> {
        let value = Self::require_finite(field, value)?;
        if (min..=max).contains(&value) {
            Ok(value)
        } else {
            Err(Self::out_of_range(field, value, min, max))
        }
    }

    /// Accept a `[min, max]` pair if both ends are finite and `min <= max`.
    pub fn require_ordered(field: &str, min: f64, max: f64) -> Result<(), Self> {
        Self::require_finite(field, min)?;
        Self::require_finite(field, max)?;
        if min <= max {
            Ok(())
        } else {
            Err(Self::inverted_range(field, min, max))
        }
    }
}
