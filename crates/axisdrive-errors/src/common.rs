//! Severity classification shared by AxisDrive error types.

use core::fmt;

/// Error severity levels, ordered from least to most severe.
///
/// # Examples
///
/// ```
/// use axisdrive_errors::ErrorSeverity;
///
/// assert!(ErrorSeverity::Critical > ErrorSeverity::Warning);
/// assert_eq!(ErrorSeverity::Error.to_string(), "ERROR");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Informational, no action required
    Info = 0,
    /// Warning, the value was accepted but may behave unexpectedly
    Warning = 1,
    /// Error, the configuration was rejected
    Error = 2,
    /// Critical, the controller must not be driven with this configuration
    Critical = 3,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
