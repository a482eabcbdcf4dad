//! Error types for curve construction.

/// Error type for torque-speed curve construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CurveError {
    /// A curve needs at least one breakpoint.
    #[error("Torque-speed curve has no points")]
    Empty,

    /// A breakpoint coordinate is NaN or infinite.
    #[error("Point {index} has a non-finite {coordinate} value {value}")]
    NonFinite {
        /// Index of the offending point.
        index: usize,
        /// Which coordinate is invalid ("speed" or "torque").
        coordinate: &'static str,
        /// The invalid value.
        value: f64,
    },

    /// Speeds must be strictly increasing.
    #[error("Point {index} speed {speed} rpm does not increase over the previous point")]
    NotAscending {
        /// Index of the offending point.
        index: usize,
        /// The offending speed (rpm).
        speed: f64,
    },

    /// Speeds and torques describe magnitudes and cannot be negative.
    #[error("Point {index} has a negative {coordinate} value {value}")]
    Negative {
        /// Index of the offending point.
        index: usize,
        /// Which coordinate is invalid ("speed" or "torque").
        coordinate: &'static str,
        /// The invalid value.
        value: f64,
    },

    /// Invalid curve configuration, e.g. a non-positive no-load speed.
    #[error("Invalid curve configuration: {0}")]
    InvalidConfiguration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_ascending() {
        let err = CurveError::NotAscending {
            index: 2,
            speed: 100.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("Point 2"));
        assert!(msg.contains("100"));
    }

    #[test]
    fn test_error_display_invalid_config() {
        let err = CurveError::InvalidConfiguration("no-load speed must be positive".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Invalid curve configuration"));
        assert!(msg.contains("no-load speed must be positive"));
    }

    #[test]
    fn test_error_is_std_error() {
        let err = CurveError::Empty;
        let _: &dyn std::error::Error = &err;
    }
}
