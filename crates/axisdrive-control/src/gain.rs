//! Position-to-velocity gain scheduling.
//!
//! Large errors get a small proportional gain so the velocity command stays
//! bounded; small errors get the full gain for stiff holding.

use axisdrive_errors::{Result, ValidationError};
use serde::{Deserialize, Serialize};

/// Errors below this magnitude (deg) use `max` directly.
pub const SMALL_ERROR_DEG: f64 = 0.01;

/// Error-dependent proportional gain from position error to velocity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GainSchedule {
    /// Lowest gain (1/s)
    pub min: f64,
    /// Highest gain (1/s)
    pub max: f64,
    /// Error (deg) at which the gain equals `max`
    pub error_reference: f64,
}

impl GainSchedule {
    /// Create a gain schedule.
    pub const fn new(min: f64, max: f64, error_reference: f64) -> Self {
        Self {
            min,
            max,
            error_reference,
        }
    }

    /// Gain for a position error: `max * error_reference / |error|`,
    /// clamped into `[min, max]`.
    #[inline]
    pub fn gain(&self, error: f64) -> f64 {
        let magnitude = error.abs();
        let raw = if magnitude < SMALL_ERROR_DEG {
            self.max
        } else {
            self.max * self.error_reference / magnitude
        };
        raw.max(self.min).min(self.max)
    }

    /// Validate the schedule.
    pub fn validate(&self) -> Result<()> {
        ValidationError::require_non_negative("gain_schedule.min", self.min)?;
        ValidationError::require_positive("gain_schedule.max", self.max)?;
        ValidationError::require_ordered("gain_schedule", self.min, self.max)?;
        ValidationError::require_positive("gain_schedule.error_reference", self.error_reference)?;
        Ok(())
    }
}

impl Default for GainSchedule {
    fn default() -> Self {
        Self::new(1.0, 20.0, 5.0)
    }
}

/// Map a position error (deg) to a velocity setpoint (deg/s).
///
/// # RT Safety
///
/// - No heap allocations
/// - O(1) time complexity
#[inline]
pub fn position_to_velocity(error: f64, schedule: &GainSchedule, limit_vel: f64) -> f64 {
    let velocity = schedule.gain(error) * error;
    velocity.max(-limit_vel).min(limit_vel)
}
