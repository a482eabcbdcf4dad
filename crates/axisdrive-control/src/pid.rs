//! Velocity regulator with external anti-windup.
//!
//! The integral only accumulates while the downstream stages report an
//! unsaturated command. The saturation flag comes from the previous tick, so
//! the integrator lags saturation by exactly one tick.

use axisdrive_errors::{Result, ValidationError};
use serde::{Deserialize, Serialize};

/// PID gains of the velocity regulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PidGains {
    /// Proportional gain (A per deg/s)
    pub kp: f64,
    /// Integral gain (A per deg)
    pub ki: f64,
    /// Derivative gain (A per deg/s²)
    pub kd: f64,
}

impl PidGains {
    /// Create PID gains.
    pub const fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd }
    }

    /// Validate the gains. All must be finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        ValidationError::require_non_negative("pid.kp", self.kp)?;
        ValidationError::require_non_negative("pid.ki", self.ki)?;
        ValidationError::require_non_negative("pid.kd", self.kd)?;
        Ok(())
    }
}

impl Default for PidGains {
    fn default() -> Self {
        Self::new(0.05, 0.5, 0.0)
    }
}

/// Regulator memory.
///
/// # RT Safety
///
/// - `#[repr(C)]` for stable ABI
/// - No heap allocations
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PidState {
    /// Accumulated integral term (A)
    pub integral: f64,
    /// Velocity error of the previous tick (deg/s)
    pub last_error: f64,
}

impl PidState {
    /// Create a zeroed regulator state.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Compute the current command that drives `measured` towards `target`.
///
/// `saturated` is the previous tick's saturation verdict. While it is set the
/// integral is frozen; the derivative memory is always updated.
///
/// # RT Safety
///
/// - No heap allocations
/// - O(1) time complexity
#[inline]
pub fn velocity_regulator(
    target: f64,
    measured: f64,
    dt: f64,
    gains: &PidGains,
    saturated: bool,
    state: &mut PidState,
) -> f64 {
    let error = target - measured;

    let (integral, derivative) = if dt > 0.0 {
        (
            state.integral + gains.ki * error * dt,
            (error - state.last_error) / dt,
        )
    } else {
        (state.integral, 0.0)
    };

    let output = gains.kp * error + integral + gains.kd * derivative;

    if !saturated {
        state.integral = integral;
    }
    state.last_error = error;

    output
}
