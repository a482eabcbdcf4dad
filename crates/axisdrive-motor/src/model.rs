//! Per-tick motor model.

use crate::params::MotorParameters;

/// Result of one motor model step.
///
/// # RT Safety
///
/// - `#[repr(C)]` for stable ABI
/// - No heap allocations
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MotorOutput {
    /// Shaft torque after the envelope (N·m)
    pub motor_torque: f64,
    /// Current the supply delivered (A)
    pub current_draw: f64,
    /// Torque at the axis after the gearbox (N·m)
    pub output_torque: f64,
    /// Whether the command was clamped by the current or torque ceiling
    pub saturated: bool,
}

/// Convert a current command into shaft and axis torque.
///
/// `previous_velocity_rpm` is the shaft speed measured on the previous tick.
/// The envelope caps torque only while driving; when the command opposes the
/// shaft motion (braking or regeneration) no speed-dependent ceiling applies.
/// At standstill the stall torque applies.
///
/// A misconfigured motor (see [`MotorParameters::is_operational`]) yields a
/// zero output.
///
/// # RT Safety
///
/// - No heap allocations
/// - O(log n) envelope lookup over the curve breakpoints
///
/// # Example
///
/// ```
/// use axisdrive_motor::prelude::*;
///
/// let params = MotorParameters::default();
/// let out = motor_model(15.0, 0.0, &params);
///
/// assert!(out.saturated);
/// assert!((out.current_draw - 10.0).abs() < 1e-9);
/// ```
#[inline]
pub fn motor_model(command: f64, previous_velocity_rpm: f64, params: &MotorParameters) -> MotorOutput {
    if !params.is_operational() {
        return MotorOutput::default();
    }

    let mut saturated = false;

    let nominal = params.nominal_current.abs();
    let current = if command > nominal {
        saturated = true;
        nominal
    } else if command < -nominal {
        saturated = true;
        -nominal
    } else {
        command
    };

    let torque_per_amp = params.kt * params.ke;
    let mut motor_torque = current * torque_per_amp;

    let regenerating = current * previous_velocity_rpm < 0.0;
    if !regenerating {
        let ceiling = params.kv.max_torque(previous_velocity_rpm.abs());
        if motor_torque.abs() > ceiling {
            motor_torque = ceiling.copysign(motor_torque);
            saturated = true;
        }
    }

    let current_draw = if torque_per_amp > 0.0 {
        motor_torque / torque_per_amp
    } else {
        0.0
    };

    MotorOutput {
        motor_torque,
        current_draw,
        output_torque: motor_torque * params.gear_ratio * params.kr,
        saturated,
    }
}
