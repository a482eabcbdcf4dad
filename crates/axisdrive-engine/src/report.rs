//! Per-tick characterization output.

use crate::mode::ControlMode;
use serde::Serialize;

/// Every intermediate value of one controller tick.
///
/// Stages that did not run in the active mode report zero.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct TickReport {
    /// Mode the tick ran in
    pub mode: ControlMode,
    /// Setpoint after signal override and circular unwrap
    pub setpoint: f64,
    /// Profiled position target (deg)
    pub profile_target: f64,
    /// Velocity handed to the regulator (deg/s)
    pub target_velocity: f64,
    /// Current chosen by the mode (A)
    pub regulator_current: f64,
    /// Recovery current from the soft limit (A)
    pub limit_current: f64,
    /// Current handed to the motor after the soft limit (A)
    pub commanded_current: f64,
    /// Current the motor drew (A)
    pub current_draw: f64,
    /// Motor shaft torque (N·m)
    pub motor_torque: f64,
    /// Torque applied to the joint (N·m)
    pub output_torque: f64,
    /// Saturation verdict fed to the next tick's regulator
    pub saturated: bool,
}
