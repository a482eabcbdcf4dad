//! Axis state estimator.
//!
//! The joint reports a bounded angle. The estimator counts wraps across the
//! ±180° seam to produce a continuous multi-turn position, and differentiates
//! velocity into acceleration.

use crate::joint::JointReading;
use axisdrive_motor::{MotorOutput, axis_to_motor_rpm};
use serde::Serialize;

/// Observable state of one axis.
///
/// # RT Safety
///
/// - `#[repr(C)]` for stable ABI
/// - No heap allocations
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct AxisState {
    /// Continuous multi-turn position (deg)
    pub position: f64,
    /// Axis velocity (deg/s)
    pub velocity: f64,
    /// Axis acceleration (deg/s²)
    pub acceleration: f64,
    /// Torque applied to the joint on the last tick (N·m)
    pub output_torque: f64,
    /// Motor shaft speed (rpm)
    pub motor_velocity_rpm: f64,
    /// Motor shaft torque on the last tick (N·m)
    pub motor_torque: f64,
    /// Current drawn on the last tick (A)
    pub current_draw: f64,
}

/// Tracks revolutions of a bounded joint angle.
#[derive(Debug, Clone, Default)]
pub struct AxisEstimator {
    state: AxisState,
    last_raw_angle: Option<f64>,
    revolutions: i64,
}

impl AxisEstimator {
    /// Create an estimator with no samples.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether at least one reading has been observed.
    pub fn is_seeded(&self) -> bool {
        self.last_raw_angle.is_some()
    }

    /// Current estimate.
    pub fn state(&self) -> &AxisState {
        &self.state
    }

    /// Completed revolutions since the first reading.
    pub fn revolutions(&self) -> i64 {
        self.revolutions
    }

    /// Fold in a joint reading taken after the physics step.
    ///
    /// The first reading seeds the position and reports zero acceleration.
    ///
    /// # RT Safety
    ///
    /// - No heap allocations
    /// - O(1) time complexity
    pub fn update(&mut self, reading: JointReading, dt: f64, gear_ratio: f64) -> &AxisState {
        let raw = reading.angle_deg;

        match self.last_raw_angle {
            Some(previous) => {
                let delta = raw - previous;
                if delta > 180.0 {
                    self.revolutions -= 1;
                } else if delta < -180.0 {
                    self.revolutions += 1;
                }
                self.state.acceleration = if dt > 0.0 {
                    (reading.velocity_deg_s - self.state.velocity) / dt
                } else {
                    0.0
                };
            }
            None => self.state.acceleration = 0.0,
        }

        self.last_raw_angle = Some(raw);
        self.state.position = 360.0 * self.revolutions as f64 + raw;
        self.state.velocity = reading.velocity_deg_s;
        self.state.motor_velocity_rpm = axis_to_motor_rpm(reading.velocity_deg_s, gear_ratio);
        &self.state
    }

    /// Record what the motor model produced this tick.
    pub fn record_motor(&mut self, output: &MotorOutput) {
        self.state.output_torque = output.output_torque;
        self.state.motor_torque = output.motor_torque;
        self.state.current_draw = output.current_draw;
    }

    /// Forget all samples.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
