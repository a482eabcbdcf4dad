//! RT-Safe Control Stages for AxisDrive
//!
//! This crate provides the per-tick stages of a single-axis actuator controller.
//! Each stage is a plain function over an explicit state struct so it can be
//! exercised in isolation and composed by the engine once per simulation tick.
//!
//! # Overview
//!
//! - **Angle**: normalization into (−180°, 180°] and shortest-path unwrap
//! - **Signal**: open-loop test waveforms that replace the setpoint
//! - **Profile**: trapezoidal velocity/acceleration bounded setpoint smoothing
//! - **Gain**: error-dependent proportional gain from position to velocity
//! - **PID**: velocity regulator with external anti-windup
//! - **Soft limit**: one-directional current override outside position bounds
//!
//! # RT Safety Guarantees
//!
//! All stage functions are RT-safe:
//! - No heap allocations
//! - O(1) time complexity, no iteration
//! - No syscalls or I/O
//!
//! # Example
//!
//! ```
//! use axisdrive_control::prelude::*;
//!
//! let limits = ProfileLimits::new(360.0, 100.0, -180.0, 180.0);
//! let schedule = GainSchedule::new(1.0, 20.0, 5.0);
//! let gains = PidGains::new(0.05, 0.5, 0.0);
//! let mut profile = ProfileState::new();
//! let mut pid = PidState::new();
//!
//! // One 2 ms tick of the position loop
//! let dt = 0.002;
//! let target = profile_generator(90.0, dt, &limits, &mut profile);
//! let velocity = position_to_velocity(target - 0.0, &schedule, limits.limit_vel);
//! let current = velocity_regulator(velocity, 0.0, dt, &gains, false, &mut pid);
//! assert!(current > 0.0);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod angle;
pub mod gain;
pub mod pid;
pub mod prelude;
pub mod profile;
pub mod signal;
pub mod soft_limit;
pub mod state;

pub use angle::{normalize_deg, unwrap_circular};
pub use gain::{GainSchedule, position_to_velocity};
pub use pid::{PidGains, PidState, velocity_regulator};
pub use profile::{ProfileLimits, ProfileState, profile_generator};
pub use signal::{SignalConfig, SignalGenerator, Waveform};
pub use soft_limit::{SoftLimitConfig, SoftLimitState, soft_limit_override};
pub use state::ControlState;

/// Current command leaving a stage, with the stage's saturation verdict.
///
/// `saturated` feeds the regulator's anti-windup on the next tick. It is
/// threaded explicitly through the pipeline instead of living in shared state.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CurrentCommand {
    /// Current command (A).
    pub current: f64,
    /// Whether the stage clamped or overrode its input.
    pub saturated: bool,
}

impl CurrentCommand {
    /// Unsaturated command.
    pub const fn free(current: f64) -> Self {
        Self {
            current,
            saturated: false,
        }
    }

    /// Saturated command.
    pub const fn saturated(current: f64) -> Self {
        Self {
            current,
            saturated: true,
        }
    }
}
