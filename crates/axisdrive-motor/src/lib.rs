//! Geared DC Motor Model for AxisDrive
//!
//! Converts a current command into joint torque once per tick:
//!
//! 1. Clamp the command to the nominal current
//! 2. Convert to motor torque through the torque constant and motor efficiency
//! 3. Cap the torque by the speed-dependent envelope while driving
//! 4. Back-compute the current the supply actually delivered
//! 5. Scale through the gearbox ratio and efficiency
//!
//! Any clamping is reported through [`MotorOutput::saturated`] so the velocity
//! regulator can stop integrating on the next tick.

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod model;
pub mod params;
pub mod prelude;

pub use model::{MotorOutput, motor_model};
pub use params::{MotorParameters, axis_to_motor_rpm};
