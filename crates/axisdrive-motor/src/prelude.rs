//! Prelude for convenient imports.

pub use crate::model::{MotorOutput, motor_model};
pub use crate::params::{MotorParameters, axis_to_motor_rpm};
pub use axisdrive_curves::{CurvePoint, TorqueSpeedCurve};
