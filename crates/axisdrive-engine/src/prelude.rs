//! Prelude for convenient imports.

pub use crate::config::ControllerConfig;
pub use crate::context::SimulationContext;
pub use crate::controller::AxisController;
pub use crate::drive::JointDrive;
pub use crate::estimator::{AxisEstimator, AxisState};
pub use crate::joint::{JointId, JointReading, JointWorld};
pub use crate::mode::ControlMode;
pub use crate::report::TickReport;
pub use crate::scheduler::{ComponentId, TickComponent, TickScheduler};
pub use crate::virtual_world::{VirtualJoint, VirtualJointWorld};

pub use axisdrive_control::{
    GainSchedule, PidGains, ProfileLimits, SignalConfig, SoftLimitConfig, Waveform,
};
pub use axisdrive_motor::MotorParameters;
