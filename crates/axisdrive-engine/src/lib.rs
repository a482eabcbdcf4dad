//! Per-Axis Actuator Controller for AxisDrive
//!
//! Turns a current, velocity, position or circular-position setpoint into a
//! joint torque once per fixed simulation tick, respecting velocity and
//! acceleration limits, the motor's current and torque-speed ceilings, and
//! soft position bounds.
//!
//! # Architecture
//!
//! - [`AxisController`]: mode arbiter and the per-tick pipeline
//! - [`AxisEstimator`]: multi-turn position, velocity and acceleration from a
//!   bounded joint readout
//! - [`TickScheduler`]: runs [`TickComponent`]s around one physics step,
//!   applying torque before it and reading joints after it
//! - [`JointDrive`]: binds a controller to a joint of a [`JointWorld`]
//! - [`VirtualJointWorld`]: in-memory rotor physics for demos and tests
//!
//! # Example
//!
//! ```
//! use axisdrive_engine::prelude::*;
//!
//! let mut world = VirtualJointWorld::new();
//! let joint = world.add_joint(VirtualJoint::default());
//!
//! let config = ControllerConfig {
//!     mode: ControlMode::Position,
//!     setpoint: 30.0,
//!     ..ControllerConfig::default()
//! };
//! let mut scheduler = TickScheduler::new();
//! let drive = scheduler.register(JointDrive::new(joint, AxisController::new(config)?));
//!
//! let mut ctx = SimulationContext::new(0.002)?;
//! scheduler.run(&mut ctx, &mut world, 3_000);
//!
//! let position = scheduler.get(drive).map(|d| d.controller().state().position);
//! assert!(position.is_some_and(|p| (p - 30.0).abs() < 1.0));
//! # Ok::<(), axisdrive_errors::ValidationError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod context;
pub mod controller;
pub mod drive;
pub mod estimator;
pub mod joint;
pub mod mode;
pub mod prelude;
pub mod report;
pub mod scheduler;
pub mod virtual_world;

pub use config::ControllerConfig;
pub use context::SimulationContext;
pub use controller::AxisController;
pub use drive::JointDrive;
pub use estimator::{AxisEstimator, AxisState};
pub use joint::{JointId, JointReading, JointWorld};
pub use mode::ControlMode;
pub use report::TickReport;
pub use scheduler::{ComponentId, TickComponent, TickScheduler};
pub use virtual_world::{VirtualJoint, VirtualJointWorld};
