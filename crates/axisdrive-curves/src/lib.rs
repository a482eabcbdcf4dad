//! Torque-Speed Envelopes for AxisDrive
//!
//! A DC motor cannot deliver its stall torque at every speed: back-EMF eats into
//! the available drive voltage as the rotor spins up, so the deliverable torque
//! rolls off towards zero at the no-load speed. This crate models that envelope
//! as a piecewise-linear curve mapping motor speed (rpm) to maximum torque (Nm).
//!
//! # RT Safety Guarantees
//!
//! ## RT-Safe: `TorqueSpeedCurve::max_torque()`
//! - No heap allocations
//! - O(log n) binary search over the breakpoints, n fixed at load time
//! - No syscalls or I/O
//!
//! ## NOT RT-Safe: `TorqueSpeedCurve::new()`, deserialization
//! Construction validates and stores the breakpoints on the heap. Build curves at
//! configuration time only.
//!
//! # Example
//!
//! ```
//! use axisdrive_curves::TorqueSpeedCurve;
//!
//! // 0.5 Nm stall torque, 3000 rpm no-load speed
//! let curve = TorqueSpeedCurve::linear(0.5, 3000.0)?;
//!
//! assert!((curve.max_torque(0.0) - 0.5).abs() < 1e-12);
//! assert!((curve.max_torque(1500.0) - 0.25).abs() < 1e-12);
//! assert!(curve.max_torque(4000.0).abs() < 1e-12);
//! # Ok::<(), axisdrive_curves::CurveError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod envelope;
pub mod error;

pub use envelope::{CurvePoint, TorqueSpeedCurve};
pub use error::CurveError;
