//! Joint collaborator contract.
//!
//! The physics side exposes bounded joint angles and accepts additive torque.
//! Torque applied before a step influences that step's integration; readings
//! taken after a step reflect it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle of a joint in a [`JointWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JointId(pub u32);

impl fmt::Display for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "joint#{}", self.0)
    }
}

/// Raw joint readout.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JointReading {
    /// Bounded joint angle (deg), in (−180, 180]
    pub angle_deg: f64,
    /// Angular velocity (deg/s)
    pub velocity_deg_s: f64,
}

/// Physics engine holding the joints controllers drive.
pub trait JointWorld {
    /// Read a joint, or `None` if it does not exist.
    fn joint(&self, id: JointId) -> Option<JointReading>;

    /// Add torque (N·m) to a joint for the next step.
    ///
    /// Returns `false` if the joint does not exist.
    fn apply_torque(&mut self, id: JointId, torque_nm: f64) -> bool;

    /// Integrate all joints over `dt` seconds and clear applied torque.
    fn advance(&mut self, dt: f64);
}
