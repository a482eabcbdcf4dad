//! In-memory joint world.
//!
//! Each joint is a rigid rotor with inertia, viscous damping and an optional
//! constant load torque, integrated with semi-implicit Euler. Angles are
//! reported bounded to (−180°, 180°] like a physics engine's revolute joint.

use crate::joint::{JointId, JointReading, JointWorld};
use axisdrive_control::normalize_deg;
use serde::{Deserialize, Serialize};

/// Mechanical parameters and state of a simulated joint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VirtualJoint {
    /// Rotational inertia seen at the axis (kg·m²)
    pub inertia: f64,
    /// Viscous damping (N·m·s/rad)
    pub damping: f64,
    /// Constant external torque (N·m)
    pub load_torque: f64,
    /// Unbounded angle (deg)
    pub angle_deg: f64,
    /// Angular velocity (deg/s)
    pub velocity_deg_s: f64,
    #[serde(skip)]
    pending_torque: f64,
}

impl VirtualJoint {
    /// Joint at rest at `angle_deg`.
    pub fn new(inertia: f64, damping: f64, angle_deg: f64) -> Self {
        Self {
            inertia,
            damping,
            load_torque: 0.0,
            angle_deg,
            velocity_deg_s: 0.0,
            pending_torque: 0.0,
        }
    }

    /// Add a constant external torque.
    pub fn with_load(mut self, load_torque: f64) -> Self {
        self.load_torque = load_torque;
        self
    }

    /// Bounded readout.
    pub fn reading(&self) -> JointReading {
        JointReading {
            angle_deg: normalize_deg(self.angle_deg),
            velocity_deg_s: self.velocity_deg_s,
        }
    }

    fn integrate(&mut self, dt: f64) {
        let torque = self.pending_torque + self.load_torque;
        self.pending_torque = 0.0;
        if !(self.inertia > 0.0 && dt > 0.0) {
            return;
        }

        let omega = self.velocity_deg_s.to_radians();
        let alpha = (torque - self.damping * omega) / self.inertia;
        let omega = omega + alpha * dt;
        self.velocity_deg_s = omega.to_degrees();
        self.angle_deg += self.velocity_deg_s * dt;
    }
}

impl Default for VirtualJoint {
    /// Light arm on the default servo's output.
    fn default() -> Self {
        Self::new(0.05, 0.5, 0.0)
    }
}

/// A set of [`VirtualJoint`]s addressed by [`JointId`].
#[derive(Debug, Clone, Default)]
pub struct VirtualJointWorld {
    joints: Vec<VirtualJoint>,
}

impl VirtualJointWorld {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a joint.
    pub fn add_joint(&mut self, joint: VirtualJoint) -> JointId {
        let id = JointId(u32::try_from(self.joints.len()).unwrap_or(u32::MAX));
        self.joints.push(joint);
        id
    }

    /// Inspect a joint, including its unbounded angle.
    pub fn get(&self, id: JointId) -> Option<&VirtualJoint> {
        self.joints.get(id.0 as usize)
    }

    /// Mutate a joint.
    pub fn get_mut(&mut self, id: JointId) -> Option<&mut VirtualJoint> {
        self.joints.get_mut(id.0 as usize)
    }
}

impl JointWorld for VirtualJointWorld {
    fn joint(&self, id: JointId) -> Option<JointReading> {
        self.get(id).map(VirtualJoint::reading)
    }

    fn apply_torque(&mut self, id: JointId, torque_nm: f64) -> bool {
        match self.get_mut(id) {
            Some(joint) => {
                joint.pending_torque += torque_nm;
                true
            }
            None => false,
        }
    }

    fn advance(&mut self, dt: f64) {
        for joint in &mut self.joints {
            joint.integrate(dt);
        }
    }
}
