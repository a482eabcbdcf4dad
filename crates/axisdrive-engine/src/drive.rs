//! Binding of a controller to a joint.

use crate::context::SimulationContext;
use crate::controller::AxisController;
use crate::joint::{JointId, JointWorld};
use crate::scheduler::TickComponent;
use tracing::warn;

/// Tick component that drives one joint with one [`AxisController`].
///
/// A missing joint is logged once and leaves the controller idle until the
/// joint reappears.
#[derive(Debug, Clone)]
pub struct JointDrive {
    joint: JointId,
    controller: AxisController,
    missing_logged: bool,
}

impl JointDrive {
    /// Bind `controller` to `joint`.
    pub fn new(joint: JointId, controller: AxisController) -> Self {
        Self {
            joint,
            controller,
            missing_logged: false,
        }
    }

    /// Joint this drive acts on.
    pub fn joint(&self) -> JointId {
        self.joint
    }

    /// The bound controller.
    pub fn controller(&self) -> &AxisController {
        &self.controller
    }

    /// The bound controller, mutably (setpoint and mode changes).
    pub fn controller_mut(&mut self) -> &mut AxisController {
        &mut self.controller
    }

    /// Unbind, returning the controller.
    pub fn into_controller(self) -> AxisController {
        self.controller
    }

    fn report_missing(&mut self) {
        if !self.missing_logged {
            warn!(joint = %self.joint, "joint not found, axis idle");
            self.missing_logged = true;
        }
    }
}

impl<W: JointWorld + ?Sized> TickComponent<W> for JointDrive {
    fn before_tick(&mut self, ctx: &SimulationContext, world: &mut W) {
        let dt = ctx.step_time();

        if !self.controller.is_seeded() {
            match world.joint(self.joint) {
                Some(reading) => {
                    self.controller.observe(reading, dt);
                }
                None => {
                    self.report_missing();
                    return;
                }
            }
        }

        let report = self.controller.compute(dt);
        if world.apply_torque(self.joint, report.output_torque) {
            self.missing_logged = false;
        } else {
            self.report_missing();
        }
    }

    fn after_tick(&mut self, ctx: &SimulationContext, world: &W) {
        match world.joint(self.joint) {
            Some(reading) => {
                self.controller.observe(reading, ctx.step_time());
            }
            None => self.report_missing(),
        }
    }
}
