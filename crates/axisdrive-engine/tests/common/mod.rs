//! Config fixtures and closed-loop helpers shared by the integration tests.

#![allow(dead_code)]

use axisdrive_engine::prelude::*;
use axisdrive_test_helpers::must;

pub const DT: f64 = 0.002;

/// Stock servo in `mode` with `setpoint`.
pub fn servo_config(mode: ControlMode, setpoint: f64) -> ControllerConfig {
    ControllerConfig {
        mode,
        setpoint,
        ..ControllerConfig::default()
    }
}

/// Profile limits of the 0 to 90 degree step characterization.
pub fn step_limits() -> ProfileLimits {
    ProfileLimits::new(360.0, 100.0, -180.0, 180.0)
}

/// Soft bounds at ±90 degrees with unit recovery gains.
pub fn unit_soft_limits() -> SoftLimitConfig {
    SoftLimitConfig::new(-90.0, 90.0, 1.0, 1.0)
}

/// Pure proportional regulator.
pub fn proportional(kp: f64) -> PidGains {
    PidGains::new(kp, 0.0, 0.0)
}

pub fn controller(config: ControllerConfig) -> AxisController {
    must(AxisController::new(config))
}

/// Static reading at `angle_deg`.
pub fn at_rest(angle_deg: f64) -> JointReading {
    JointReading {
        angle_deg,
        velocity_deg_s: 0.0,
    }
}

/// World with one default joint starting at `angle_deg`.
pub fn world_at(angle_deg: f64) -> (VirtualJointWorld, JointId) {
    let mut world = VirtualJointWorld::new();
    let joint = world.add_joint(VirtualJoint::new(0.05, 0.5, angle_deg));
    (world, joint)
}

/// Closed loop of one controller on a virtual joint.
#[derive(Debug)]
pub struct Rig {
    pub world: VirtualJointWorld,
    pub scheduler: TickScheduler<JointDrive>,
    pub ctx: SimulationContext,
    pub drive: ComponentId,
}

impl Rig {
    pub fn new(config: ControllerConfig, start_angle_deg: f64) -> Self {
        let (world, joint) = world_at(start_angle_deg);
        let mut scheduler = TickScheduler::new();
        let drive = scheduler.register(JointDrive::new(joint, controller(config)));
        Self {
            world,
            scheduler,
            ctx: must(SimulationContext::new(DT)),
            drive,
        }
    }

    pub fn step(&mut self) -> bool {
        self.scheduler.step(&mut self.ctx, &mut self.world)
    }

    pub fn run(&mut self, ticks: u64) -> u64 {
        self.scheduler.run(&mut self.ctx, &mut self.world, ticks)
    }

    pub fn controller(&self) -> &AxisController {
        match self.scheduler.get(self.drive) {
            Some(drive) => drive.controller(),
            None => panic!("drive {} not registered", self.drive),
        }
    }

    pub fn controller_mut(&mut self) -> &mut AxisController {
        let id = self.drive;
        match self.scheduler.get_mut(id) {
            Some(drive) => drive.controller_mut(),
            None => panic!("drive {id} not registered"),
        }
    }
}
