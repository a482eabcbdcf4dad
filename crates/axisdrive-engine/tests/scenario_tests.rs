//! Characterization scenarios of the full pipeline.

mod common;

use axisdrive_engine::prelude::*;
use axisdrive_test_helpers::{assert_approx_eq, assert_in_range, must_some};
use common::*;

#[test]
fn step_to_90_degrees_arrives_exactly_with_trapezoidal_profile() {
    let config = ControllerConfig {
        profile: step_limits(),
        ..servo_config(ControlMode::Position, 90.0)
    };
    let mut rig = Rig::new(config, 0.0);
    let limits = step_limits();

    let mut ticks = 0;
    let mut peak_velocity: f64 = 0.0;
    let mut previous_velocity = 0.0;
    while !rig.controller().profile().is_converged() && ticks < 2_000 {
        rig.step();
        ticks += 1;

        let profile = *rig.controller().profile();
        assert!(profile.velocity.abs() <= limits.limit_vel);
        if !profile.converged {
            let dv = (profile.velocity - previous_velocity).abs();
            assert!(dv <= limits.limit_acc * DT * (1.0 + 1e-9), "tick {ticks}: dv = {dv}");
        }
        peak_velocity = peak_velocity.max(profile.velocity.abs());
        previous_velocity = profile.velocity;
    }

    let profile = *rig.controller().profile();
    assert!(profile.converged, "not converged after {ticks} ticks");
    assert_approx_eq!(profile.position, 90.0, 0.0);
    assert_approx_eq!(profile.velocity, 0.0, 0.0);

    // Triangular move: v_peak = sqrt(a * d) ≈ 94.9 deg/s, about 1.9 s
    assert_in_range!(peak_velocity, 90.0..=95.0);
    assert_in_range!(ticks, 900..=1_000);

    rig.run(1_000);
    assert_approx_eq!(rig.controller().state().position, 90.0, 0.05);
    assert!(rig.controller().profile().is_converged());
}

#[test]
fn circular_setpoint_crosses_the_seam_instead_of_winding_back() {
    let config = servo_config(ControlMode::PositionCircular, -170.0);
    let mut rig = Rig::new(config, 170.0);

    rig.step();
    assert_approx_eq!(rig.controller().last_report().setpoint, 190.0, 1e-9);
    assert!(rig.controller().last_report().target_velocity > 0.0);

    rig.run(2_500);
    let state = *rig.controller().state();
    assert_approx_eq!(state.position, 190.0, 0.05);

    // The joint itself reads the requested bounded angle
    let reading = must_some(rig.world.joint(JointId(0)), "joint missing");
    assert_approx_eq!(reading.angle_deg, -170.0, 0.05);
}

#[test]
fn over_current_regulator_output_is_clamped_and_saturates() {
    let config = ControllerConfig {
        pid: proportional(0.1),
        ..servo_config(ControlMode::Velocity, 150.0)
    };
    let mut c = controller(config);

    let report = c.tick(at_rest(0.0), DT);
    assert_approx_eq!(report.regulator_current, 15.0, 1e-9);
    assert_approx_eq!(report.current_draw, 10.0, 1e-9);
    assert!(report.saturated);
    assert!(c.is_saturated());
}

#[test]
fn saturated_ticks_freeze_the_integral() {
    let config = ControllerConfig {
        pid: PidGains::new(0.1, 1.0, 0.0),
        ..servo_config(ControlMode::Velocity, 150.0)
    };
    let mut c = controller(config);

    // First tick integrates (no saturation seen yet) and saturates
    c.tick(at_rest(0.0), DT);
    assert!(c.is_saturated());
    let integral = c.pid().integral;

    for _ in 0..50 {
        c.tick(at_rest(0.0), DT);
        assert!(c.is_saturated());
        assert_approx_eq!(c.pid().integral, integral, 0.0);
    }
}

#[test]
fn soft_limit_overrides_command_pushing_further_out() {
    let config = ControllerConfig {
        soft_limit: unit_soft_limits(),
        ..servo_config(ControlMode::Current, 4.0)
    };
    let mut c = controller(config);

    let report = c.tick(at_rest(95.0), DT);
    assert_approx_eq!(report.limit_current, -5.0, 1e-12);
    assert_approx_eq!(report.commanded_current, -5.0, 1e-12);
    assert!(report.output_torque < 0.0);
    assert!(report.saturated);
}

#[test]
fn soft_limit_preserves_recovering_command() {
    let config = ControllerConfig {
        soft_limit: unit_soft_limits(),
        ..servo_config(ControlMode::Current, -10.0)
    };
    let mut c = controller(config);

    let report = c.tick(at_rest(95.0), DT);
    assert_approx_eq!(report.commanded_current, -10.0, 1e-12);
    assert!(report.saturated);
}

#[test]
fn soft_limit_acts_while_off() {
    let config = ControllerConfig {
        soft_limit: unit_soft_limits(),
        ..servo_config(ControlMode::Off, 0.0)
    };
    let mut c = controller(config);

    let report = c.tick(at_rest(95.0), DT);
    assert_approx_eq!(report.regulator_current, 0.0, 0.0);
    assert_approx_eq!(report.commanded_current, -5.0, 1e-12);

    let inside = c.tick(at_rest(45.0), DT);
    assert_approx_eq!(inside.commanded_current, 0.0, 0.0);
    assert!(!inside.saturated);
}

#[test]
fn soft_limit_pushes_axis_back_inside() {
    let config = ControllerConfig {
        soft_limit: SoftLimitConfig::new(-90.0, 90.0, 5.0, 0.2),
        ..servo_config(ControlMode::Off, 0.0)
    };
    let mut rig = Rig::new(config, 120.0);
    rig.run(3_000);
    assert_in_range!(rig.controller().state().position, 85.0..=90.5);
}

#[test]
fn misconfigured_motor_is_rejected_up_front() {
    let mut config = servo_config(ControlMode::Velocity, 45.0);
    config.motor.no_load_speed = 0.0;
    assert!(AxisController::new(config).is_err());
}

#[test]
fn paused_simulation_holds_everything() {
    let mut rig = Rig::new(servo_config(ControlMode::Velocity, 45.0), 0.0);
    rig.run(100);
    let before = *rig.controller().state();

    rig.ctx.set_paused(true);
    assert_eq!(rig.run(100), 0);
    assert_eq!(*rig.controller().state(), before);
    assert_eq!(rig.ctx.tick(), 100);

    rig.ctx.set_paused(false);
    assert_eq!(rig.run(10), 10);
}

#[test]
fn signal_generator_drives_velocity_square_wave() {
    let config = ControllerConfig {
        signal: Some(SignalConfig::new(Waveform::Square, 30.0, 1.0, 0.0)),
        ..servo_config(ControlMode::Velocity, 0.0)
    };
    let mut rig = Rig::new(config, 0.0);

    rig.run(200);
    assert!(rig.controller().state().velocity > 20.0);
    rig.run(250);
    assert!(rig.controller().state().velocity < -20.0);
}

#[test]
fn unregistering_a_drive_stops_torque() {
    let mut rig = Rig::new(servo_config(ControlMode::Velocity, 90.0), 0.0);
    rig.run(200);
    let drive = rig.scheduler.unregister(rig.drive);
    assert!(drive.is_some());

    // Damping bleeds the motion off with nothing driving
    rig.run(2_000);
    let speed = must_some(rig.world.joint(JointId(0)), "joint missing").velocity_deg_s;
    assert!(speed.abs() < 1.0);
}
