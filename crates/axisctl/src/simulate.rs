//! Drives one axis against the virtual joint world.

use crate::error::CliError;
use axisdrive_engine::prelude::*;
use serde::Serialize;

/// Plant and timing of a characterization run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    /// Simulated duration (s)
    pub duration_s: f64,
    /// Step time (s)
    pub step_time: f64,
    /// Record a sample every N ticks; 0 records none
    pub sample_every: u64,
    /// Joint inertia (kg·m²)
    pub inertia: f64,
    /// Joint viscous damping (N·m·s/rad)
    pub damping: f64,
    /// Constant external load (N·m)
    pub load_torque: f64,
    /// Initial joint angle (deg)
    pub start_angle_deg: f64,
}

impl Default for RunOptions {
    fn default() -> Self {
        let joint = VirtualJoint::default();
        Self {
            duration_s: 2.0,
            step_time: 0.002,
            sample_every: 0,
            inertia: joint.inertia,
            damping: joint.damping,
            load_torque: 0.0,
            start_angle_deg: 0.0,
        }
    }
}

/// One recorded tick.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Sample {
    pub tick: u64,
    pub time_s: f64,
    pub position: f64,
    pub velocity: f64,
    #[serde(flatten)]
    pub report: TickReport,
}

/// Aggregate response of a run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RunSummary {
    pub mode: ControlMode,
    pub ticks: u64,
    pub duration_s: f64,
    pub final_position: f64,
    pub final_velocity: f64,
    pub peak_velocity: f64,
    pub peak_current: f64,
    pub peak_torque: f64,
    pub saturated_ticks: u64,
    /// Time the profile first arrived on target, position modes only
    pub converged_at_s: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub summary: RunSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<Sample>,
}

/// Run `config` for `options.duration_s` on a fresh virtual joint.
pub fn simulate(config: ControllerConfig, options: &RunOptions) -> Result<RunResult, CliError> {
    let mut ctx = SimulationContext::new(options.step_time)?;
    axisdrive_errors::ValidationError::require_non_negative("duration", options.duration_s)?;
    axisdrive_errors::ValidationError::require_positive("inertia", options.inertia)?;
    axisdrive_errors::ValidationError::require_non_negative("damping", options.damping)?;

    let mut world = VirtualJointWorld::new();
    let joint = world.add_joint(
        VirtualJoint::new(options.inertia, options.damping, options.start_angle_deg)
            .with_load(options.load_torque),
    );

    let mode = config.mode;
    let mut scheduler = TickScheduler::new();
    let id = scheduler.register(JointDrive::new(joint, AxisController::new(config)?));

    let ticks = (options.duration_s / options.step_time).round() as u64;
    tracing::info!(%mode, ticks, step_time = options.step_time, "starting simulation");

    let mut samples = Vec::new();
    let mut summary = RunSummary {
        mode,
        ticks: 0,
        duration_s: 0.0,
        final_position: 0.0,
        final_velocity: 0.0,
        peak_velocity: 0.0,
        peak_current: 0.0,
        peak_torque: 0.0,
        saturated_ticks: 0,
        converged_at_s: None,
    };

    for _ in 0..ticks {
        scheduler.step(&mut ctx, &mut world);
        let Some(drive) = scheduler.get(id) else {
            break;
        };
        let controller = drive.controller();
        let report = *controller.last_report();
        let state = *controller.state();

        summary.peak_velocity = summary.peak_velocity.max(state.velocity.abs());
        summary.peak_current = summary.peak_current.max(report.current_draw.abs());
        summary.peak_torque = summary.peak_torque.max(report.output_torque.abs());
        if report.saturated {
            summary.saturated_ticks += 1;
        }
        if summary.converged_at_s.is_none()
            && mode.is_position()
            && controller.profile().is_converged()
        {
            summary.converged_at_s = Some(ctx.elapsed());
        }

        if options.sample_every > 0 && (ctx.tick() - 1) % options.sample_every == 0 {
            samples.push(Sample {
                tick: ctx.tick(),
                time_s: ctx.elapsed(),
                position: state.position,
                velocity: state.velocity,
                report,
            });
        }

        summary.final_position = state.position;
        summary.final_velocity = state.velocity;
    }

    summary.ticks = ctx.tick();
    summary.duration_s = ctx.elapsed();
    tracing::debug!(ticks = summary.ticks, final_position = summary.final_position, "simulation finished");

    Ok(RunResult { summary, samples })
}
