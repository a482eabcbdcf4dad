//! Mode arbiter and per-tick pipeline of one axis.
//!
//! Each tick runs, in order:
//!
//! 1. Signal generator (if enabled) replaces the setpoint
//! 2. Mode arbiter picks the regulator's input
//! 3. Velocity regulator, fed the previous tick's saturation verdict
//! 4. Soft-limit override, in every mode
//! 5. Motor model
//!
//! The saturation verdict of steps 4 and 5 is stored for the next tick's
//! regulator. It is never shared with another controller.

use crate::config::ControllerConfig;
use crate::estimator::{AxisEstimator, AxisState};
use crate::joint::JointReading;
use crate::mode::ControlMode;
use crate::report::TickReport;
use axisdrive_control::prelude::*;
use axisdrive_errors::{Result, ValidationError};
use axisdrive_motor::motor_model;
use tracing::{debug, info, trace, warn};

/// Controller for a single actuated axis.
///
/// # RT Safety
///
/// [`AxisController::observe`], [`AxisController::compute`] and
/// [`AxisController::tick`] do not allocate, block or fail. Configuration
/// changes go through [`AxisController::apply_config`], which validates and may
/// log.
///
/// # Example
///
/// ```
/// use axisdrive_engine::prelude::*;
///
/// let config = ControllerConfig {
///     mode: ControlMode::Velocity,
///     setpoint: 30.0,
///     ..ControllerConfig::default()
/// };
/// let mut controller = AxisController::new(config)?;
///
/// let report = controller.tick(JointReading::default(), 0.002);
/// assert!(report.output_torque > 0.0);
/// # Ok::<(), axisdrive_errors::ValidationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AxisController {
    config: ControllerConfig,
    mode: ControlMode,
    setpoint: f64,
    signal: Option<SignalGenerator>,
    profile: ProfileState,
    pid: PidState,
    soft_limit: SoftLimitState,
    estimator: AxisEstimator,
    saturated: bool,
    report: TickReport,
    motor_fault_logged: bool,
}

impl AxisController {
    /// Create a controller from a configuration.
    ///
    /// Fails if the configuration does not validate.
    pub fn new(config: ControllerConfig) -> Result<Self> {
        config.validate()?;
        info!(mode = %config.mode, setpoint = config.setpoint, "creating axis controller");

        let mut controller = Self {
            mode: config.mode,
            setpoint: config.setpoint,
            signal: config.signal.map(SignalGenerator::new),
            profile: ProfileState::new(),
            pid: PidState::new(),
            soft_limit: SoftLimitState::new(),
            estimator: AxisEstimator::new(),
            saturated: false,
            report: TickReport {
                mode: config.mode,
                ..TickReport::default()
            },
            motor_fault_logged: false,
            config,
        };
        controller.enter_mode();
        Ok(controller)
    }

    /// Active configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Validate and swap in a new configuration.
    ///
    /// Profile, regulator and estimator state carry over. The configured mode
    /// is applied as with [`AxisController::set_mode`]; the live setpoint is
    /// kept.
    pub fn apply_config(&mut self, config: ControllerConfig) -> Result<()> {
        config.validate()?;
        info!(
            mode = %config.mode,
            limit_vel = config.profile.limit_vel,
            nominal_current = config.motor.nominal_current,
            "applying controller configuration"
        );

        self.signal = match (config.signal, self.signal.take()) {
            (Some(signal_config), Some(mut generator)) => {
                generator.set_config(signal_config);
                Some(generator)
            }
            (Some(signal_config), None) => Some(SignalGenerator::new(signal_config)),
            (None, _) => None,
        };
        self.motor_fault_logged = false;
        let mode = config.mode;
        self.config = config;
        self.set_mode(mode);
        Ok(())
    }

    /// Active mode.
    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    /// Switch modes. Setting the active mode again is a no-op.
    pub fn set_mode(&mut self, mode: ControlMode) {
        if mode == self.mode {
            return;
        }
        debug!(from = %self.mode, to = %mode, "control mode transition");
        self.mode = mode;
        self.enter_mode();
    }

    /// Live setpoint, in the active mode's unit.
    pub fn setpoint(&self) -> f64 {
        self.setpoint
    }

    /// Set the setpoint. Non-finite values are ignored.
    pub fn set_setpoint(&mut self, setpoint: f64) {
        if setpoint.is_finite() {
            self.setpoint = setpoint;
        }
    }

    /// Start replacing the setpoint with a test signal, from phase zero.
    pub fn enable_signal(&mut self, config: SignalConfig) -> Result<()> {
        config.validate()?;
        self.config.signal = Some(config);
        self.signal = Some(SignalGenerator::new(config));
        Ok(())
    }

    /// Stop the test signal and go back to the external setpoint.
    pub fn disable_signal(&mut self) {
        self.config.signal = None;
        self.signal = None;
    }

    /// Test signal generator, if enabled.
    pub fn signal(&self) -> Option<&SignalGenerator> {
        self.signal.as_ref()
    }

    /// Latest axis estimate.
    pub fn state(&self) -> &AxisState {
        self.estimator.state()
    }

    /// Profile generator state.
    pub fn profile(&self) -> &ProfileState {
        &self.profile
    }

    /// Velocity regulator state.
    pub fn pid(&self) -> &PidState {
        &self.pid
    }

    /// Soft-limit state.
    pub fn soft_limit(&self) -> &SoftLimitState {
        &self.soft_limit
    }

    /// Saturation verdict of the last tick.
    pub fn is_saturated(&self) -> bool {
        self.saturated
    }

    /// Whether the controller has seen a joint reading.
    pub fn is_seeded(&self) -> bool {
        self.estimator.is_seeded()
    }

    /// Report of the last computed tick.
    pub fn last_report(&self) -> &TickReport {
        &self.report
    }

    /// Re-seed the profile generator at the measured position and velocity.
    pub fn reset_profile(&mut self) {
        let axis = *self.estimator.state();
        self.profile.reset_to(axis.position, axis.velocity);
    }

    /// Clear regulator, profile, soft-limit and signal state.
    ///
    /// The estimator keeps its revolution count.
    pub fn reset(&mut self) {
        self.pid.reset();
        self.soft_limit.reset();
        if let Some(signal) = &mut self.signal {
            signal.reset();
        }
        self.saturated = false;
        self.reset_profile();
    }

    /// Fold in the joint state read after the physics step.
    ///
    /// The first reading also re-seeds the profile in position modes, so
    /// the axis does not jump towards zero on start-up.
    pub fn observe(&mut self, reading: JointReading, dt: f64) -> &AxisState {
        let first = !self.estimator.is_seeded();
        self.estimator.update(reading, dt, self.config.motor.gear_ratio);
        if first && self.mode.is_position() {
            self.reset_profile();
        }
        self.estimator.state()
    }

    /// Compute this tick's joint torque from the latest estimate.
    ///
    /// # RT Safety
    ///
    /// - No heap allocations
    /// - No fallible operations; invalid conditions clamp
    pub fn compute(&mut self, dt: f64) -> TickReport {
        let axis = *self.estimator.state();
        let mut report = TickReport {
            mode: self.mode,
            ..TickReport::default()
        };

        let mut setpoint = self.setpoint;
        match (self.mode, self.signal.as_mut()) {
            (ControlMode::Off, Some(signal)) => signal.reset(),
            (ControlMode::Off, None) => {}
            (_, Some(signal)) => setpoint = signal.sample(dt),
            (_, None) => {}
        }

        let limits = self.config.profile;
        let regulator_current = match self.mode {
            ControlMode::Off => {
                self.pid.reset();
                0.0
            }
            ControlMode::Current => {
                self.pid.reset();
                setpoint
            }
            ControlMode::Velocity => {
                let target_velocity = limits.clamp_velocity(setpoint);
                report.target_velocity = target_velocity;
                self.regulate(target_velocity, axis.velocity, dt)
            }
            ControlMode::Position | ControlMode::PositionCircular => {
                if self.mode == ControlMode::PositionCircular {
                    setpoint = unwrap_circular(setpoint, axis.position);
                }
                let target = profile_generator(setpoint, dt, &limits, &mut self.profile);
                let target_velocity = position_to_velocity(
                    target - axis.position,
                    &self.config.gain_schedule,
                    limits.limit_vel,
                );
                report.profile_target = target;
                report.target_velocity = target_velocity;
                self.regulate(target_velocity, axis.velocity, dt)
            }
        };
        report.setpoint = setpoint;
        report.regulator_current = regulator_current;

        let command = soft_limit_override(
            CurrentCommand::free(regulator_current),
            axis.position,
            axis.velocity,
            &self.config.soft_limit,
            &mut self.soft_limit,
        );
        if self.soft_limit.active {
            report.limit_current = self.soft_limit.limit_current;
        }
        report.commanded_current = command.current;

        let motor = &self.config.motor;
        if !motor.is_operational() && !self.motor_fault_logged {
            warn!(
                no_load_speed = motor.no_load_speed,
                gear_ratio = motor.gear_ratio,
                "motor misconfigured, holding zero torque"
            );
            self.motor_fault_logged = true;
        }
        let output = motor_model(command.current, axis.motor_velocity_rpm, motor);
        self.estimator.record_motor(&output);

        self.saturated = command.saturated || output.saturated;

        report.current_draw = output.current_draw;
        report.motor_torque = output.motor_torque;
        report.output_torque = output.output_torque;
        report.saturated = self.saturated;

        trace!(torque = output.output_torque, saturated = self.saturated, "axis tick");

        self.report = report;
        report
    }

    /// Observe a reading, then compute.
    pub fn tick(&mut self, reading: JointReading, dt: f64) -> TickReport {
        self.observe(reading, dt);
        self.compute(dt)
    }

    fn regulate(&mut self, target_velocity: f64, measured_velocity: f64, dt: f64) -> f64 {
        velocity_regulator(
            target_velocity,
            measured_velocity,
            dt,
            &self.config.pid,
            self.saturated,
            &mut self.pid,
        )
    }

    fn enter_mode(&mut self) {
        match self.mode {
            ControlMode::Off => {
                self.pid.reset();
                if let Some(signal) = &mut self.signal {
                    signal.reset();
                }
            }
            ControlMode::Current | ControlMode::Velocity => self.pid.reset(),
            ControlMode::Position | ControlMode::PositionCircular => {
                self.pid.reset();
                self.reset_profile();
            }
        }
    }
}

impl TryFrom<ControllerConfig> for AxisController {
    type Error = ValidationError;

    fn try_from(config: ControllerConfig) -> Result<Self> {
        Self::new(config)
    }
}
