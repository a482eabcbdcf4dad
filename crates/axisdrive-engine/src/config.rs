//! Controller configuration.

use crate::mode::ControlMode;
use axisdrive_control::{GainSchedule, PidGains, ProfileLimits, SignalConfig, SoftLimitConfig};
use axisdrive_errors::{Result, ValidationError};
use axisdrive_motor::MotorParameters;
use serde::{Deserialize, Serialize};

/// Everything a controller needs, set once or rarely.
///
/// Missing fields fall back to their defaults, so a file only has to name what
/// differs from a stock small geared servo.
///
/// ```
/// use axisdrive_engine::{ControlMode, ControllerConfig};
///
/// let config: ControllerConfig = serde_json::from_str(
///     r#"{ "mode": "position", "setpoint": 90.0, "pid": { "kp": 0.1 } }"#,
/// )?;
/// assert_eq!(config.mode, ControlMode::Position);
/// assert!(config.validate().is_ok());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Mode entered when the controller is created or the config applied
    pub mode: ControlMode,
    /// Initial setpoint, in the mode's unit
    pub setpoint: f64,
    /// Velocity regulator gains
    pub pid: PidGains,
    /// Position error to velocity gain
    pub gain_schedule: GainSchedule,
    /// Profile generator limits
    pub profile: ProfileLimits,
    /// Soft position bounds
    pub soft_limit: SoftLimitConfig,
    /// Motor and gearbox
    pub motor: MotorParameters,
    /// Optional test signal replacing the setpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<SignalConfig>,
}

impl ControllerConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        ValidationError::require_finite("setpoint", self.setpoint)?;
        self.pid.validate()?;
        self.gain_schedule.validate()?;
        self.profile.validate()?;
        self.soft_limit.validate()?;
        self.motor.validate()?;
        if let Some(signal) = &self.signal {
            signal.validate()?;
        }
        Ok(())
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            mode: ControlMode::Off,
            setpoint: 0.0,
            pid: PidGains::default(),
            gain_schedule: GainSchedule::default(),
            profile: ProfileLimits::default(),
            soft_limit: SoftLimitConfig::default(),
            motor: MotorParameters::default(),
            signal: None,
        }
    }
}
