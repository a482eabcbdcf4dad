//! Motor and gearbox parameters.

use axisdrive_curves::TorqueSpeedCurve;
use axisdrive_errors::{Result, ValidationError};
use serde::{Deserialize, Serialize};

/// Axis deg/s to shaft rpm before the gearbox (360 deg per rev, 60 s per min).
pub const DEG_PER_SEC_TO_RPM: f64 = 1.0 / 6.0;

/// Motor-side speed (rpm) for an axis velocity (deg/s) behind `gear_ratio`.
#[inline]
pub fn axis_to_motor_rpm(axis_velocity_deg_s: f64, gear_ratio: f64) -> f64 {
    axis_velocity_deg_s * DEG_PER_SEC_TO_RPM * gear_ratio
}

/// Electromechanical parameters of a geared DC motor.
///
/// Defaults describe a small geared servo: 10 A nominal, 3000 rpm no-load,
/// 0.05 N·m/A behind a 100:1 gearbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotorParameters {
    /// Continuous current ceiling (A)
    pub nominal_current: f64,
    /// Shaft speed at zero torque (rpm)
    pub no_load_speed: f64,
    /// Torque constant (N·m/A)
    pub kt: f64,
    /// Torque-speed envelope, shaft rpm to maximum shaft torque (N·m)
    pub kv: TorqueSpeedCurve,
    /// Motor efficiency (0..=1)
    pub ke: f64,
    /// Gearbox reduction, motor turns per axis turn
    pub gear_ratio: f64,
    /// Gearbox efficiency (0..=1)
    pub kr: f64,
}

impl MotorParameters {
    /// True when the model can produce torque at all.
    ///
    /// A non-positive no-load speed or gear ratio makes the model output zero
    /// instead of failing.
    #[inline]
    pub fn is_operational(&self) -> bool {
        self.no_load_speed > 0.0 && self.gear_ratio > 0.0
    }

    /// Stall torque at the axis (N·m) with the nominal current.
    pub fn peak_axis_torque(&self) -> f64 {
        let motor = (self.nominal_current * self.kt * self.ke).min(self.kv.stall_torque());
        motor * self.gear_ratio * self.kr
    }

    /// Validate the parameters.
    ///
    /// The model tolerates misconfiguration at runtime; this is for rejecting
    /// bad configuration files before they reach a controller.
    pub fn validate(&self) -> Result<()> {
        ValidationError::require_positive("motor.nominal_current", self.nominal_current)?;
        ValidationError::require_positive("motor.no_load_speed", self.no_load_speed)?;
        ValidationError::require_positive("motor.kt", self.kt)?;
        ValidationError::require_in_range("motor.ke", self.ke, 0.0, 1.0)?;
        ValidationError::require_positive("motor.gear_ratio", self.gear_ratio)?;
        ValidationError::require_in_range("motor.kr", self.kr, 0.0, 1.0)?;
        if !self.kv.is_non_increasing() {
            return Err(ValidationError::invalid_curve(
                "motor.kv",
                "torque must not rise with speed",
            ));
        }
        Ok(())
    }
}

impl Default for MotorParameters {
    fn default() -> Self {
        let nominal_current = 10.0;
        let no_load_speed = 3000.0;
        let kt = 0.05;
        Self {
            nominal_current,
            no_load_speed,
            kt,
            kv: TorqueSpeedCurve::ideal_dc(nominal_current * kt, no_load_speed),
            ke: 0.9,
            gear_ratio: 100.0,
            kr: 0.8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axisdrive_test_helpers::must;

    #[test]
    fn test_default_parameters_are_valid() {
        let params = MotorParameters::default();
        assert!(params.validate().is_ok());
        assert!(params.is_operational());
    }

    #[test]
    fn test_rpm_conversion() {
        // 360 deg/s is 60 rpm at the axis
        assert!((axis_to_motor_rpm(360.0, 1.0) - 60.0).abs() < 1e-12);
        assert!((axis_to_motor_rpm(-36.0, 100.0) + 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_misconfiguration_is_not_operational() {
        let params = MotorParameters {
            gear_ratio: 0.0,
            ..MotorParameters::default()
        };
        assert!(!params.is_operational());
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rising_envelope_rejected() {
        let params = MotorParameters {
            kv: must(TorqueSpeedCurve::from_pairs(&[(0.0, 0.1), (1000.0, 0.5)])),
            ..MotorParameters::default()
        };
        let err = params.validate();
        assert!(matches!(err, Err(ValidationError::InvalidCurve { .. })));
    }

    #[test]
    fn test_efficiency_out_of_range_rejected() {
        let params = MotorParameters {
            ke: 1.5,
            ..MotorParameters::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_peak_axis_torque() {
        let params = MotorParameters::default();
        // min(10 * 0.05 * 0.9, 0.5) * 100 * 0.8
        assert!((params.peak_axis_torque() - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_serde_fills_defaults() -> std::result::Result<(), serde_json::Error> {
        let params: MotorParameters = serde_json::from_str(
            r#"{"nominal_current": 4.0, "kv": [{"speed_rpm": 0.0, "torque_nm": 0.2}]}"#,
        )?;
        assert!((params.nominal_current - 4.0).abs() < f64::EPSILON);
        assert!((params.gear_ratio - 100.0).abs() < f64::EPSILON);
        assert!((params.kv.stall_torque() - 0.2).abs() < f64::EPSILON);
        Ok(())
    }
}
