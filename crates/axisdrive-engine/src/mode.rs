//! Control modes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which pipeline stages run on a tick and how the setpoint is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlMode {
    /// No command. Only the soft-limit override can produce current.
    #[default]
    Off,
    /// Setpoint is a current (A), passed straight to the motor.
    Current,
    /// Setpoint is an axis velocity (deg/s).
    Velocity,
    /// Setpoint is a multi-turn axis position (deg).
    Position,
    /// Setpoint is an angle reached along the shortest path (deg).
    PositionCircular,
}

impl ControlMode {
    /// Whether the profile generator and gain schedule run in this mode.
    pub fn is_position(self) -> bool {
        matches!(self, ControlMode::Position | ControlMode::PositionCircular)
    }

    /// Whether the velocity regulator runs in this mode.
    pub fn uses_regulator(self) -> bool {
        !matches!(self, ControlMode::Off | ControlMode::Current)
    }

    /// Setpoint unit, for display.
    pub fn setpoint_unit(self) -> &'static str {
        match self {
            ControlMode::Off => "",
            ControlMode::Current => "A",
            ControlMode::Velocity => "deg/s",
            ControlMode::Position | ControlMode::PositionCircular => "deg",
        }
    }
}

impl fmt::Display for ControlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ControlMode::Off => "off",
            ControlMode::Current => "current",
            ControlMode::Velocity => "velocity",
            ControlMode::Position => "position",
            ControlMode::PositionCircular => "position_circular",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_classification() {
        assert!(ControlMode::Position.is_position());
        assert!(ControlMode::PositionCircular.is_position());
        assert!(!ControlMode::Velocity.is_position());
        assert!(ControlMode::Velocity.uses_regulator());
        assert!(!ControlMode::Current.uses_regulator());
        assert!(!ControlMode::Off.uses_regulator());
    }

    #[test]
    fn test_display_matches_serde_name() -> Result<(), serde_json::Error> {
        for mode in [
            ControlMode::Off,
            ControlMode::Current,
            ControlMode::Velocity,
            ControlMode::Position,
            ControlMode::PositionCircular,
        ] {
            let json = serde_json::to_string(&mode)?;
            assert_eq!(json, format!("\"{mode}\""));
        }
        Ok(())
    }
}
