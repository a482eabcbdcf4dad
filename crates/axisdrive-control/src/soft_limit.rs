//! Position soft-limit override.
//!
//! Runs after the regulator in every mode, including `Off`. Outside the
//! configured bounds it computes a recovery current and substitutes it for
//! the regulator's output only when the regulator would push the axis deeper
//! into the violation. A command that already recovers is left alone.

use crate::CurrentCommand;
use axisdrive_errors::{Result, ValidationError};
use serde::{Deserialize, Serialize};

/// Soft position bounds and recovery gains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoftLimitConfig {
    /// Lower bound (deg)
    pub min_bound: f64,
    /// Upper bound (deg)
    pub max_bound: f64,
    /// Recovery velocity per degree of violation (1/s)
    pub position_gain: f64,
    /// Current per deg/s of recovery velocity error (A·s/deg)
    pub velocity_gain: f64,
}

impl SoftLimitConfig {
    /// Create a soft-limit configuration.
    pub const fn new(min_bound: f64, max_bound: f64, position_gain: f64, velocity_gain: f64) -> Self {
        Self {
            min_bound,
            max_bound,
            position_gain,
            velocity_gain,
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        ValidationError::require_ordered("soft_limit", self.min_bound, self.max_bound)?;
        ValidationError::require_non_negative("soft_limit.position_gain", self.position_gain)?;
        ValidationError::require_non_negative("soft_limit.velocity_gain", self.velocity_gain)?;
        Ok(())
    }
}

impl Default for SoftLimitConfig {
    fn default() -> Self {
        Self::new(-36_000.0, 36_000.0, 10.0, 0.1)
    }
}

/// Observable soft-limit output.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SoftLimitState {
    /// Recovery current computed on the last out-of-bounds tick (A)
    pub limit_current: f64,
    /// Whether the axis was outside the bounds on the last tick
    pub active: bool,
}

impl SoftLimitState {
    /// Create an inactive state.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Apply the soft-limit override to the regulator's command.
///
/// Inside the bounds the command passes through unchanged. Outside, the
/// result is always flagged saturated, whether or not it was overridden.
///
/// # RT Safety
///
/// - No heap allocations
/// - O(1) time complexity
#[inline]
pub fn soft_limit_override(
    main: CurrentCommand,
    position: f64,
    velocity: f64,
    config: &SoftLimitConfig,
    state: &mut SoftLimitState,
) -> CurrentCommand {
    let above = position > config.max_bound;
    let below = position < config.min_bound;

    if !above && !below {
        state.active = false;
        return main;
    }

    let bound = if above { config.max_bound } else { config.min_bound };
    let target_velocity = (bound - position) * config.position_gain;
    let limit = (target_velocity - velocity) * config.velocity_gain;
    state.limit_current = limit;
    state.active = true;

    let deepening = (above && main.current > limit) || (below && main.current < limit);
    if deepening {
        CurrentCommand::saturated(limit)
    } else {
        CurrentCommand::saturated(main.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone() -> SoftLimitConfig {
        SoftLimitConfig::new(-90.0, 90.0, 1.0, 1.0)
    }

    #[test]
    fn test_inside_bounds_passes_through() {
        let mut state = SoftLimitState::new();
        let out = soft_limit_override(CurrentCommand::free(3.0), 10.0, 0.0, &zone(), &mut state);
        assert_eq!(out, CurrentCommand::free(3.0));
        assert!(!state.active);
    }

    #[test]
    fn test_above_max_overrides_deepening_command() {
        let mut state = SoftLimitState::new();
        let out = soft_limit_override(CurrentCommand::free(4.0), 95.0, 0.0, &zone(), &mut state);
        assert!((out.current + 5.0).abs() < 1e-12);
        assert!(out.saturated);
        assert!(state.active);
        assert!((state.limit_current + 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_above_max_preserves_recovering_command() {
        let mut state = SoftLimitState::new();
        let out = soft_limit_override(CurrentCommand::free(-10.0), 95.0, 0.0, &zone(), &mut state);
        assert!((out.current + 10.0).abs() < 1e-12);
        assert!(out.saturated);
    }

    #[test]
    fn test_below_min_overrides_deepening_command() {
        let mut state = SoftLimitState::new();
        let out = soft_limit_override(CurrentCommand::free(-2.0), -100.0, 0.0, &zone(), &mut state);
        assert!((out.current - 10.0).abs() < 1e-12);
        assert!(out.saturated);
    }

    #[test]
    fn test_limit_accounts_for_velocity() {
        let mut state = SoftLimitState::new();
        // Already recovering faster than the target velocity
        soft_limit_override(CurrentCommand::free(0.0), 95.0, -20.0, &zone(), &mut state);
        assert!((state.limit_current - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_on_bound_is_inside() {
        let mut state = SoftLimitState::new();
        let out = soft_limit_override(CurrentCommand::free(7.0), 90.0, 0.0, &zone(), &mut state);
        assert!(!out.saturated);
        assert!(!state.active);
    }
}
