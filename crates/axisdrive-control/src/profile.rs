//! Trapezoidal Profile Generator
//!
//! Bounds a raw position setpoint by a maximum velocity and acceleration,
//! producing the intermediate target the position loop tracks this tick.
//!
//! The profile accelerates towards the target, cruises at `limit_vel`, and
//! starts braking once the kinematic stopping distance (plus one tick of travel)
//! covers the remaining distance. When the profiled position crosses the target
//! at low speed it snaps onto the target exactly and latches a converged flag,
//! which avoids the residual oscillation a bare integrator leaves behind.

use axisdrive_errors::{Result, ValidationError};
use serde::{Deserialize, Serialize};

/// Motion limits for the profile generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileLimits {
    /// Maximum profiled velocity (deg/s). Also bounds velocity-mode setpoints.
    pub limit_vel: f64,
    /// Maximum profiled acceleration (deg/s²).
    pub limit_acc: f64,
    /// Lowest reachable position (deg).
    pub min_pos: f64,
    /// Highest reachable position (deg).
    pub max_pos: f64,
}

impl ProfileLimits {
    /// Create profile limits.
    pub const fn new(limit_vel: f64, limit_acc: f64, min_pos: f64, max_pos: f64) -> Self {
        Self {
            limit_vel,
            limit_acc,
            min_pos,
            max_pos,
        }
    }

    /// Clamp a desired position into `[min_pos, max_pos]`.
    ///
    /// NaN maps to `min_pos`.
    #[inline]
    pub fn clamp_position(&self, desire: f64) -> f64 {
        desire.max(self.min_pos).min(self.max_pos)
    }

    /// Clamp a velocity into `[-limit_vel, limit_vel]`.
    #[inline]
    pub fn clamp_velocity(&self, velocity: f64) -> f64 {
        velocity.max(-self.limit_vel).min(self.limit_vel)
    }

    /// Validate the limits.
    pub fn validate(&self) -> Result<()> {
        ValidationError::require_positive("profile.limit_vel", self.limit_vel)?;
        ValidationError::require_positive("profile.limit_acc", self.limit_acc)?;
        ValidationError::require_ordered("profile.position", self.min_pos, self.max_pos)
    }
}

impl Default for ProfileLimits {
    fn default() -> Self {
        Self::new(180.0, 720.0, -36_000.0, 36_000.0)
    }
}

/// State of the profile generator.
///
/// Owned by a single controller, mutated once per tick and persisted across
/// ticks. Only [`ProfileState::reset_to`] rewinds it.
///
/// # RT Safety
///
/// - `#[repr(C)]` for stable ABI
/// - No heap allocations
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ProfileState {
    /// Smoothed position emitted last tick (deg)
    pub position: f64,
    /// Smoothed velocity (deg/s)
    pub velocity: f64,
    /// Acceleration applied over the last tick (deg/s²)
    pub acceleration: f64,
    /// Clamped desire seen on the previous call (deg)
    pub last_desire: f64,
    /// Smoothed position at the start of the previous tick (deg)
    pub last_position: f64,
    /// Latched once the profile has snapped onto the desire
    pub converged: bool,
    /// Set when the profile crossed the desire too fast to snap
    pub overshoot: bool,
}

impl ProfileState {
    /// Create a profile resting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-seed the profile at a measured position and velocity.
    pub fn reset_to(&mut self, position: f64, velocity: f64) {
        *self = Self {
            position,
            velocity,
            acceleration: 0.0,
            last_desire: position,
            last_position: position,
            converged: false,
            overshoot: false,
        };
    }

    /// Whether the profile has arrived at its desire.
    pub fn is_converged(&self) -> bool {
        self.converged
    }
}

/// Advance the profile by one tick and return this tick's smoothed position.
///
/// # RT Safety
///
/// - No heap allocations
/// - O(1) time complexity
/// - Bounded execution time
///
/// # Arguments
///
/// * `desire` - Raw target position (deg), already circularly unwrapped
/// * `dt` - Step time (s)
/// * `limits` - Velocity, acceleration and position limits
/// * `state` - Profile state, updated in place
///
/// A non-positive step time or non-positive limits hold the current position.
///
/// # Example
///
/// ```
/// use axisdrive_control::prelude::*;
///
/// let limits = ProfileLimits::new(360.0, 100.0, -180.0, 180.0);
/// let mut state = ProfileState::new();
///
/// let mut ticks = 0;
/// while !state.is_converged() && ticks < 5_000 {
///     profile_generator(90.0, 0.002, &limits, &mut state);
///     ticks += 1;
/// }
/// assert!(state.is_converged());
/// assert!((state.position - 90.0).abs() < 1e-12);
/// ```
#[inline]
pub fn profile_generator(
    desire: f64,
    dt: f64,
    limits: &ProfileLimits,
    state: &mut ProfileState,
) -> f64 {
    let desire = limits.clamp_position(desire);
    let desire_changed = !same_desire(desire, state.last_desire);

    if state.converged && !desire_changed {
        return state.position;
    }

    let limit_vel = limits.limit_vel;
    let limit_acc = limits.limit_acc;
    if !(dt > 0.0 && limit_vel > 0.0 && limit_acc > 0.0) {
        return state.position;
    }

    state.converged = false;
    if desire_changed {
        state.overshoot = false;
    }
    state.last_desire = desire;

    let position = state.position;
    let velocity = state.velocity;

    let error_before = position - desire;
    let remaining = error_before.abs();
    let previous_remaining = (desire - state.last_position).abs();
    state.last_position = position;

    // Accelerate towards the target
    let half_distance = (desire - position) * 0.5;
    let mut acceleration = if half_distance > 0.0 {
        limit_acc
    } else if half_distance < 0.0 {
        -limit_acc
    } else {
        0.0
    };

    // Brake once the stopping distance plus one tick of travel covers what is
    // left, but only while the distance is still shrinking.
    let approaching = velocity * (desire - position) > 0.0;
    if approaching {
        let braking_distance = velocity * velocity / (2.0 * limit_acc) + velocity.abs() * dt;
        if braking_distance >= remaining && remaining < previous_remaining {
            acceleration = if velocity > 0.0 { -limit_acc } else { limit_acc };
        }
    }

    let next_velocity = limits.clamp_velocity(velocity + acceleration * dt);
    let applied_acceleration = (next_velocity - velocity) / dt;
    let next_position =
        position + next_velocity * dt + 0.5 * applied_acceleration * dt * dt;

    let error_after = next_position - desire;
    let crossed = error_before * error_after <= 0.0;
    let slow = next_velocity.abs() < 2.0 * limit_acc * dt;

    if crossed && slow {
        state.position = desire;
        state.velocity = 0.0;
        state.acceleration = 0.0;
        state.converged = true;
        state.overshoot = false;
    } else {
        if crossed {
            state.overshoot = true;
        }
        state.position = next_position;
        state.velocity = next_velocity;
        state.acceleration = applied_acceleration;
    }

    state.position
}

#[inline]
fn same_desire(a: f64, b: f64) -> bool {
    (a - b).abs() <= f64::EPSILON * a.abs().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 0.002;

    fn scenario_limits() -> ProfileLimits {
        ProfileLimits::new(360.0, 100.0, -180.0, 180.0)
    }

    fn run_until_converged(
        desire: f64,
        limits: &ProfileLimits,
        state: &mut ProfileState,
        max_ticks: usize,
    ) -> usize {
        let mut ticks = 0;
        while !state.converged && ticks < max_ticks {
            profile_generator(desire, DT, limits, state);
            ticks += 1;
        }
        ticks
    }

    #[test]
    fn test_first_tick_accelerates_towards_target() {
        let limits = scenario_limits();
        let mut state = ProfileState::new();
        let out = profile_generator(90.0, DT, &limits, &mut state);

        assert!(out > 0.0);
        assert!((state.velocity - 100.0 * DT).abs() < 1e-12);
        assert!((state.acceleration - 100.0).abs() < 1e-9);
        assert!(!state.converged);
    }

    #[test]
    fn test_negative_target_accelerates_negative() {
        let limits = scenario_limits();
        let mut state = ProfileState::new();
        profile_generator(-45.0, DT, &limits, &mut state);
        assert!(state.velocity < 0.0);
        assert!(state.position < 0.0);
    }

    #[test]
    fn test_converges_exactly_on_target() {
        let limits = scenario_limits();
        let mut state = ProfileState::new();
        let ticks = run_until_converged(90.0, &limits, &mut state, 5_000);

        assert!(state.converged, "profile did not converge in {ticks} ticks");
        assert!((state.position - 90.0).abs() < 1e-12);
        assert!(state.velocity.abs() < 1e-12);
        assert!(state.acceleration.abs() < 1e-12);
    }

    #[test]
    fn test_converged_profile_holds_without_recomputation() {
        let limits = scenario_limits();
        let mut state = ProfileState::new();
        run_until_converged(30.0, &limits, &mut state, 5_000);
        assert!(state.converged);

        let before = state;
        for _ in 0..100 {
            let out = profile_generator(30.0, DT, &limits, &mut state);
            assert!((out - 30.0).abs() < 1e-12);
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_new_desire_clears_converged_flag() {
        let limits = scenario_limits();
        let mut state = ProfileState::new();
        run_until_converged(10.0, &limits, &mut state, 5_000);
        assert!(state.converged);

        profile_generator(20.0, DT, &limits, &mut state);
        assert!(!state.converged);
        assert!(state.velocity > 0.0);
    }

    #[test]
    fn test_desire_clamped_to_position_limits() {
        let limits = ProfileLimits::new(360.0, 1000.0, -10.0, 10.0);
        let mut state = ProfileState::new();
        run_until_converged(500.0, &limits, &mut state, 10_000);
        assert!(state.converged);
        assert!((state.position - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_velocity_never_exceeds_limit_on_long_move() {
        let limits = ProfileLimits::new(50.0, 500.0, -1000.0, 1000.0);
        let mut state = ProfileState::new();
        let mut peak: f64 = 0.0;
        for _ in 0..20_000 {
            profile_generator(900.0, DT, &limits, &mut state);
            peak = peak.max(state.velocity.abs());
            assert!(state.velocity.abs() <= 50.0 + 1e-9);
            if state.converged {
                break;
            }
        }
        assert!(state.converged);
        assert!((peak - 50.0).abs() < 1e-9, "profile never cruised, peak {peak}");
    }

    #[test]
    fn test_zero_step_time_holds_position() {
        let limits = scenario_limits();
        let mut state = ProfileState::new();
        state.position = 5.0;
        let out = profile_generator(90.0, 0.0, &limits, &mut state);
        assert!((out - 5.0).abs() < 1e-12);
        assert!(state.velocity.abs() < 1e-12);
    }

    #[test]
    fn test_already_at_target_converges_immediately() {
        let limits = scenario_limits();
        let mut state = ProfileState::new();
        state.reset_to(12.5, 0.0);
        profile_generator(12.5, DT, &limits, &mut state);
        assert!(state.converged);
        assert!((state.position - 12.5).abs() < 1e-12);
    }

    #[test]
    fn test_fast_crossing_sets_overshoot() {
        let limits = scenario_limits();
        let mut state = ProfileState::new();
        // Moving fast towards a target right in front of us
        state.reset_to(0.0, 300.0);
        profile_generator(0.1, DT, &limits, &mut state);
        assert!(state.overshoot);
        assert!(!state.converged);

        run_until_converged(0.1, &limits, &mut state, 20_000);
        assert!(state.converged);
        assert!(!state.overshoot);
        assert!((state.position - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_reset_to_reseeds_state() {
        let mut state = ProfileState::new();
        state.converged = true;
        state.overshoot = true;
        state.reset_to(42.0, -3.0);
        assert!((state.position - 42.0).abs() < 1e-12);
        assert!((state.velocity + 3.0).abs() < 1e-12);
        assert!((state.last_desire - 42.0).abs() < 1e-12);
        assert!(!state.converged);
        assert!(!state.overshoot);
    }

    #[test]
    fn test_limits_validation() {
        assert!(ProfileLimits::default().validate().is_ok());
        assert!(ProfileLimits::new(0.0, 100.0, -1.0, 1.0).validate().is_err());
        assert!(ProfileLimits::new(10.0, -1.0, -1.0, 1.0).validate().is_err());
        assert!(ProfileLimits::new(10.0, 100.0, 1.0, -1.0).validate().is_err());
    }
}
