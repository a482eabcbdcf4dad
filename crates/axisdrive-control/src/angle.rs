//! Angle normalization and circular setpoint unwrap.

/// Map any angle in degrees into (−180°, 180°].
///
/// Equivalent to repeatedly adding or subtracting 360° until the value lands in
/// range, computed in constant time.
///
/// # Example
///
/// ```
/// use axisdrive_control::normalize_deg;
///
/// assert!((normalize_deg(190.0) - (-170.0)).abs() < 1e-12);
/// assert!((normalize_deg(-180.0) - 180.0).abs() < 1e-12);
/// assert!((normalize_deg(720.0)).abs() < 1e-12);
/// ```
#[inline]
pub fn normalize_deg(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Rewrite a circular setpoint as the equivalent angle nearest the measured
/// axis position.
///
/// Returns `axis_position + normalize(normalize(setpoint) − normalize(axis_position))`,
/// so the axis never winds a full turn to reach an angle it could reach by
/// turning less than half a turn.
///
/// # Example
///
/// ```
/// use axisdrive_control::unwrap_circular;
///
/// // 170° to -170° is 20° forward, not 340° back
/// assert!((unwrap_circular(-170.0, 170.0) - 190.0).abs() < 1e-9);
/// ```
#[inline]
pub fn unwrap_circular(setpoint: f64, axis_position: f64) -> f64 {
    let delta = normalize_deg(normalize_deg(setpoint) - normalize_deg(axis_position));
    axis_position + delta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_identity_in_range() {
        for angle in [-179.5, -90.0, 0.0, 45.0, 179.9, 180.0] {
            assert!((normalize_deg(angle) - angle).abs() < 1e-12, "angle {angle}");
        }
    }

    #[test]
    fn test_normalize_lower_bound_is_exclusive() {
        assert!((normalize_deg(-180.0) - 180.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_multi_turn() {
        assert!((normalize_deg(1090.0) - 10.0).abs() < 1e-9);
        assert!((normalize_deg(-1090.0) + 10.0).abs() < 1e-9);
        assert!((normalize_deg(540.0) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_unwrap_shortest_path_across_seam() {
        assert!((unwrap_circular(-170.0, 170.0) - 190.0).abs() < 1e-9);
        assert!((unwrap_circular(170.0, -170.0) + 190.0).abs() < 1e-9);
    }

    #[test]
    fn test_unwrap_keeps_multi_turn_axis_position() {
        // Axis has wound two full turns; target 10° is 20° behind 750° (= 30°)
        let unwrapped = unwrap_circular(10.0, 750.0);
        assert!((unwrapped - 730.0).abs() < 1e-9);
    }

    #[test]
    fn test_unwrap_ignores_setpoint_turns() {
        assert!((unwrap_circular(370.0, 0.0) - 10.0).abs() < 1e-9);
    }
}
