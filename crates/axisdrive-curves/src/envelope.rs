//! Piecewise-linear torque-speed envelope.

use serde::{Deserialize, Serialize};

use crate::error::CurveError;

/// One breakpoint of a torque-speed envelope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Motor speed magnitude (rpm).
    pub speed_rpm: f64,
    /// Maximum deliverable motor torque at that speed (Nm).
    pub torque_nm: f64,
}

impl CurvePoint {
    /// Create a breakpoint.
    pub const fn new(speed_rpm: f64, torque_nm: f64) -> Self {
        Self {
            speed_rpm,
            torque_nm,
        }
    }
}

/// Maximum motor torque as a function of motor speed.
///
/// Between breakpoints the envelope is interpolated linearly; below the first
/// breakpoint it holds the first torque and beyond the last it holds the last
/// torque.
///
/// # RT Safety
///
/// `max_torque()` is RT-safe:
/// - No heap allocations
/// - O(log n) time complexity
/// - Bounded execution time
///
/// # Example
///
/// ```
/// use axisdrive_curves::{CurvePoint, TorqueSpeedCurve};
///
/// let curve = TorqueSpeedCurve::new(vec![
///     CurvePoint::new(0.0, 1.0),
///     CurvePoint::new(1000.0, 1.0),
///     CurvePoint::new(3000.0, 0.0),
/// ])?;
///
/// assert!((curve.max_torque(500.0) - 1.0).abs() < 1e-12);
/// assert!((curve.max_torque(2000.0) - 0.5).abs() < 1e-12);
/// # Ok::<(), axisdrive_curves::CurveError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CurvePoint>", into = "Vec<CurvePoint>")]
pub struct TorqueSpeedCurve {
    points: Vec<CurvePoint>,
}

impl TorqueSpeedCurve {
    /// Build an envelope from breakpoints (configuration time, not RT).
    ///
    /// Points must be non-empty, finite, non-negative and strictly ascending in
    /// speed.
    pub fn new(points: Vec<CurvePoint>) -> Result<Self, CurveError> {
        if points.is_empty() {
            return Err(CurveError::Empty);
        }

        let mut previous_speed: Option<f64> = None;
        for (index, point) in points.iter().enumerate() {
            check_coordinate(index, "speed", point.speed_rpm)?;
            check_coordinate(index, "torque", point.torque_nm)?;

            if let Some(previous) = previous_speed
                && point.speed_rpm <= previous
            {
                return Err(CurveError::NotAscending {
                    index,
                    speed: point.speed_rpm,
                });
            }
            previous_speed = Some(point.speed_rpm);
        }

        Ok(Self { points })
    }

    /// Build an envelope from `(speed_rpm, torque_nm)` pairs.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, CurveError> {
        Self::new(
            pairs
                .iter()
                .map(|&(speed, torque)| CurvePoint::new(speed, torque))
                .collect(),
        )
    }

    /// Ideal DC motor envelope: stall torque at standstill falling linearly to
    /// zero at the no-load speed.
    pub fn linear(stall_torque_nm: f64, no_load_speed_rpm: f64) -> Result<Self, CurveError> {
        if !(no_load_speed_rpm.is_finite() && no_load_speed_rpm > 0.0) {
            return Err(CurveError::InvalidConfiguration(format!(
                "no-load speed must be positive and finite, got {}",
                no_load_speed_rpm
            )));
        }
        Self::new(vec![
            CurvePoint::new(0.0, stall_torque_nm),
            CurvePoint::new(no_load_speed_rpm, 0.0),
        ])
    }

    /// Infallible form of [`TorqueSpeedCurve::linear`] for built-in defaults.
    ///
    /// A negative or non-finite stall torque becomes zero. A no-load speed that
    /// is not positive and finite gives an envelope with no torque at all.
    pub fn ideal_dc(stall_torque_nm: f64, no_load_speed_rpm: f64) -> Self {
        let stall = if stall_torque_nm.is_finite() {
            stall_torque_nm.max(0.0)
        } else {
            0.0
        };
        let points = if no_load_speed_rpm.is_finite() && no_load_speed_rpm > 0.0 {
            vec![
                CurvePoint::new(0.0, stall),
                CurvePoint::new(no_load_speed_rpm, 0.0),
            ]
        } else {
            vec![CurvePoint::new(0.0, 0.0)]
        };
        Self { points }
    }

    /// Envelope with the same torque ceiling at every speed.
    pub fn constant(torque_nm: f64) -> Result<Self, CurveError> {
        Self::new(vec![CurvePoint::new(0.0, torque_nm)])
    }

    /// Maximum torque deliverable at `speed_rpm` (RT-safe).
    ///
    /// The sign of `speed_rpm` is ignored. A NaN speed is treated as beyond the
    /// last breakpoint.
    #[inline]
    pub fn max_torque(&self, speed_rpm: f64) -> f64 {
        let speed = if speed_rpm.is_nan() {
            f64::INFINITY
        } else {
            speed_rpm.abs()
        };

        let upper = self.points.partition_point(|p| p.speed_rpm <= speed);
        let low = upper.checked_sub(1).and_then(|i| self.points.get(i));
        let high = self.points.get(upper);

        match (low, high) {
            (Some(low), Some(high)) => {
                let fraction = (speed - low.speed_rpm) / (high.speed_rpm - low.speed_rpm);
                low.torque_nm + fraction * (high.torque_nm - low.torque_nm)
            }
            (Some(last), None) => last.torque_nm,
            (None, Some(first)) => first.torque_nm,
            (None, None) => 0.0,
        }
    }

    /// Torque available at standstill.
    pub fn stall_torque(&self) -> f64 {
        self.max_torque(0.0)
    }

    /// Breakpoints of the envelope.
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Check that torque never rises with speed.
    ///
    /// Physical DC motor envelopes are non-increasing; a rising segment usually
    /// means swapped columns in a datasheet transcription.
    pub fn is_non_increasing(&self) -> bool {
        self.points
            .windows(2)
            .all(|pair| match pair {
                [a, b] => b.torque_nm <= a.torque_nm,
                _ => true,
            })
    }
}

impl TryFrom<Vec<CurvePoint>> for TorqueSpeedCurve {
    type Error = CurveError;

    fn try_from(points: Vec<CurvePoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<TorqueSpeedCurve> for Vec<CurvePoint> {
    fn from(curve: TorqueSpeedCurve) -> Self {
        curve.points
    }
}

fn check_coordinate(index: usize, coordinate: &'static str, value: f64) -> Result<(), CurveError> {
    if !value.is_finite() {
        return Err(CurveError::NonFinite {
            index,
            coordinate,
            value,
        });
    }
    if value < 0.0 {
        return Err(CurveError::Negative {
            index,
            coordinate,
            value,
        });
    }
    Ok(())
}
