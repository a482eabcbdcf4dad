//! Property-based tests for torque-speed envelope lookup.

use axisdrive_curves::TorqueSpeedCurve;
use quickcheck_macros::quickcheck;

fn sanitize(v: f64, fallback: f64) -> f64 {
    if v.is_finite() { v } else { fallback }
}

#[quickcheck]
fn prop_linear_envelope_stays_within_stall_torque(speed: f64, stall: f64, no_load: f64) -> bool {
    let stall = sanitize(stall, 1.0).abs().min(1.0e3);
    let no_load = sanitize(no_load, 1000.0).abs().clamp(1.0, 1.0e5);
    let speed = sanitize(speed, 0.0);

    match TorqueSpeedCurve::linear(stall, no_load) {
        Ok(curve) => {
            let torque = curve.max_torque(speed);
            torque >= -1e-9 && torque <= stall + 1e-9
        }
        Err(_) => false,
    }
}

#[quickcheck]
fn prop_linear_envelope_is_non_increasing_in_speed(a: f64, b: f64) -> bool {
    let a = sanitize(a, 0.0).abs().min(1.0e4);
    let b = sanitize(b, 0.0).abs().min(1.0e4);
    let (slow, fast) = if a <= b { (a, b) } else { (b, a) };

    match TorqueSpeedCurve::linear(2.0, 5000.0) {
        Ok(curve) => curve.max_torque(fast) <= curve.max_torque(slow) + 1e-12,
        Err(_) => false,
    }
}

#[quickcheck]
fn prop_lookup_is_symmetric_in_direction(speed: f64) -> bool {
    let speed = sanitize(speed, 0.0);
    match TorqueSpeedCurve::from_pairs(&[(0.0, 3.0), (1000.0, 2.0), (4000.0, 0.0)]) {
        Ok(curve) => (curve.max_torque(speed) - curve.max_torque(-speed)).abs() < 1e-12,
        Err(_) => false,
    }
}

mod interpolation {
    use axisdrive_curves::{CurvePoint, TorqueSpeedCurve};
    use proptest::prelude::*;

    fn ascending_points() -> impl Strategy<Value = Vec<CurvePoint>> {
        prop::collection::vec((1.0f64..1000.0, 0.0f64..10.0), 1..8).prop_map(|steps| {
            let mut speed = 0.0;
            steps
                .into_iter()
                .map(|(gap, torque)| {
                    let point = CurvePoint::new(speed, torque);
                    speed += gap;
                    point
                })
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn prop_lookup_stays_within_breakpoint_torques(
            points in ascending_points(),
            speed in -10_000.0f64..10_000.0,
        ) {
            let lowest = points.iter().map(|p| p.torque_nm).fold(f64::INFINITY, f64::min);
            let highest = points.iter().map(|p| p.torque_nm).fold(f64::NEG_INFINITY, f64::max);
            let curve = TorqueSpeedCurve::new(points);
            prop_assert!(curve.is_ok());
            if let Ok(curve) = curve {
                let torque = curve.max_torque(speed);
                prop_assert!(torque >= lowest - 1e-9 && torque <= highest + 1e-9);
            }
        }

        #[test]
        fn prop_lookup_hits_every_breakpoint(points in ascending_points()) {
            let curve = TorqueSpeedCurve::new(points.clone());
            prop_assert!(curve.is_ok());
            if let Ok(curve) = curve {
                for point in &points {
                    prop_assert!((curve.max_torque(point.speed_rpm) - point.torque_nm).abs() < 1e-9);
                }
            }
        }
    }
}
