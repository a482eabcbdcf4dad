//! Assertion macros for control-loop tests.

/// Assert that two floats differ by at most `tolerance`.
///
/// ```rust
/// use axisdrive_test_helpers::assert_approx_eq;
///
/// assert_approx_eq!(90.0, 90.000_001, 1e-3);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr $(,)?) => {
        let left: f64 = $left;
        let right: f64 = $right;
        let tolerance: f64 = $tolerance;
        let diff = (left - right).abs();
        if !(diff <= tolerance) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}`,\n  tolerance: `{:?}`",
                left, right, diff, tolerance
            );
        }
    };
    ($left:expr, $right:expr, $tolerance:expr, $($arg:tt)+) => {
        let left: f64 = $left;
        let right: f64 = $right;
        let tolerance: f64 = $tolerance;
        let diff = (left - right).abs();
        if !(diff <= tolerance) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}`,\n  tolerance: `{:?}`: {}",
                left, right, diff, tolerance, format_args!($($arg)+)
            );
        }
    };
}

/// Assert that a value lies in a range.
///
/// ```rust
/// use axisdrive_test_helpers::assert_in_range;
///
/// assert_in_range!(0.5, -1.0..=1.0);
/// ```
#[macro_export]
macro_rules! assert_in_range {
    ($value:expr, $range:expr $(,)?) => {
        let value = $value;
        let range = $range;
        if !range.contains(&value) {
            panic!("assertion failed: value {:?} is not in range {:?}", value, range);
        }
    };
    ($value:expr, $range:expr, $($arg:tt)+) => {
        let value = $value;
        let range = $range;
        if !range.contains(&value) {
            panic!(
                "assertion failed: value {:?} is not in range {:?}: {}",
                value, range, format_args!($($arg)+)
            );
        }
    };
}

/// Assert that every value yielded by an iterator of `f64` is finite.
///
/// ```rust
/// use axisdrive_test_helpers::assert_all_finite;
///
/// assert_all_finite!([0.0, -1.5, 1e9]);
/// ```
#[macro_export]
macro_rules! assert_all_finite {
    ($values:expr $(,)?) => {
        for (index, value) in ::core::iter::IntoIterator::into_iter($values).enumerate() {
            let value: f64 = value;
            if !value.is_finite() {
                panic!("assertion failed: value at index {} is not finite: {:?}", index, value);
            }
        }
    };
}
