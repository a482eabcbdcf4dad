//! Unwrap helpers for tests.
//!
//! Each helper is `#[track_caller]`, so a failure points at the test line
//! rather than at this module.

use std::fmt::Debug;

/// Unwrap a `Result`, panicking with the error value.
///
/// ```rust
/// use axisdrive_test_helpers::must;
///
/// let value: f64 = must("90.0".parse::<f64>());
/// assert!((value - 90.0).abs() < f64::EPSILON);
/// ```
#[track_caller]
pub fn must<T, E: Debug>(result: Result<T, E>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("must: unexpected Err: {e:?}"),
    }
}

/// Unwrap a `Result`, panicking with `context` and the error value.
#[track_caller]
pub fn must_with<T, E: Debug>(result: Result<T, E>, context: &str) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("must_with: {context}: {e:?}"),
    }
}

/// Unwrap an `Option`, panicking with `msg` on `None`.
#[track_caller]
pub fn must_some<T>(option: Option<T>, msg: &str) -> T {
    match option {
        Some(v) => v,
        None => panic!("must_some: {msg}"),
    }
}

/// Unwrap the `Err` side of a `Result`, panicking if it is `Ok`.
///
/// Validation tests use this to inspect the rejected variant.
#[track_caller]
pub fn must_err<T: Debug, E>(result: Result<T, E>) -> E {
    match result {
        Ok(v) => panic!("must_err: expected Err, got Ok({v:?})"),
        Err(e) => e,
    }
}
