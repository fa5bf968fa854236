//! Scalar matchers for strings, numbers and booleans.

use crate::error::MatchError;
use serde_json::{Number, Value};

/// Compare an expected string against an actual value.
pub fn match_string(path: &str, expected: &str, actual: Option<&Value>) -> Option<MatchError> {
    let expected_repr = || Value::from(expected).to_string();
    match actual {
        Some(Value::String(s)) if s == expected => None,
        Some(value @ Value::String(_)) => Some(MatchError::wrong_value(path, expected_repr(), value)),
        other => Some(MatchError::wrong_type(path, "string", expected_repr(), other)),
    }
}

/// Compare an expected number against an actual value.
///
/// Two integers compare exactly. Otherwise both sides are compared as `f64`,
/// so an integer `43` equals a decoded `43.0`.
pub fn match_number(path: &str, expected: &Number, actual: Option<&Value>) -> Option<MatchError> {
    match actual {
        Some(value @ Value::Number(n)) => {
            if numbers_equal(expected, n) {
                None
            } else {
                Some(MatchError::wrong_value(path, expected.to_string(), value))
            }
        }
        other => Some(MatchError::wrong_type(path, "number", expected.to_string(), other)),
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    if !a.is_f64() && !b.is_f64() {
        // A negative integer against one above i64::MAX.
        return false;
    }
    a.as_f64() == b.as_f64()
}

/// Compare an expected boolean against an actual value.
pub fn match_bool(path: &str, expected: bool, actual: Option<&Value>) -> Option<MatchError> {
    match actual {
        Some(Value::Bool(b)) if *b == expected => None,
        Some(value @ Value::Bool(_)) => {
            Some(MatchError::wrong_value(path, expected.to_string(), value))
        }
        other => Some(MatchError::wrong_type(path, "bool", expected.to_string(), other)),
    }
}
