//! Value dispatcher: the entry point for body comparison.

use crate::array::match_array;
use crate::error::MatchError;
use crate::object::match_object;
use crate::scalar::{match_bool, match_number, match_string};
use crate::value::{ExpectedValue, MatchMode};
use serde_json::Value;
use tracing::debug;

/// Compare `expected` against `actual` and collect every mismatch.
///
/// `path` is the root of every reported field path (usually empty). Errors are
/// returned in traversal order; sibling fields are always all visited.
pub fn match_value(
    path: &str,
    expected: &ExpectedValue,
    actual: &Value,
    mode: MatchMode,
) -> Vec<MatchError> {
    let errors = dispatch(path, expected, Some(actual), mode);
    debug!(
        "compared {} against {} ({} mode): {} error(s)",
        expected.type_name(),
        crate::value::actual_type_name(Some(actual)),
        mode,
        errors.len()
    );
    errors
}

/// Route on the expected variant. `actual` is `None` when the field is missing.
pub(crate) fn dispatch(
    path: &str,
    expected: &ExpectedValue,
    actual: Option<&Value>,
    mode: MatchMode,
) -> Vec<MatchError> {
    let leaf = match expected {
        ExpectedValue::Object(fields) => return match_object(path, fields, actual, mode),
        ExpectedValue::Array(elements) => return match_array(path, elements, actual, mode),
        ExpectedValue::String(s) => match_string(path, s, actual),
        ExpectedValue::Number(n) => match_number(path, n, actual),
        ExpectedValue::Bool(b) => match_bool(path, *b, actual),
        ExpectedValue::Predicate(p) => p.evaluate(path, actual),
        ExpectedValue::Bind(b) => b.evaluate(path, actual),
        ExpectedValue::Null => Some(MatchError::unsupported_type(
            path,
            expected.type_name(),
            actual,
        )),
    };
    leaf.into_iter().collect()
}
