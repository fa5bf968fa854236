//! Array matcher.

use crate::dispatch::dispatch;
use crate::error::MatchError;
use crate::value::{ExpectedValue, MatchMode};
use serde_json::Value;

/// Compare an expected sequence against an actual value.
///
/// Only the first `expected.len()` actual elements are examined. In exact
/// mode a length difference is a single error. A shorter actual array in
/// subset mode reports each missing index as "got nothing".
pub fn match_array(
    path: &str,
    expected: &[ExpectedValue],
    actual: Option<&Value>,
    mode: MatchMode,
) -> Vec<MatchError> {
    let elements = match actual {
        Some(Value::Array(elements)) => elements,
        other => {
            let repr = Value::Array(expected.iter().map(ExpectedValue::to_json).collect());
            return vec![MatchError::wrong_type(path, "array", repr.to_string(), other)];
        }
    };

    if mode.is_exact() && elements.len() != expected.len() {
        return vec![MatchError::wrong_element_count(
            path,
            expected.len(),
            elements.len(),
        )];
    }

    expected
        .iter()
        .enumerate()
        .flat_map(|(i, value)| dispatch(&format!("{path}[{i}]"), value, elements.get(i), mode))
        .collect()
}
