//! Object matcher.

use crate::dispatch::dispatch;
use crate::error::MatchError;
use crate::value::{ExpectedValue, MatchMode};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Compare an expected mapping against an actual value.
///
/// A non-object actual yields one `WrongType`. In exact mode the field count
/// is checked first, then the sorted key sets; either mismatch yields a single
/// error and no recursion. Otherwise every expected key is visited in order.
pub fn match_object(
    path: &str,
    expected: &IndexMap<String, ExpectedValue>,
    actual: Option<&Value>,
    mode: MatchMode,
) -> Vec<MatchError> {
    let fields = match actual {
        Some(Value::Object(fields)) => fields,
        other => return vec![wrong_shape(path, expected, other)],
    };

    if mode.is_exact() {
        if let Some(err) = check_exact_keys(path, expected, fields) {
            return vec![err];
        }
    }

    expected
        .iter()
        .flat_map(|(key, value)| dispatch(&format!("{path}.{key}"), value, fields.get(key), mode))
        .collect()
}

fn check_exact_keys(
    path: &str,
    expected: &IndexMap<String, ExpectedValue>,
    actual: &Map<String, Value>,
) -> Option<MatchError> {
    if actual.len() != expected.len() {
        return Some(MatchError::wrong_field_count(
            path,
            expected.len(),
            actual.len(),
        ));
    }

    let mut expected_keys: Vec<&str> = expected.keys().map(String::as_str).collect();
    let mut actual_keys: Vec<&str> = actual.keys().map(String::as_str).collect();
    expected_keys.sort_unstable();
    actual_keys.sort_unstable();

    expected_keys
        .iter()
        .zip(&actual_keys)
        .find(|(e, a)| e != a)
        .map(|(e, a)| MatchError::wrong_key(path, e, a))
}

fn wrong_shape(
    path: &str,
    expected: &IndexMap<String, ExpectedValue>,
    actual: Option<&Value>,
) -> MatchError {
    let repr = Value::Object(
        expected
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect(),
    );
    MatchError::wrong_type(path, "object", repr.to_string(), actual)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn fields(value: Value) -> IndexMap<String, ExpectedValue> {
        match ExpectedValue::from(value) {
            ExpectedValue::Object(fields) => fields,
            other => panic!("not an object: {other:?}"),
        }
    }

    #[test]
    fn test_subset_ignores_extra_fields() {
        let expected = fields(json!({"a": 1}));
        let actual = json!({"a": 1, "b": 2});
        assert!(match_object("", &expected, Some(&actual), MatchMode::Subset).is_empty());
    }

    #[test]
    fn test_exact_field_count_is_single_error() {
        let expected = fields(json!({"a": 1}));
        let actual = json!({"a": 2, "b": 2, "c": 3});
        let errors = match_object("", &expected, Some(&actual), MatchMode::Exact);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::WrongFieldCount);
        assert_eq!(errors[0].message(), "expected 1 fields, got 3");
    }

    #[test]
    fn test_exact_reports_first_sorted_key_mismatch() {
        let expected = fields(json!({"b": 1, "a": 1}));
        let actual = json!({"a": 1, "c": 1});
        let errors = match_object(".o", &expected, Some(&actual), MatchMode::Exact);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::WrongKey);
        assert_eq!(errors[0].message(), r#".o: expected key "b", got "c""#);
    }

    #[test]
    fn test_every_field_is_visited() {
        let expected = fields(json!({"a": 1, "b": "x", "c": true}));
        let actual = json!({"a": 2, "b": "y", "c": true});
        let errors = match_object("", &expected, Some(&actual), MatchMode::Subset);
        let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec![".a", ".b"]);
    }

    #[test]
    fn test_missing_field_in_subset_mode() {
        let expected = fields(json!({"a": 1, "b": {"c": 1}}));
        let actual = json!({"a": 1});
        let errors = match_object("", &expected, Some(&actual), MatchMode::Subset);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::WrongType);
        assert_eq!(errors[0].message(), ".b: expected object, got nothing");
    }

    #[test]
    fn test_wrong_shape_does_not_recurse() {
        let expected = fields(json!({"a": 1, "b": 2}));
        let errors = match_object(".x", &expected, Some(&json!([1, 2])), MatchMode::Subset);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message(), r#".x: expected type "object", got "array""#);
        assert_eq!(errors[0].expected.as_deref(), Some(r#"{"a":1,"b":2}"#));
    }
}
