//! Match diagnostics and their message formatting.
//!
//! Every comparator reports findings as [`MatchError`] values. They are plain
//! data: nothing here aborts a comparison.

use crate::value::actual_type_name;
use serde::Serialize;
use serde_json::Value;

/// Category of a mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    WrongType,
    WrongValue,
    WrongFieldCount,
    WrongKey,
    WrongElementCount,
    MissingHeader,
    HeaderValueMismatch,
    PredicateFailed,
    BindFailed,
    UnsupportedType,
    WrongStatus,
}

impl ErrorKind {
    /// Get the label for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::WrongType => "wrong_type",
            ErrorKind::WrongValue => "wrong_value",
            ErrorKind::WrongFieldCount => "wrong_field_count",
            ErrorKind::WrongKey => "wrong_key",
            ErrorKind::WrongElementCount => "wrong_element_count",
            ErrorKind::MissingHeader => "missing_header",
            ErrorKind::HeaderValueMismatch => "header_value_mismatch",
            ErrorKind::PredicateFailed => "predicate_failed",
            ErrorKind::BindFailed => "bind_failed",
            ErrorKind::UnsupportedType => "unsupported_type",
            ErrorKind::WrongStatus => "wrong_status",
        }
    }
}

/// A single mismatch found while comparing expected and actual values.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct MatchError {
    /// Field path (e.g. `.items[2].id`); empty for the root and for header/status errors.
    pub path: String,
    pub kind: ErrorKind,
    /// Rendered expected value, when one applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    /// Actual value seen; `None` when it was missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<Value>,
    /// Message body without the path prefix.
    pub detail: String,
    /// Full rendered message.
    pub message: String,
}

impl MatchError {
    fn new(
        path: &str,
        kind: ErrorKind,
        expected: Option<String>,
        actual: Option<&Value>,
        detail: String,
    ) -> Self {
        Self {
            path: path.to_string(),
            kind,
            expected,
            actual: actual.cloned(),
            message: format_message(path, &detail),
            detail,
        }
    }

    /// The rendered, path-prefixed message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The actual value is of a different shape than expected, or missing.
    pub fn wrong_type(
        path: &str,
        expected_type: &str,
        expected: String,
        actual: Option<&Value>,
    ) -> Self {
        let detail = match actual {
            None => format!("expected {expected_type}, got nothing"),
            Some(value) => format!(
                "expected type \"{expected_type}\", got \"{}\"",
                actual_type_name(Some(value))
            ),
        };
        Self::new(path, ErrorKind::WrongType, Some(expected), actual, detail)
    }

    /// Same shape, different value.
    pub fn wrong_value(path: &str, expected: String, actual: &Value) -> Self {
        let detail = format!("expected {expected}, got {actual}");
        Self::new(path, ErrorKind::WrongValue, Some(expected), Some(actual), detail)
    }

    pub fn wrong_field_count(path: &str, expected: usize, actual: usize) -> Self {
        let detail = format!("expected {expected} fields, got {actual}");
        Self::new(
            path,
            ErrorKind::WrongFieldCount,
            Some(expected.to_string()),
            Some(&Value::from(actual)),
            detail,
        )
    }

    pub fn wrong_key(path: &str, expected: &str, actual: &str) -> Self {
        let detail = format!("expected key {expected:?}, got {actual:?}");
        Self::new(
            path,
            ErrorKind::WrongKey,
            Some(expected.to_string()),
            Some(&Value::from(actual)),
            detail,
        )
    }

    pub fn wrong_element_count(path: &str, expected: usize, actual: usize) -> Self {
        let detail = format!("expected {expected} elements, got {actual}");
        Self::new(
            path,
            ErrorKind::WrongElementCount,
            Some(expected.to_string()),
            Some(&Value::from(actual)),
            detail,
        )
    }

    pub fn missing_header(name: &str) -> Self {
        let detail = format!("expected header {name:?}, got nothing");
        Self::new("", ErrorKind::MissingHeader, Some(name.to_string()), None, detail)
    }

    /// `occurrences` is how many times the value appears in the expected list.
    pub fn header_value_mismatch(
        name: &str,
        expected: &str,
        occurrences: usize,
        actual: &[String],
    ) -> Self {
        let detail = if occurrences > 1 {
            format!(
                "expected header {name:?} to contain {expected:?} {occurrences} times, got {actual:?}"
            )
        } else {
            format!("expected header {name:?} to contain {expected:?}, got {actual:?}")
        };
        let actual = Value::from(actual.to_vec());
        Self::new(
            "",
            ErrorKind::HeaderValueMismatch,
            Some(expected.to_string()),
            Some(&actual),
            detail,
        )
    }

    /// `reason` is the complete description produced by the predicate adapter.
    pub fn predicate_failed(path: &str, reason: String, actual: Option<&Value>) -> Self {
        Self::new(
            path,
            ErrorKind::PredicateFailed,
            Some("<predicate>".to_string()),
            actual,
            reason,
        )
    }

    pub fn bind_failed(path: &str, reason: impl std::fmt::Display, actual: Option<&Value>) -> Self {
        let detail = format!("bind failed: {reason}");
        Self::new(
            path,
            ErrorKind::BindFailed,
            Some("<bind>".to_string()),
            actual,
            detail,
        )
    }

    pub fn unsupported_type(path: &str, expected_type: &str, actual: Option<&Value>) -> Self {
        let detail = format!(
            "unsupported expected value type \"{expected_type}\" (actual is {})",
            actual_type_name(actual)
        );
        Self::new(
            path,
            ErrorKind::UnsupportedType,
            Some(expected_type.to_string()),
            actual,
            detail,
        )
    }

    pub fn wrong_status(expected: u16, actual: u16) -> Self {
        let detail = format!("expected status {expected}, got {actual}");
        Self::new(
            "",
            ErrorKind::WrongStatus,
            Some(expected.to_string()),
            Some(&Value::from(actual)),
            detail,
        )
    }
}

/// Prefix a message body with its field path, when there is one.
pub fn format_message(path: &str, detail: &str) -> String {
    if path.is_empty() {
        detail.to_string()
    } else {
        format!("{path}: {detail}")
    }
}
