//! Caller-supplied checks usable as expected leaves.

use crate::error::MatchError;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

type CheckFn = dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync;

static NULL: Value = Value::Null;

/// A dynamic check placed inside an expected tree.
///
/// The check receives the actual value at its position; a missing value is
/// presented as JSON `null`. Any failure becomes a single `PredicateFailed`
/// error carrying the field path.
#[derive(Clone)]
pub struct Predicate {
    check: Arc<CheckFn>,
}

impl Predicate {
    /// Wrap an error-returning check.
    pub fn new<F, E>(check: F) -> Self
    where
        F: Fn(&Value) -> Result<(), E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        Self::with_path(move |_: &str, actual: &Value| check(actual))
    }

    /// Wrap a boolean check.
    pub fn test<F>(check: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(move |_: &str, actual: &Value| {
                if check(actual) {
                    Ok(())
                } else {
                    Err(format!("did not satisfy predicate, got {actual}"))
                }
            }),
        }
    }

    /// Wrap an error-returning check that also receives the field path.
    pub fn with_path<F, E>(check: F) -> Self
    where
        F: Fn(&str, &Value) -> Result<(), E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        Self {
            check: Arc::new(move |path: &str, actual: &Value| {
                check(path, actual).map_err(|e| format!("predicate failed: {e}"))
            }),
        }
    }

    /// Run the check at `path`.
    pub(crate) fn evaluate(&self, path: &str, actual: Option<&Value>) -> Option<MatchError> {
        (self.check)(path, actual.unwrap_or(&NULL))
            .err()
            .map(|reason| MatchError::predicate_failed(path, reason, actual))
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(<fn>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_error_returning_predicate() {
        let positive = Predicate::new(|v: &Value| match v.as_f64() {
            Some(n) if n > 0.0 => Ok(()),
            _ => Err(format!("{v} is not positive")),
        });

        assert!(positive.evaluate(".n", Some(&json!(3))).is_none());

        let err = positive.evaluate(".n", Some(&json!(-1))).unwrap();
        assert_eq!(err.kind, ErrorKind::PredicateFailed);
        assert_eq!(err.message(), ".n: predicate failed: -1 is not positive");
    }

    #[test]
    fn test_boolean_predicate() {
        let is_string = Predicate::test(Value::is_string);
        assert!(is_string.evaluate("", Some(&json!("x"))).is_none());

        let err = is_string.evaluate(".id", Some(&json!(7))).unwrap();
        assert_eq!(err.message(), ".id: did not satisfy predicate, got 7");
    }

    #[test]
    fn test_path_aware_predicate_sees_path() {
        let named = Predicate::with_path(|path: &str, _: &Value| {
            if path.ends_with(".id") {
                Ok(())
            } else {
                Err(format!("unexpected field {path}"))
            }
        });
        assert!(named.evaluate(".user.id", Some(&json!(1))).is_none());
        assert_eq!(
            named.evaluate(".user.name", Some(&json!(1))).unwrap().message(),
            ".user.name: predicate failed: unexpected field .user.name"
        );
    }

    #[test]
    fn test_missing_value_is_presented_as_null() {
        let is_null = Predicate::test(Value::is_null);
        assert!(is_null.evaluate(".gone", None).is_none());
    }
}
