//! Capturing matched values into caller-owned storage.
//!
//! Binding is the only part of the engine with side effects. It is kept behind
//! the [`BindTarget`] trait: the dispatcher hands the actual value to the target
//! and turns any refusal into a `BindFailed` error.

use crate::error::MatchError;
use crate::value::actual_type_name;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::trace;

/// Reasons a value could not be bound.
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    /// A scalar actual value does not fit the target type.
    #[error("expected to bind {target}, found {found}")]
    WrongKind { target: String, found: &'static str },

    /// Serializing or deserializing a composite value failed.
    #[error("failed to bind {found} to {target}: {source}")]
    Convert {
        target: String,
        found: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// There was no actual value at this position.
    #[error("expected to bind {target}, got nothing")]
    Missing { target: String },
}

/// Something that can receive an actual value.
pub trait BindTarget: Send + Sync {
    /// Store `value`, or explain why it cannot be stored.
    ///
    /// On error the target must be left unchanged.
    fn receive(&self, value: &Value) -> Result<(), BindError>;

    /// Name of the stored type, for diagnostics.
    fn target_type(&self) -> String;
}

/// Shared, thread-safe slot that a [`Bind`] leaf writes into.
///
/// Clones share the same slot, so the caller keeps one clone and places another
/// in the expected tree.
pub struct Binding<T> {
    slot: Arc<Mutex<Option<T>>>,
}

impl<T> Binding<T> {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Whether a value has been bound.
    pub fn is_bound(&self) -> bool {
        self.slot.lock().is_some()
    }

    /// Take the bound value out, leaving the slot empty.
    pub fn take(&self) -> Option<T> {
        self.slot.lock().take()
    }

    /// Set the slot directly.
    pub fn set(&self, value: T) {
        *self.slot.lock() = Some(value);
    }
}

impl<T: Clone> Binding<T> {
    /// Copy of the bound value.
    pub fn get(&self) -> Option<T> {
        self.slot.lock().clone()
    }
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Default for Binding<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("value", &*self.slot.lock())
            .finish()
    }
}

impl<T> BindTarget for Binding<T>
where
    T: DeserializeOwned + Send,
{
    fn receive(&self, value: &Value) -> Result<(), BindError> {
        let found = actual_type_name(Some(value));
        let bound = match value {
            // Composite values take a full serialize/deserialize round trip.
            Value::Object(_) | Value::Array(_) => {
                let convert = |source| BindError::Convert {
                    target: self.target_type(),
                    found,
                    source,
                };
                let bytes = serde_json::to_vec(value).map_err(convert)?;
                serde_json::from_slice::<T>(&bytes).map_err(convert)?
            }
            scalar => {
                serde_json::from_value::<T>(scalar.clone()).map_err(|_| BindError::WrongKind {
                    target: self.target_type(),
                    found,
                })?
            }
        };
        *self.slot.lock() = Some(bound);
        trace!("bound {} into {}", found, self.target_type());
        Ok(())
    }

    fn target_type(&self) -> String {
        short_type_name::<T>()
    }
}

/// Expected leaf that copies the actual value into a [`BindTarget`].
#[derive(Clone)]
pub struct Bind {
    target: Arc<dyn BindTarget>,
}

impl Bind {
    /// Bind into a shared [`Binding`] slot.
    pub fn to<T>(binding: &Binding<T>) -> Self
    where
        T: DeserializeOwned + Send + 'static,
    {
        Self::new(binding.clone())
    }

    /// Bind into any custom target.
    pub fn new(target: impl BindTarget + 'static) -> Self {
        Self {
            target: Arc::new(target),
        }
    }

    pub(crate) fn evaluate(&self, path: &str, actual: Option<&Value>) -> Option<MatchError> {
        let result = match actual {
            Some(value) => self.target.receive(value),
            None => Err(BindError::Missing {
                target: self.target.target_type(),
            }),
        };
        result
            .err()
            .map(|e| MatchError::bind_failed(path, e, actual))
    }
}

impl fmt::Debug for Bind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bind(<{}>)", self.target.target_type())
    }
}

/// Marker target that accepts any value of type `T` and discards it.
///
/// Useful to assert that a field deserializes into `T` without keeping it.
pub struct Conforms<T>(PhantomData<fn() -> T>);

impl<T> Conforms<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Conforms<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BindTarget for Conforms<T>
where
    T: DeserializeOwned,
{
    fn receive(&self, value: &Value) -> Result<(), BindError> {
        serde_json::from_value::<T>(value.clone())
            .map(drop)
            .map_err(|source| BindError::Convert {
                target: self.target_type(),
                found: actual_type_name(Some(value)),
                source,
            })
    }

    fn target_type(&self) -> String {
        short_type_name::<T>()
    }
}

fn is_path_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == ':'
}

/// `alloc::vec::Vec<alloc::string::String>` -> `Vec<String>`
fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let mut out = String::with_capacity(full.len());
    for piece in full.split_inclusive(|c: char| !is_path_char(c)) {
        let (path, tail) = match piece.char_indices().last() {
            Some((idx, c)) if !is_path_char(c) => piece.split_at(idx),
            _ => (piece, ""),
        };
        out.push_str(path.rsplit("::").next().unwrap_or(path));
        out.push_str(tail);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde::Deserialize;
    use serde_json::json;
    use std::collections::HashMap;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct User {
        id: u64,
        name: String,
    }

    #[test]
    fn test_bind_string() {
        let name = Binding::<String>::new();
        let bind = Bind::to(&name);

        assert!(bind.evaluate(".name", Some(&json!("alice"))).is_none());
        assert_eq!(name.get().as_deref(), Some("alice"));
    }

    #[test]
    fn test_bind_wrong_kind_leaves_target_unchanged() {
        let name = Binding::<String>::new();
        name.set("before".to_string());
        let bind = Bind::to(&name);

        let err = bind.evaluate(".name", Some(&json!({"a": 1}))).unwrap();
        assert_eq!(err.kind, ErrorKind::BindFailed);
        assert!(err.message().starts_with(".name: bind failed: failed to bind object to String"));
        assert_eq!(name.get().as_deref(), Some("before"));

        let err = bind.evaluate(".name", Some(&json!(12))).unwrap();
        assert_eq!(err.detail, "bind failed: expected to bind String, found number");
        assert_eq!(name.get().as_deref(), Some("before"));
    }

    #[test]
    fn test_bind_scalars() {
        let count = Binding::<i64>::new();
        assert!(Bind::to(&count).evaluate("", Some(&json!(42))).is_none());
        assert_eq!(count.get(), Some(42));

        let ratio = Binding::<f64>::new();
        assert!(Bind::to(&ratio).evaluate("", Some(&json!(42))).is_none());
        assert_eq!(ratio.get(), Some(42.0));

        let flag = Binding::<bool>::new();
        assert!(Bind::to(&flag).evaluate("", Some(&json!("true"))).is_some());
        assert!(!flag.is_bound());
    }

    #[test]
    fn test_bind_composites() {
        let user = Binding::<User>::new();
        let value = json!({"id": 7, "name": "bob"});
        assert!(Bind::to(&user).evaluate("", Some(&value)).is_none());
        assert_eq!(
            user.take(),
            Some(User {
                id: 7,
                name: "bob".to_string()
            })
        );
        assert!(!user.is_bound());

        let tags = Binding::<Vec<String>>::new();
        assert!(Bind::to(&tags).evaluate("", Some(&json!(["a", "b"]))).is_none());
        assert_eq!(tags.get(), Some(vec!["a".to_string(), "b".to_string()]));

        let map = Binding::<HashMap<String, i32>>::new();
        let err = Bind::to(&map)
            .evaluate(".m", Some(&json!({"a": "x"})))
            .unwrap();
        assert_eq!(err.kind, ErrorKind::BindFailed);
        assert!(!map.is_bound());
    }

    #[test]
    fn test_bind_missing_value() {
        let name = Binding::<String>::new();
        let err = Bind::to(&name).evaluate(".gone", None).unwrap();
        assert_eq!(
            err.message(),
            ".gone: bind failed: expected to bind String, got nothing"
        );
    }

    #[test]
    fn test_conforms_target() {
        let bind = Bind::new(Conforms::<User>::new());
        assert!(bind
            .evaluate("", Some(&json!({"id": 1, "name": "x", "extra": true})))
            .is_none());
        assert!(bind.evaluate("", Some(&json!({"id": "1"}))).is_some());
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name::<String>(), "String");
        assert_eq!(short_type_name::<Vec<String>>(), "Vec<String>");
        assert_eq!(
            short_type_name::<HashMap<String, i32>>(),
            "HashMap<String, i32>"
        );
        assert_eq!(format!("{:?}", Bind::to(&Binding::<u8>::new())), "Bind(<u8>)");
    }
}
