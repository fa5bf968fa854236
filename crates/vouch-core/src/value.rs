//! Expected value tree and match modes.
//!
//! An [`ExpectedValue`] is the pattern side of a comparison. It mixes literal
//! JSON-shaped data with dynamic leaves ([`Predicate`] and [`Bind`]) so a single
//! tree can both check and capture parts of a decoded response.

use crate::bind::Bind;
use crate::predicate::Predicate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// How strictly objects and arrays are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Field counts, key sets and array lengths must equal the expected ones.
    Exact,
    /// Extra object fields and trailing array elements are ignored.
    #[default]
    Subset,
}

impl MatchMode {
    pub fn is_exact(self) -> bool {
        matches!(self, MatchMode::Exact)
    }

    /// Get the label for this mode.
    pub fn label(&self) -> &'static str {
        match self {
            MatchMode::Exact => "exact",
            MatchMode::Subset => "subset",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pattern side of a comparison.
///
/// Objects keep their insertion order, which is also the order fields are
/// visited in and therefore the order errors are reported in.
#[derive(Clone)]
pub enum ExpectedValue {
    /// JSON `null`. No comparator exists for it; matching yields `UnsupportedType`.
    Null,
    Bool(bool),
    /// Integers and floats alike; compared as `f64`.
    Number(Number),
    String(String),
    Object(IndexMap<String, ExpectedValue>),
    Array(Vec<ExpectedValue>),
    /// Caller-supplied check, see [`Predicate`].
    Predicate(Predicate),
    /// Capture into caller-owned storage, see [`Bind`].
    Bind(Bind),
}

impl ExpectedValue {
    /// Build an object from key/value pairs, keeping their order.
    pub fn object<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<ExpectedValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        ExpectedValue::Object(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build an array from elements.
    pub fn array<V, I>(elements: I) -> Self
    where
        V: Into<ExpectedValue>,
        I: IntoIterator<Item = V>,
    {
        ExpectedValue::Array(elements.into_iter().map(Into::into).collect())
    }

    /// Shape name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            ExpectedValue::Null => "null",
            ExpectedValue::Bool(_) => "bool",
            ExpectedValue::Number(_) => "number",
            ExpectedValue::String(_) => "string",
            ExpectedValue::Object(_) => "object",
            ExpectedValue::Array(_) => "array",
            ExpectedValue::Predicate(_) => "predicate",
            ExpectedValue::Bind(_) => "bind",
        }
    }

    /// Whether this is a leaf (anything but an object or array).
    pub fn is_leaf(&self) -> bool {
        !matches!(self, ExpectedValue::Object(_) | ExpectedValue::Array(_))
    }

    /// JSON rendering of the pattern. Dynamic leaves render as placeholder strings.
    pub fn to_json(&self) -> Value {
        match self {
            ExpectedValue::Null => Value::Null,
            ExpectedValue::Bool(b) => Value::Bool(*b),
            ExpectedValue::Number(n) => Value::Number(n.clone()),
            ExpectedValue::String(s) => Value::String(s.clone()),
            ExpectedValue::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            ExpectedValue::Array(elements) => {
                Value::Array(elements.iter().map(ExpectedValue::to_json).collect())
            }
            ExpectedValue::Predicate(_) => Value::String("<predicate>".to_string()),
            ExpectedValue::Bind(_) => Value::String("<bind>".to_string()),
        }
    }

    /// Compact textual representation used in diagnostics.
    pub fn describe(&self) -> String {
        self.to_json().to_string()
    }
}

impl fmt::Debug for ExpectedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedValue::Null => f.write_str("Null"),
            ExpectedValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            ExpectedValue::Number(n) => f.debug_tuple("Number").field(n).finish(),
            ExpectedValue::String(s) => f.debug_tuple("String").field(s).finish(),
            ExpectedValue::Object(fields) => f.debug_tuple("Object").field(fields).finish(),
            ExpectedValue::Array(elements) => f.debug_tuple("Array").field(elements).finish(),
            ExpectedValue::Predicate(p) => fmt::Debug::fmt(p, f),
            ExpectedValue::Bind(b) => fmt::Debug::fmt(b, f),
        }
    }
}

impl fmt::Display for ExpectedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl From<Value> for ExpectedValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ExpectedValue::Null,
            Value::Bool(b) => ExpectedValue::Bool(b),
            Value::Number(n) => ExpectedValue::Number(n),
            Value::String(s) => ExpectedValue::String(s),
            Value::Array(elements) => {
                ExpectedValue::Array(elements.into_iter().map(Into::into).collect())
            }
            Value::Object(fields) => ExpectedValue::Object(
                fields.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

impl From<&Value> for ExpectedValue {
    fn from(value: &Value) -> Self {
        value.clone().into()
    }
}

impl From<bool> for ExpectedValue {
    fn from(b: bool) -> Self {
        ExpectedValue::Bool(b)
    }
}

impl From<&str> for ExpectedValue {
    fn from(s: &str) -> Self {
        ExpectedValue::String(s.to_string())
    }
}

impl From<String> for ExpectedValue {
    fn from(s: String) -> Self {
        ExpectedValue::String(s)
    }
}

macro_rules! from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ExpectedValue {
                fn from(n: $t) -> Self {
                    ExpectedValue::Number(Number::from(n))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for ExpectedValue {
    /// Non-finite floats have no JSON form and become `Null`.
    fn from(n: f64) -> Self {
        Number::from_f64(n)
            .map(ExpectedValue::Number)
            .unwrap_or(ExpectedValue::Null)
    }
}

impl From<f32> for ExpectedValue {
    fn from(n: f32) -> Self {
        f64::from(n).into()
    }
}

impl From<Predicate> for ExpectedValue {
    fn from(p: Predicate) -> Self {
        ExpectedValue::Predicate(p)
    }
}

impl From<Bind> for ExpectedValue {
    fn from(b: Bind) -> Self {
        ExpectedValue::Bind(b)
    }
}

impl<V: Into<ExpectedValue>> From<Vec<V>> for ExpectedValue {
    fn from(elements: Vec<V>) -> Self {
        ExpectedValue::array(elements)
    }
}

impl<V: Into<ExpectedValue>> From<Option<V>> for ExpectedValue {
    fn from(value: Option<V>) -> Self {
        value.map(Into::into).unwrap_or(ExpectedValue::Null)
    }
}

impl<K: Into<String>, V: Into<ExpectedValue>> FromIterator<(K, V)> for ExpectedValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ExpectedValue::object(iter)
    }
}

/// Shape name of an actual value; a missing value is "nothing".
pub fn actual_type_name(actual: Option<&Value>) -> &'static str {
    match actual {
        None => "nothing",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "bool",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}
