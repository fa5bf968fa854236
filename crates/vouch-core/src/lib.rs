//! Structural expectation matching for decoded HTTP responses.
//!
//! Given an expected pattern and an actual decoded value, the engine reports
//! every mismatch with the path of the field it was found at. Patterns can mix
//! literal values with caller checks ([`Predicate`]) and captures ([`Bind`]).
//!
//! # Module Structure
//!
//! - `value` - Expected value tree and match modes
//! - `dispatch` - Entry point routing on the expected variant
//! - `scalar` - String, number and boolean matchers
//! - `object` / `array` - Structural matchers
//! - `predicate` / `bind` - Dynamic leaves
//! - `header` - Header multiset matching
//! - `status` - Status code check
//! - `expectation` - Status, headers and body bundled per response
//! - `error` - Diagnostics and message formatting
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use vouch::{match_value, Bind, Binding, ExpectedValue, MatchMode, Predicate};
//!
//! let id = Binding::<u64>::new();
//! let expected = ExpectedValue::object([
//!     ("id", ExpectedValue::from(Bind::to(&id))),
//!     ("name", ExpectedValue::from("widget")),
//!     ("tags", Predicate::test(|v| v.is_array()).into()),
//! ]);
//!
//! let actual = json!({"id": 17, "name": "widget", "tags": [], "extra": true});
//! let errors = match_value("", &expected, &actual, MatchMode::Subset);
//!
//! assert!(errors.is_empty());
//! assert_eq!(id.get(), Some(17));
//! ```

mod array;
mod bind;
mod dispatch;
mod error;
mod expectation;
mod header;
mod object;
mod predicate;
mod scalar;
mod status;
mod value;

pub use array::match_array;
pub use bind::{Bind, BindError, BindTarget, Binding, Conforms};
pub use dispatch::match_value;
pub use error::{format_message, ErrorKind, MatchError};
pub use expectation::{decode_body, Expectation, Response};
pub use header::{match_headers, HeaderSet};
pub use object::match_object;
pub use predicate::Predicate;
pub use scalar::{match_bool, match_number, match_string};
pub use status::match_status;
pub use value::{actual_type_name, ExpectedValue, MatchMode};
