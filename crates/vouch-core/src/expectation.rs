//! Expectations for a whole response: status, headers and body together.

use crate::dispatch::match_value;
use crate::error::MatchError;
use crate::header::{match_headers, HeaderSet};
use crate::status::match_status;
use crate::value::{ExpectedValue, MatchMode};
use serde_json::Value;

/// A decoded response as handed over by the HTTP layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    pub status: u16,
    pub headers: HeaderSet,
    pub body: Value,
}

impl Response {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// Build a response from a raw payload, see [`decode_body`].
    pub fn from_parts(status: u16, headers: HeaderSet, payload: &[u8]) -> Self {
        Self {
            status,
            headers,
            body: decode_body(payload),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }
}

/// Decode a response payload into a value tree.
///
/// Valid JSON decodes as JSON. Anything else becomes a string, so a plain-text
/// body can be compared against an expected string. An empty payload is `null`.
pub fn decode_body(payload: &[u8]) -> Value {
    if payload.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(payload)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(payload).into_owned()))
}

/// Everything expected of one response.
///
/// Unset parts are not checked.
#[derive(Debug, Clone, Default)]
pub struct Expectation {
    pub status: Option<u16>,
    pub headers: HeaderSet,
    pub body: Option<ExpectedValue>,
    pub mode: MatchMode,
    /// Root of reported body field paths.
    pub root: String,
}

impl Expectation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Expect a body in subset mode.
    pub fn body(mut self, body: impl Into<ExpectedValue>) -> Self {
        self.body = Some(body.into());
        self.mode = MatchMode::Subset;
        self
    }

    /// Expect a body in exact mode.
    pub fn exact_body(mut self, body: impl Into<ExpectedValue>) -> Self {
        self.body = Some(body.into());
        self.mode = MatchMode::Exact;
        self
    }

    pub fn mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    /// Check `response`, returning status, header and body errors in that order.
    pub fn verify(&self, response: &Response) -> Vec<MatchError> {
        let mut errors: Vec<MatchError> = self
            .status
            .and_then(|status| match_status(status, response.status))
            .into_iter()
            .collect();

        errors.extend(match_headers(&self.headers, &response.headers));

        if let Some(body) = &self.body {
            errors.extend(match_value(&self.root, body, &response.body, self.mode));
        }

        errors
    }
}
