//! Header multiset matching.
//!
//! Header names are case-insensitive. Values for one name form a multiset:
//! order is irrelevant, duplicates count.

use crate::error::MatchError;
use indexmap::IndexMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
struct HeaderEntry {
    /// Name as first inserted, for display.
    name: String,
    values: Vec<String>,
}

/// Case-insensitive header name to ordered list of values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    /// Keyed by lowercased name.
    entries: IndexMap<String, HeaderEntry>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under `name`, keeping earlier values.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entry(name.into()).values.push(value.into());
    }

    /// Record `name` without adding a value.
    ///
    /// In an expected set this asks only for the header to be present.
    pub fn insert_name(&mut self, name: impl Into<String>) {
        self.entry(name.into());
    }

    /// Builder form of [`insert_name`](Self::insert_name).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.insert_name(name);
        self
    }

    fn entry(&mut self, name: String) -> &mut HeaderEntry {
        self.entries
            .entry(name.to_lowercase())
            .or_insert_with(|| HeaderEntry {
                name,
                values: Vec::new(),
            })
    }

    /// Builder form of [`append`](Self::append).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(name, value);
        self
    }

    /// Values for `name`, looked up case-insensitively.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .get(&name.to_lowercase())
            .map(|entry| entry.values.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_lowercase())
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(display name, values)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .values()
            .map(|entry| (entry.name.as_str(), entry.values.as_slice()))
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for HeaderSet {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut headers = HeaderSet::new();
        for (name, value) in iter {
            headers.append(name, value);
        }
        headers
    }
}

impl From<&http::HeaderMap> for HeaderSet {
    fn from(map: &http::HeaderMap) -> Self {
        map.iter()
            .map(|(name, value)| {
                let value = match value.to_str() {
                    Ok(s) => s.to_string(),
                    Err(_) => String::from_utf8_lossy(value.as_bytes()).into_owned(),
                };
                (name.as_str().to_string(), value)
            })
            .collect()
    }
}

/// Compare expected headers against actual headers.
///
/// Each expected name must be present. Each expected value must be matched by
/// a distinct actual value: a matched actual value is consumed, so expecting
/// `a` twice needs two `a` values. Names present only in `actual` are ignored.
pub fn match_headers(expected: &HeaderSet, actual: &HeaderSet) -> Vec<MatchError> {
    let mut errors = Vec::new();

    for (name, expected_values) in expected.iter() {
        let Some(actual_values) = actual.get(name) else {
            errors.push(MatchError::missing_header(name));
            continue;
        };

        let mut consumed = vec![false; actual_values.len()];
        for expected_value in expected_values {
            let slot = actual_values
                .iter()
                .enumerate()
                .position(|(i, v)| !consumed[i] && v == expected_value);
            match slot {
                Some(i) => consumed[i] = true,
                None => {
                    let occurrences = expected_values
                        .iter()
                        .filter(|v| *v == expected_value)
                        .count();
                    errors.push(MatchError::header_value_mismatch(
                        name,
                        expected_value,
                        occurrences,
                        actual_values,
                    ));
                }
            }
        }
    }

    debug!(
        "compared {} expected header(s): {} error(s)",
        expected.len(),
        errors.len()
    );
    errors
}
