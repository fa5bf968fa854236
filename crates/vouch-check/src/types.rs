//! Core types for checking responses.

use serde::Serialize;
use std::collections::BTreeMap;
use vouch::{ErrorKind, MatchError, MatchMode};

/// Result of checking one response against one expectation.
#[derive(Debug, Default, Serialize)]
pub struct CheckReport {
    /// All mismatches, in the order they were found.
    pub errors: Vec<MatchError>,
    /// Number of mismatches per kind.
    pub counts: BTreeMap<ErrorKind, usize>,
    /// Mode the body was compared in.
    pub mode: MatchMode,
}

impl CheckReport {
    /// Create a new empty report.
    pub fn new(mode: MatchMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Add a mismatch to the report.
    pub fn add_error(&mut self, error: MatchError) {
        *self.counts.entry(error.kind).or_default() += 1;
        self.errors.push(error);
    }

    /// Add every mismatch from `errors`.
    pub fn extend(&mut self, errors: impl IntoIterator<Item = MatchError>) {
        for error in errors {
            self.add_error(error);
        }
    }

    /// Check if the response satisfied the expectation.
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of mismatches of `kind`.
    pub fn count(&self, kind: ErrorKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }
}

/// Options for checking.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Override the mode declared by the expectation.
    pub mode: Option<MatchMode>,
    /// Override the root of reported field paths.
    pub root: Option<String>,
    /// Skip the status check even when the expectation declares one.
    pub ignore_status: bool,
}
