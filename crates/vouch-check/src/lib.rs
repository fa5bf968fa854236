//! Checking recorded HTTP responses against expectation files.
//!
//! This library loads declarative expectations (status, headers, body and
//! match mode) from JSON or YAML and verifies responses with the Vouch
//! matching engine. It can be used as a standalone library or through the
//! `vouch` CLI binary.
//!
//! # Example
//!
//! ```no_run
//! use vouch::{HeaderSet, Response};
//! use vouch_check::{check_files, CheckOptions};
//! use std::path::Path;
//!
//! let headers = HeaderSet::new().with("Content-Type", "application/json");
//! let report = check_files(
//!     Path::new("expect/get-user.yaml"),
//!     Path::new("recorded/get-user.json"),
//!     200,
//!     headers,
//!     &CheckOptions::default(),
//! )?;
//!
//! if !report.passed() {
//!     for error in &report.errors {
//!         eprintln!("{error}");
//!     }
//! }
//! # Ok::<(), vouch_check::LoadError>(())
//! ```

mod loader;
mod types;

use std::path::Path;
use tracing::debug;
use vouch::{Expectation, HeaderSet, Response};

// Re-export public types
pub use loader::{
    load_body, load_expectation, parse_expectation, ExpectationFile, Format, HeaderValues,
    LoadError,
};
pub use types::{CheckOptions, CheckReport};

/// Verify a response against an expectation, applying option overrides.
pub fn check_response(
    expectation: &Expectation,
    response: &Response,
    options: &CheckOptions,
) -> CheckReport {
    let mut expectation = expectation.clone();
    if let Some(mode) = options.mode {
        expectation.mode = mode;
    }
    if let Some(root) = &options.root {
        expectation.root = root.clone();
    }
    if options.ignore_status {
        expectation.status = None;
    }

    let mut report = CheckReport::new(expectation.mode);
    report.extend(expectation.verify(response));
    debug!(
        "checked response (status {}): {} error(s)",
        response.status,
        report.errors.len()
    );
    report
}

/// Load an expectation file and a recorded body, then verify them.
///
/// `status` and `headers` describe the rest of the recorded response.
pub fn check_files(
    expect_path: &Path,
    body_path: &Path,
    status: u16,
    headers: HeaderSet,
    options: &CheckOptions,
) -> Result<CheckReport, LoadError> {
    let expectation = load_expectation(expect_path)?;
    let body = load_body(body_path)?;
    let response = Response {
        status,
        headers,
        body,
    };
    Ok(check_response(&expectation, &response, options))
}
