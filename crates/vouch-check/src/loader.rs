//! Loading expectation files and recorded response bodies.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::trace;
use vouch::{decode_body, Expectation, ExpectedValue, HeaderSet, MatchMode};

/// Errors raised while loading files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON expectation: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML expectation: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unknown expectation format for {} (use .json, .yaml or .yml)", .0.display())]
    UnknownFormat(PathBuf),
}

/// Serialization format of an expectation document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }
}

/// One header value or several.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum HeaderValues {
    One(String),
    Many(Vec<String>),
}

impl HeaderValues {
    fn into_vec(self) -> Vec<String> {
        match self {
            HeaderValues::One(value) => vec![value],
            HeaderValues::Many(values) => values,
        }
    }
}

/// Declarative expectation document.
///
/// ```yaml
/// status: 200
/// headers:
///   Content-Type: application/json
///   Vary: [Accept, Origin]
/// mode: exact
/// body:
///   id: 1
///   tags: [a, b]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ExpectationFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, HeaderValues>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,

    pub mode: MatchMode,

    /// Root of reported body field paths.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub root: String,
}

impl From<ExpectationFile> for Expectation {
    fn from(file: ExpectationFile) -> Self {
        let mut headers = HeaderSet::new();
        for (name, values) in file.headers {
            // An empty list only asks for the header to be present.
            headers.insert_name(name.as_str());
            for value in values.into_vec() {
                headers.append(name.as_str(), value);
            }
        }

        Expectation {
            status: file.status,
            headers,
            body: file.body.map(ExpectedValue::from),
            mode: file.mode,
            root: file.root,
        }
    }
}

/// Parse an expectation document.
pub fn parse_expectation(content: &str, format: Format) -> Result<Expectation, LoadError> {
    let file: ExpectationFile = match format {
        Format::Json => serde_json::from_str(content)?,
        Format::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(file.into())
}

/// Load an expectation file; the format follows the file extension.
pub fn load_expectation(path: &Path) -> Result<Expectation, LoadError> {
    let format =
        Format::from_path(path).ok_or_else(|| LoadError::UnknownFormat(path.to_path_buf()))?;
    let content = std::fs::read_to_string(path).map_err(|source| io_error(path, source))?;
    trace!("loaded expectation from {}", path.display());
    parse_expectation(&content, format)
}

/// Load a recorded response body, see [`decode_body`].
pub fn load_body(path: &Path) -> Result<Value, LoadError> {
    let content = read(path)?;
    trace!("loaded {} byte body from {}", content.len(), path.display());
    Ok(decode_body(&content))
}

fn read(path: &Path) -> Result<Vec<u8>, LoadError> {
    std::fs::read(path).map_err(|source| io_error(path, source))
}

fn io_error(path: &Path, source: std::io::Error) -> LoadError {
    LoadError::Io {
        path: path.to_path_buf(),
        source,
    }
}
