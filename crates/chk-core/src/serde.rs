//! Reading case files and policies, writing assertion reports.
//!
//! Reports and `chk version --long` output are written as canonical JSON:
//! object keys sorted at every depth and no insignificant whitespace, so the
//! same report always produces the same bytes and the same content hash.
//! Input documents are JSON or YAML, chosen by file extension.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::errors::{ChkError, ErrorInfo};

fn serde_error(code: &str, err: impl ToString) -> ChkError {
    ChkError::Serde(ErrorInfo::new(code, err.to_string()))
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, sort_keys(value)))
                .collect::<BTreeMap<_, _>>()
                .into_iter()
                .collect::<Map<_, _>>(),
        ),
        Value::Array(values) => Value::Array(values.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Serializes `value` as canonical JSON.
///
/// Fails with a `Serde` error for values JSON cannot hold, such as maps
/// with non-string keys.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, ChkError> {
    let value = serde_json::to_value(value).map_err(|err| serde_error("json_serialize", err))?;
    serde_json::to_vec(&sort_keys(value)).map_err(|err| serde_error("json_write", err))
}

/// Parses a JSON document, e.g. a stored report.
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, ChkError> {
    serde_json::from_slice(data).map_err(|err| serde_error("json_deserialize", err))
}

/// Parses a YAML document. YAML 1.2 accepts JSON text as well.
pub fn from_yaml_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, ChkError> {
    serde_yaml::from_slice(data).map_err(|err| serde_error("yaml_deserialize", err))
}

/// Syntax of an input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `.json` files.
    Json,
    /// Everything else.
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from the extension of `path`, ignoring case.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }

    /// Parses `data` in this format.
    pub fn parse<T: DeserializeOwned>(self, data: &[u8]) -> Result<T, ChkError> {
        match self {
            DocumentFormat::Json => from_json_slice(data),
            DocumentFormat::Yaml => from_yaml_slice(data),
        }
    }
}

/// Reads and parses the document at `path`.
///
/// A missing or unreadable file is an `Io` error. A document that does not
/// parse into `T` is a `Config` error carrying the path.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, ChkError> {
    let bytes = fs::read(path).map_err(|err| ChkError::io(path, err))?;
    DocumentFormat::from_path(path)
        .parse(&bytes)
        .map_err(|err| match err {
            ChkError::Serde(info) => {
                ChkError::Config(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
}
