//! Errors raised while asserting, loading case files and policies, and
//! writing reports.
//!
//! Every family carries an [`ErrorInfo`] whose `code` is stable across
//! releases (`assertion-failed`, `check-order`, `io`, `yaml_deserialize`, ...)
//! and whose `context` names the offending path, location or case.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Code, message and context of a [`ChkError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable code, e.g. `assertion-failed`.
    pub code: String,
    /// For assertions, `"<label>: <location>"`.
    pub message: String,
    /// `path`, `location`, `expression` and similar, sorted by key.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// What the author of a case file or policy should change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload without context or hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds or replaces a context entry.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets the hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Error returned by every fallible chk operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum ChkError {
    /// A hard assertion failed and was propagated.
    #[error("assertion error: {0}")]
    Assertion(ErrorInfo),
    /// Invalid policy or case file contents.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
    /// Filesystem errors.
    #[error("io error: {0}")]
    Io(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl ChkError {
    /// Payload of any family.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            ChkError::Assertion(info)
            | ChkError::Config(info)
            | ChkError::Serde(info)
            | ChkError::Io(info) => info,
        }
    }

    /// Wraps an I/O failure on `path`.
    pub fn io(path: impl AsRef<std::path::Path>, err: std::io::Error) -> Self {
        ChkError::Io(
            ErrorInfo::new("io", err.to_string())
                .with_context("path", path.as_ref().display().to_string()),
        )
    }

    /// Attaches `hint` to a `Config` error; other families are returned unchanged.
    pub fn with_config_hint(self, hint: &str) -> Self {
        match self {
            ChkError::Config(info) => ChkError::Config(info.with_hint(hint)),
            other => other,
        }
    }
}
