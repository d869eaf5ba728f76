use chk_core::errors::{ChkError, ErrorInfo};
use chk_core::CallerLocation;
use thiserror::Error;

use crate::diagnostic::Diagnostic;

/// Raised when a truthiness assertion fails.
///
/// The message is `"<label>: <location>"`, i.e. `"Assertion failed: src/lib.rs:12:5"`
/// with the default label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AssertionError {
    message: String,
    location: CallerLocation,
    expression: Option<String>,
}

impl AssertionError {
    /// Creates an error for a failure at `location`.
    pub fn new(label: &str, location: CallerLocation, expression: Option<String>) -> Self {
        Self {
            message: format!("{label}: {location}"),
            location,
            expression,
        }
    }

    pub(crate) fn from_diagnostic(diagnostic: &Diagnostic) -> Self {
        Self::new(
            &diagnostic.label,
            diagnostic.location.clone(),
            diagnostic.expression.clone(),
        )
    }

    /// Full error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Call site of the failed assertion.
    pub fn location(&self) -> &CallerLocation {
        &self.location
    }

    /// Source text of the asserted expression, if known.
    pub fn expression(&self) -> Option<&str> {
        self.expression.as_deref()
    }
}

impl From<AssertionError> for ChkError {
    fn from(err: AssertionError) -> Self {
        let mut info = ErrorInfo::new("assertion-failed", err.message)
            .with_context("location", err.location.to_string());
        if let Some(expression) = err.expression {
            info = info.with_context("expression", expression);
        }
        ChkError::Assertion(info)
    }
}
