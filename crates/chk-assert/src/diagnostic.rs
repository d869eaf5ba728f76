use std::fmt::{self, Display};

use chk_core::CallerLocation;
use serde::{Deserialize, Serialize};

/// Label prefixed to every failure unless a policy overrides it.
pub const DEFAULT_LABEL: &str = "Assertion failed";

/// Which assertion produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssertionKind {
    /// Strict equality between two values.
    Equal,
    /// Truthiness of a single value.
    True,
}

/// How a failed assertion affects control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Reported, execution continues.
    Soft,
    /// Reported and raised as an [`AssertionError`](crate::AssertionError).
    Hard,
}

impl AssertionKind {
    /// Returns the severity of a failure of this kind.
    pub fn severity(self) -> Severity {
        match self {
            AssertionKind::Equal => Severity::Soft,
            AssertionKind::True => Severity::Hard,
        }
    }
}

/// A single failure report delivered to a [`DiagnosticSink`](crate::DiagnosticSink).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Fixed failure label.
    pub label: String,
    /// Assertion that failed.
    pub kind: AssertionKind,
    /// Debug renderings of the offending values, in argument order.
    pub values: Vec<String>,
    /// Source text of the asserted expression, when captured by a macro.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    /// Call site of the assertion.
    pub location: CallerLocation,
}

impl Diagnostic {
    /// Renders the diagnostic as a single line.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.label)?;
        if let Some(expression) = &self.expression {
            write!(f, " `{expression}`")?;
        }
        for value in &self.values {
            write!(f, " {value}")?;
        }
        write!(f, " at {}", self.location)
    }
}
