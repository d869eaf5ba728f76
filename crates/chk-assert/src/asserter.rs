use std::borrow::Cow;
use std::fmt::Debug;

use chk_core::{CallerLocation, Truthy};

use crate::diagnostic::{AssertionKind, Diagnostic, DEFAULT_LABEL};
use crate::error::AssertionError;
use crate::sink::{DiagnosticSink, StderrSink};

/// Where an assertion was made and, optionally, what it asserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// Source position of the call.
    pub location: CallerLocation,
    /// Source text of the asserted expression.
    pub expression: Option<String>,
}

impl CallSite {
    /// Creates a call site without expression text.
    pub fn new(location: CallerLocation) -> Self {
        Self {
            location,
            expression: None,
        }
    }

    /// Creates a call site from `file!()`, `line!()` and `column!()`.
    pub fn here(file: &str, line: u32, column: u32) -> Self {
        Self::new(CallerLocation::new(file, line, column))
    }

    /// Attaches the asserted expression text.
    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = Some(expression.into());
        self
    }
}

impl From<CallerLocation> for CallSite {
    fn from(location: CallerLocation) -> Self {
        Self::new(location)
    }
}

/// Evaluates assertions and reports failures to a sink.
///
/// Equality failures are soft: they are reported and the call returns.
/// Truthiness failures are hard: they are reported and returned as an
/// [`AssertionError`].
#[derive(Debug, Clone)]
pub struct Asserter<S = StderrSink> {
    sink: S,
    label: Cow<'static, str>,
}

impl<S> Asserter<S> {
    /// Creates an asserter with the default label.
    pub const fn new(sink: S) -> Self {
        Self {
            sink,
            label: Cow::Borrowed(DEFAULT_LABEL),
        }
    }

    /// Replaces the failure label.
    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = label.into();
        self
    }

    /// Failure label used in diagnostics and errors.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Sink receiving diagnostics.
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl Default for Asserter<StderrSink> {
    fn default() -> Self {
        Self::new(StderrSink)
    }
}

impl<S: DiagnosticSink> Asserter<S> {
    /// Reports a diagnostic if `actual != expected`. Never fails.
    #[track_caller]
    pub fn assert_equal<T: PartialEq + Debug>(&self, actual: T, expected: T) {
        self.assert_equal_at(actual, expected, CallerLocation::caller());
    }

    /// Like [`assert_equal`](Self::assert_equal) with an explicit call site.
    pub fn assert_equal_at<T: PartialEq + Debug>(
        &self,
        actual: T,
        expected: T,
        site: impl Into<CallSite>,
    ) {
        self.evaluate_equal(&actual, &expected, site.into());
    }

    /// Returns an error and reports a diagnostic if `condition` is falsy.
    #[track_caller]
    pub fn assert_true<T: Truthy + Debug>(&self, condition: T) -> Result<(), AssertionError> {
        self.assert_true_at(condition, CallerLocation::caller())
    }

    /// Like [`assert_true`](Self::assert_true) with an explicit call site.
    pub fn assert_true_at<T: Truthy + Debug>(
        &self,
        condition: T,
        site: impl Into<CallSite>,
    ) -> Result<(), AssertionError> {
        match self.evaluate_true(&condition, site.into()) {
            None => Ok(()),
            Some(diagnostic) => Err(AssertionError::from_diagnostic(&diagnostic)),
        }
    }

    pub(crate) fn evaluate_equal<T: PartialEq + Debug + ?Sized>(
        &self,
        actual: &T,
        expected: &T,
        site: CallSite,
    ) -> Option<Diagnostic> {
        if actual == expected {
            tracing::trace!(location = %site.location, "equality assertion passed");
            return None;
        }
        let values = vec![format!("{actual:?}"), format!("{expected:?}")];
        Some(self.emit(AssertionKind::Equal, values, site))
    }

    pub(crate) fn evaluate_true<T: Truthy + Debug + ?Sized>(
        &self,
        condition: &T,
        site: CallSite,
    ) -> Option<Diagnostic> {
        if condition.is_truthy() {
            tracing::trace!(location = %site.location, "truthiness assertion passed");
            return None;
        }
        Some(self.emit(AssertionKind::True, vec![format!("{condition:?}")], site))
    }

    fn emit(&self, kind: AssertionKind, values: Vec<String>, site: CallSite) -> Diagnostic {
        let diagnostic = Diagnostic {
            label: self.label.to_string(),
            kind,
            values,
            expression: site.expression,
            location: site.location,
        };
        self.sink.report(&diagnostic);
        diagnostic
    }
}

static DEFAULT_ASSERTER: Asserter<StderrSink> = Asserter::new(StderrSink);

/// Process-wide asserter writing to standard error.
pub fn default_asserter() -> &'static Asserter<StderrSink> {
    &DEFAULT_ASSERTER
}

/// Reports to standard error if `actual != expected`. Never fails.
///
/// ```
/// chk_assert::assert_equal(2 + 3, 5);
/// ```
#[track_caller]
pub fn assert_equal<T: PartialEq + Debug>(actual: T, expected: T) {
    DEFAULT_ASSERTER.assert_equal(actual, expected);
}

/// Reports to standard error and fails if `condition` is falsy.
///
/// ```
/// let err = chk_assert::assert_true(1 == 2).unwrap_err();
/// assert!(err.to_string().starts_with("Assertion failed: "));
/// ```
#[track_caller]
pub fn assert_true<T: Truthy + Debug>(condition: T) -> Result<(), AssertionError> {
    DEFAULT_ASSERTER.assert_true(condition)
}
