use std::fmt::Debug;

use chk_core::errors::ChkError;
use chk_core::{CallerLocation, Truthy};

use crate::asserter::{Asserter, CallSite};
use crate::diagnostic::AssertionKind;
use crate::error::AssertionError;
use crate::report::{AssertionCheck, AssertionReport};
use crate::sink::DiagnosticSink;

/// Asserter that also records every outcome for an [`AssertionReport`].
///
/// Failure semantics are those of [`Asserter`]; the session only observes.
#[derive(Debug)]
pub struct Session<S> {
    asserter: Asserter<S>,
    checks: Vec<AssertionCheck>,
    halted_at: Option<usize>,
    error: Option<String>,
}

impl<S: DiagnosticSink> Session<S> {
    /// Starts an empty session.
    pub fn new(asserter: Asserter<S>) -> Self {
        Self {
            asserter,
            checks: Vec::new(),
            halted_at: None,
            error: None,
        }
    }

    /// Records a soft equality assertion.
    #[track_caller]
    pub fn assert_equal<T: PartialEq + Debug>(&mut self, actual: T, expected: T) {
        self.assert_equal_at(actual, expected, CallerLocation::caller());
    }

    /// Records a soft equality assertion at an explicit call site.
    pub fn assert_equal_at<T: PartialEq + Debug>(
        &mut self,
        actual: T,
        expected: T,
        site: impl Into<CallSite>,
    ) {
        let site = site.into();
        let ordinal = self.checks.len() + 1;
        let check = match self.asserter.evaluate_equal(&actual, &expected, site.clone()) {
            None => AssertionCheck::passed(ordinal, AssertionKind::Equal, site),
            Some(diagnostic) => AssertionCheck::failed(ordinal, diagnostic),
        };
        self.checks.push(check);
    }

    /// Records a hard truthiness assertion.
    #[track_caller]
    pub fn assert_true<T: Truthy + Debug>(&mut self, condition: T) -> Result<(), AssertionError> {
        self.assert_true_at(condition, CallerLocation::caller())
    }

    /// Records a hard truthiness assertion at an explicit call site.
    pub fn assert_true_at<T: Truthy + Debug>(
        &mut self,
        condition: T,
        site: impl Into<CallSite>,
    ) -> Result<(), AssertionError> {
        let site = site.into();
        let ordinal = self.checks.len() + 1;
        match self.asserter.evaluate_true(&condition, site.clone()) {
            None => {
                self.checks
                    .push(AssertionCheck::passed(ordinal, AssertionKind::True, site));
                Ok(())
            }
            Some(diagnostic) => {
                let err = AssertionError::from_diagnostic(&diagnostic);
                self.checks.push(AssertionCheck::failed(ordinal, diagnostic));
                Err(err)
            }
        }
    }

    /// Marks the session as stopped by `err` at the most recent check.
    pub fn halt(&mut self, err: &AssertionError) {
        tracing::warn!(location = %err.location(), "halting on hard assertion failure");
        self.halted_at = Some(self.checks.len());
        self.error = Some(err.to_string());
    }

    /// Checks recorded so far.
    pub fn checks(&self) -> &[AssertionCheck] {
        &self.checks
    }

    /// Whether [`halt`](Self::halt) was called.
    pub fn is_halted(&self) -> bool {
        self.halted_at.is_some()
    }

    /// Sink receiving diagnostics.
    pub fn sink(&self) -> &S {
        self.asserter.sink()
    }

    /// Closes the session and builds its report.
    pub fn finish(self) -> Result<AssertionReport, ChkError> {
        tracing::debug!(checks = self.checks.len(), "assertion session finished");
        AssertionReport::new(
            self.asserter.label().to_string(),
            self.checks,
            self.halted_at,
            self.error,
        )
    }
}
