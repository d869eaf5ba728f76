use chk_core::errors::{ChkError, ErrorInfo};
use chk_core::serde::to_canonical_json_bytes;
use chk_core::{content_hash, verify_content_hash, CallerLocation};
use serde::{Deserialize, Serialize};

use crate::diagnostic::{AssertionKind, Diagnostic, Severity};
use crate::policy::Policy;

/// Outcome of one assertion within a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssertionCheck {
    /// 1-based position in evaluation order.
    pub ordinal: usize,
    /// Assertion that was evaluated.
    pub kind: AssertionKind,
    /// Whether it passed.
    pub pass: bool,
    /// Call site.
    pub location: CallerLocation,
    /// Rendered offending values; empty when the check passed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    /// Expression text or case name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
}

impl AssertionCheck {
    pub(crate) fn passed(ordinal: usize, kind: AssertionKind, site: crate::CallSite) -> Self {
        Self {
            ordinal,
            kind,
            pass: true,
            location: site.location,
            values: Vec::new(),
            expression: site.expression,
        }
    }

    pub(crate) fn failed(ordinal: usize, diagnostic: Diagnostic) -> Self {
        Self {
            ordinal,
            kind: diagnostic.kind,
            pass: false,
            location: diagnostic.location,
            values: diagnostic.values,
            expression: diagnostic.expression,
        }
    }

    /// Severity of this check had it failed.
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

/// Pass and failure counts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ReportSummary {
    /// Number of checks evaluated.
    pub total: usize,
    /// Number of checks that passed.
    pub passed: usize,
    /// Failed equality checks.
    pub soft_failures: usize,
    /// Failed truthiness checks.
    pub hard_failures: usize,
}

impl ReportSummary {
    fn from_checks(checks: &[AssertionCheck]) -> Self {
        checks.iter().fold(Self::default(), |mut summary, check| {
            summary.total += 1;
            match (check.pass, check.severity()) {
                (true, _) => summary.passed += 1,
                (false, Severity::Soft) => summary.soft_failures += 1,
                (false, Severity::Hard) => summary.hard_failures += 1,
            }
            summary
        })
    }
}

#[derive(Serialize)]
struct ReportBody<'a> {
    label: &'a str,
    checks: &'a [AssertionCheck],
    summary: &'a ReportSummary,
    halted_at: Option<usize>,
    error: Option<&'a str>,
}

/// Aggregated record of a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssertionReport {
    /// Content-addressed hash of the report payload.
    pub analysis_hash: String,
    /// Failure label in effect.
    pub label: String,
    /// Per-assertion results in evaluation order.
    pub checks: Vec<AssertionCheck>,
    /// Aggregate counts.
    pub summary: ReportSummary,
    /// Ordinal of the check whose hard failure stopped the run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub halted_at: Option<usize>,
    /// Message of the error that stopped the run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AssertionReport {
    /// Builds a report and computes its summary and stable hash.
    pub fn new(
        label: String,
        checks: Vec<AssertionCheck>,
        halted_at: Option<usize>,
        error: Option<String>,
    ) -> Result<Self, ChkError> {
        validate_order(&checks)?;
        let summary = ReportSummary::from_checks(&checks);
        let analysis_hash = content_hash(&ReportBody {
            label: &label,
            checks: &checks,
            summary: &summary,
            halted_at,
            error: error.as_deref(),
        })?;
        Ok(Self {
            analysis_hash,
            label,
            checks,
            summary,
            halted_at,
            error,
        })
    }

    /// Whether the run counts as successful under `policy`.
    pub fn is_success(&self, policy: &Policy) -> bool {
        self.summary.hard_failures == 0
            && (!policy.fail_on_soft_failure || self.summary.soft_failures == 0)
    }

    /// Failed checks in evaluation order.
    pub fn failures(&self) -> impl Iterator<Item = &AssertionCheck> {
        self.checks.iter().filter(|check| !check.pass)
    }

    /// Re-derives the summary and hash of a stored report and rejects it if
    /// either disagrees with what was recorded.
    pub fn verify(&self) -> Result<(), ChkError> {
        validate_order(&self.checks)?;
        if ReportSummary::from_checks(&self.checks) != self.summary {
            return Err(ChkError::Serde(ErrorInfo::new(
                "summary-mismatch",
                "summary does not match the recorded checks",
            )));
        }
        verify_content_hash(
            &ReportBody {
                label: &self.label,
                checks: &self.checks,
                summary: &self.summary,
                halted_at: self.halted_at,
                error: self.error.as_deref(),
            },
            &self.analysis_hash,
        )
    }

    /// Serializes the report as canonical JSON bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ChkError> {
        to_canonical_json_bytes(self)
    }
}

fn validate_order(checks: &[AssertionCheck]) -> Result<(), ChkError> {
    for (idx, check) in checks.iter().enumerate() {
        if check.ordinal != idx + 1 {
            return Err(ChkError::Serde(
                ErrorInfo::new("check-order", "check ordinals must be contiguous from 1")
                    .with_context("index", idx.to_string())
                    .with_context("ordinal", check.ordinal.to_string()),
            ));
        }
    }
    Ok(())
}
