//! Declarative assertion case files.
//!
//! ```yaml
//! cases:
//!   - op: assert_true
//!     name: includes two
//!     value: true
//!   - op: assert_equal
//!     actual: 5
//!     expected: "5"
//! ```

use std::fmt;
use std::path::Path;

use chk_core::errors::{ChkError, ErrorInfo};
use chk_core::serde::read_document;
use chk_core::{CallerLocation, StrictValue};
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::asserter::CallSite;
use crate::policy::Policy;
use crate::report::AssertionReport;
use crate::session::Session;
use crate::sink::DiagnosticSink;

const CASE_FILE_HINT: &str =
    "each case needs `op: assert_equal` or `op: assert_true`; numbers must be finite";

/// One assertion to evaluate. Missing values are JSON `null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Case {
    /// Soft strict-equality check.
    AssertEqual {
        /// Optional label shown in diagnostics.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// Observed value.
        #[serde(default)]
        actual: StrictValue,
        /// Expected value.
        #[serde(default)]
        expected: StrictValue,
    },
    /// Hard truthiness check.
    AssertTrue {
        /// Optional label shown in diagnostics.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// Value whose truthiness is asserted.
        #[serde(default)]
        value: StrictValue,
    },
}

impl Case {
    fn name(&self) -> Option<&str> {
        match self {
            Case::AssertEqual { name, .. } | Case::AssertTrue { name, .. } => name.as_deref(),
        }
    }
}

/// Ordered list of cases.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CaseFile {
    /// Cases in evaluation order.
    #[serde(default, deserialize_with = "deserialize_cases")]
    pub cases: Vec<Case>,
}

struct CasesVisitor;

impl<'de> Visitor<'de> for CasesVisitor {
    type Value = Vec<Case>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence of cases")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Vec<Case>, A::Error> {
        let mut cases = Vec::new();
        loop {
            match seq.next_element::<Case>() {
                Ok(Some(case)) => cases.push(case),
                Ok(None) => return Ok(cases),
                Err(err) => {
                    return Err(de::Error::custom(format!("case {}: {err}", cases.len() + 1)))
                }
            }
        }
    }
}

// Errors are prefixed with the 1-based number of the offending case.
fn deserialize_cases<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Case>, D::Error> {
    deserializer.deserialize_seq(CasesVisitor)
}

impl CaseFile {
    /// Loads a case file; `.json` files are parsed as JSON, everything else as YAML.
    pub fn load(path: &Path) -> Result<Self, ChkError> {
        read_document(path).map_err(|err| err.with_config_hint(CASE_FILE_HINT))
    }
}

fn case_site(source: &str, index: usize, case: &Case) -> Result<CallSite, ChkError> {
    let line = u32::try_from(index + 1).map_err(|_| {
        ChkError::Config(
            ErrorInfo::new("too-many-cases", "case index exceeds u32")
                .with_context("index", index.to_string()),
        )
    })?;
    let site = CallSite::new(CallerLocation::new(source, line, 0));
    Ok(match case.name() {
        Some(name) => site.with_expression(name),
        None => site,
    })
}

/// Evaluates every case of `file` in order and returns the session report.
///
/// `source` names the file in call-site locations (`<source>:<case number>`).
/// A failed `assert_true` case stops the run when
/// [`Policy::halt_on_hard_failure`] is set and is recorded otherwise.
pub fn run_cases<S: DiagnosticSink>(
    file: &CaseFile,
    source: &str,
    policy: &Policy,
    sink: S,
) -> Result<AssertionReport, ChkError> {
    let mut session = Session::new(policy.asserter(sink));
    for (index, case) in file.cases.iter().enumerate() {
        let site = case_site(source, index, case)?;
        match case {
            Case::AssertEqual {
                actual, expected, ..
            } => session.assert_equal_at(actual, expected, site),
            Case::AssertTrue { value, .. } => {
                if let Err(err) = session.assert_true_at(value, site) {
                    if policy.halt_on_hard_failure {
                        session.halt(&err);
                        break;
                    }
                    tracing::debug!(%err, "continuing after hard assertion failure");
                }
            }
        }
    }
    session.finish()
}
