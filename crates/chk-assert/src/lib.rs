#![deny(missing_docs)]
#![doc = "Equality and truthiness assertions that report failures with their call site."]

/// Asserter and call-site plumbing.
pub mod asserter;
pub mod cases;
/// Diagnostic records and labels.
pub mod diagnostic;
/// Hard-failure error type.
pub mod error;
mod macros;
/// Policy controlling labels and run outcome.
pub mod policy;
/// Session reports.
pub mod report;
/// Recording sessions.
pub mod session;
/// Diagnostic sinks.
pub mod sink;

pub use asserter::{assert_equal, assert_true, default_asserter, Asserter, CallSite};
pub use cases::{run_cases, Case, CaseFile};
pub use chk_core::{CallerLocation, StrictValue, Truthy};
pub use diagnostic::{AssertionKind, Diagnostic, Severity, DEFAULT_LABEL};
pub use error::AssertionError;
pub use policy::Policy;
pub use report::{AssertionCheck, AssertionReport, ReportSummary};
pub use session::Session;
pub use sink::{DiagnosticSink, MemorySink, SilentSink, SinkKind, StderrSink, TracingSink};
