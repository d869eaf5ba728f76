use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::diagnostic::Diagnostic;

/// Destination for failure diagnostics.
pub trait DiagnosticSink: Send + Sync {
    /// Delivers one diagnostic.
    fn report(&self, diagnostic: &Diagnostic);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn report(&self, diagnostic: &Diagnostic) {
        (**self).report(diagnostic)
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Box<S> {
    fn report(&self, diagnostic: &Diagnostic) {
        (**self).report(diagnostic)
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Arc<S> {
    fn report(&self, diagnostic: &Diagnostic) {
        (**self).report(diagnostic)
    }
}

/// Writes each diagnostic as one line on standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn report(&self, diagnostic: &Diagnostic) {
        let mut stderr = std::io::stderr().lock();
        // A closed stderr must not turn a soft failure into a panic.
        let _ = writeln!(stderr, "{diagnostic}");
    }
}

/// Emits each diagnostic as a `tracing` error event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        tracing::error!(
            kind = ?diagnostic.kind,
            location = %diagnostic.location,
            "{diagnostic}"
        );
    }
}

/// Discards diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl DiagnosticSink for SilentSink {
    fn report(&self, _diagnostic: &Diagnostic) {}
}

/// Keeps diagnostics in memory for later inspection.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of every diagnostic received so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.entries().clone()
    }

    /// Returns the rendered lines received so far.
    pub fn lines(&self) -> Vec<String> {
        self.entries().iter().map(Diagnostic::render).collect()
    }

    /// Number of diagnostics received.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Whether no diagnostic has been received.
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Removes and returns every stored diagnostic.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.entries())
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, diagnostic: &Diagnostic) {
        self.entries().push(diagnostic.clone());
    }
}

/// Configurable choice of built-in sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkKind {
    /// [`StderrSink`].
    #[default]
    Stderr,
    /// [`TracingSink`].
    Tracing,
    /// [`SilentSink`].
    Silent,
}

impl SinkKind {
    /// Instantiates the selected sink.
    pub fn build(self) -> Box<dyn DiagnosticSink> {
        match self {
            SinkKind::Stderr => Box::new(StderrSink),
            SinkKind::Tracing => Box::new(TracingSink),
            SinkKind::Silent => Box::new(SilentSink),
        }
    }
}
