//! Source positions of assertion call sites.

use std::fmt::{self, Display};
use std::panic::Location;

use serde::{Deserialize, Serialize};

/// Source position of the code that invoked an assertion.
///
/// A `column` of zero means the position has no column component, which is
/// the case for locations that point at an entry in a case file rather than
/// at Rust source.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CallerLocation {
    /// File containing the call site.
    pub file: String,
    /// 1-based line (or case ordinal for case files).
    pub line: u32,
    /// 1-based column, or 0 when unknown.
    #[serde(default)]
    pub column: u32,
}

impl CallerLocation {
    /// Creates a location from its components.
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// Captures the location of the caller.
    ///
    /// Through a chain of `#[track_caller]` functions this resolves to the
    /// first frame that is not itself tracked.
    #[track_caller]
    pub fn caller() -> Self {
        Self::from(Location::caller())
    }
}

impl From<&Location<'_>> for CallerLocation {
    fn from(location: &Location<'_>) -> Self {
        Self::new(location.file(), location.line(), location.column())
    }
}

impl Display for CallerLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.column == 0 {
            write!(f, "{}:{}", self.file, self.line)
        } else {
            write!(f, "{}:{}:{}", self.file, self.line, self.column)
        }
    }
}
