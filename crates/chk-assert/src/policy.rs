use std::path::Path;

use chk_core::errors::ChkError;
use chk_core::serde::read_document;
use serde::{Deserialize, Serialize};

use crate::asserter::Asserter;
use crate::diagnostic::DEFAULT_LABEL;
use crate::sink::SinkKind;

const POLICY_HINT: &str = "`sink` must be one of stderr, tracing or silent";

/// Policy controlling labels, halting and the success criterion of a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Policy {
    /// Fixed label prefixed to every failure.
    #[serde(default = "Policy::default_label")]
    pub label: String,
    /// Stop a case run at the first failed truthiness assertion.
    #[serde(default = "Policy::default_halt_on_hard_failure")]
    pub halt_on_hard_failure: bool,
    /// Treat soft (equality) failures as a failed run.
    #[serde(default)]
    pub fail_on_soft_failure: bool,
    /// Where diagnostics are sent.
    #[serde(default)]
    pub sink: SinkKind,
}

impl Policy {
    fn default_label() -> String {
        DEFAULT_LABEL.to_string()
    }

    const fn default_halt_on_hard_failure() -> bool {
        true
    }

    /// Loads a policy; `.json` files are parsed as JSON, everything else as YAML.
    pub fn load(path: &Path) -> Result<Self, ChkError> {
        read_document(path).map_err(|err| err.with_config_hint(POLICY_HINT))
    }

    /// Builds an asserter carrying this policy's label.
    pub fn asserter<S>(&self, sink: S) -> Asserter<S> {
        Asserter::new(sink).with_label(self.label.clone())
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            label: Self::default_label(),
            halt_on_hard_failure: Self::default_halt_on_hard_failure(),
            fail_on_soft_failure: false,
            sink: SinkKind::default(),
        }
    }
}
