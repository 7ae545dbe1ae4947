//! Structured static pod failure facts.

use serde::Serialize;

/// A static pod that did not show up on a node at a given revision.
///
/// Only the extractor constructs facts, so every instance is fully formed.
/// Fields are private to keep the fact immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FailureFact {
    namespace: String,
    node: String,
    target_revision: u64,
    raw_message: String,
}

impl FailureFact {
    pub(crate) fn new(
        namespace: String,
        node: String,
        target_revision: u64,
        raw_message: String,
    ) -> Self {
        Self {
            namespace,
            node,
            target_revision,
            raw_message,
        }
    }

    /// Operator namespace that emitted the failure.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Node the static pod failed to appear on.
    pub fn node(&self) -> &str {
        &self.node
    }

    /// Revision the pod was expected to reach.
    pub fn target_revision(&self) -> u64 {
        self.target_revision
    }

    /// The original note, verbatim.
    pub fn raw_message(&self) -> &str {
        &self.raw_message
    }
}

impl std::fmt::Display for FailureFact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}@{}",
            self.namespace, self.node, self.target_revision
        )
    }
}
