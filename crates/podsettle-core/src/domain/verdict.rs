//! Per-fact recovery verdicts.

use serde::Serialize;

/// Where recovery evidence was found.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceSource {
    Primary,
    Secondary,
}

/// Outcome for one failure fact.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    /// The pod eventually reached the target revision.
    Resolved { via: EvidenceSource },

    /// No recovery evidence in either source.
    Unresolved,
}

impl Verdict {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Verdict::Resolved { .. })
    }
}
