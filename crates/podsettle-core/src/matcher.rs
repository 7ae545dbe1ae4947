//! Recovery evidence matching.
//!
//! A record proves a failure fact was resolved when all of these hold:
//! - its reason is the revision-change reason
//! - its text mentions the fact's node
//! - its text reports `to <N> because static pod is ready` with `N` equal to
//!   the fact's target revision
//!
//! Revision equality is exact. A node that skipped past the target revision
//! does not count. There is no ordering check between the failure and the
//! recovery record.

use std::sync::OnceLock;

use regex::Regex;
use tracing::trace;

use crate::config::DEFAULT_RECOVERY_REASON;
use crate::domain::{EventRecord, FailureFact};

fn reached_revision_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"to ([0-9]+) because static pod is ready")
            .expect("reached revision pattern is a valid regex")
    })
}

/// Revision reported by a "static pod is ready" note, if any.
pub fn reached_revision(text: &str) -> Option<u64> {
    reached_revision_regex()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok())
}

/// Searches event records for proof that a failure fact recovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryMatcher {
    recovery_reason: String,
}

impl Default for RecoveryMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_RECOVERY_REASON)
    }
}

impl RecoveryMatcher {
    pub fn new(recovery_reason: impl Into<String>) -> Self {
        Self {
            recovery_reason: recovery_reason.into(),
        }
    }

    /// Whether a single record is recovery evidence for `fact`.
    pub fn is_evidence(&self, fact: &FailureFact, record: &EventRecord) -> bool {
        let is_revision_update = record.reason == self.recovery_reason;
        let is_for_node = record.text.contains(fact.node());
        let reached_target = reached_revision(&record.text) == Some(fact.target_revision());
        is_revision_update && is_for_node && reached_target
    }

    /// Whether any record in `records` is recovery evidence for `fact`.
    pub fn find_evidence(&self, fact: &FailureFact, records: &[EventRecord]) -> bool {
        let found = records.iter().any(|record| self.is_evidence(fact, record));
        trace!(
            fact = %fact,
            records = records.len(),
            found = found,
            "scanned records for recovery evidence"
        );
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SourceKind;
    use crate::extract::extract;

    const FAILURE: &str = "static pod lifecycle failure - static pod: \"etcd\" in namespace: \"openshift-etcd-operator\" for revision: 6 on node: \"node-1\" didn't show up, waited: 2m30s";

    fn fact() -> FailureFact {
        extract(FAILURE).expect("extract")
    }

    fn record(reason: &str, text: &str) -> EventRecord {
        EventRecord::new(SourceKind::Structured, "openshift-etcd-operator", reason, text)
    }

    fn ready_text(node: &str, rev: u64) -> String {
        format!(
            "Updated node \"{}\" from revision {} to {} because static pod is ready",
            node,
            rev.saturating_sub(1),
            rev
        )
    }

    #[test]
    fn test_all_three_conditions_match() {
        let matcher = RecoveryMatcher::default();
        let records = vec![record(DEFAULT_RECOVERY_REASON, &ready_text("node-1", 6))];
        assert!(matcher.find_evidence(&fact(), &records));
    }

    #[test]
    fn test_wrong_reason_is_not_evidence() {
        let matcher = RecoveryMatcher::default();
        let records = vec![record("OperatorStatusChanged", &ready_text("node-1", 6))];
        assert!(!matcher.find_evidence(&fact(), &records));
    }

    #[test]
    fn test_wrong_node_is_not_evidence() {
        let matcher = RecoveryMatcher::default();
        let records = vec![record(DEFAULT_RECOVERY_REASON, &ready_text("node-2", 6))];
        assert!(!matcher.find_evidence(&fact(), &records));
    }

    #[test]
    fn test_missing_ready_pattern_is_not_evidence() {
        let matcher = RecoveryMatcher::default();
        let records = vec![record(
            DEFAULT_RECOVERY_REASON,
            "Updated node \"node-1\" from revision 5 to 6",
        )];
        assert!(!matcher.find_evidence(&fact(), &records));
    }

    #[test]
    fn test_revision_match_is_exact() {
        let matcher = RecoveryMatcher::default();
        let records = vec![
            record(DEFAULT_RECOVERY_REASON, &ready_text("node-1", 7)),
            record(DEFAULT_RECOVERY_REASON, &ready_text("node-1", 5)),
        ];
        assert!(!matcher.find_evidence(&fact(), &records));
    }

    #[test]
    fn test_conditions_split_across_records_do_not_combine() {
        let matcher = RecoveryMatcher::default();
        let records = vec![
            record(DEFAULT_RECOVERY_REASON, &ready_text("node-2", 6)),
            record("SomethingElse", &ready_text("node-1", 6)),
            record(DEFAULT_RECOVERY_REASON, "node-1 is progressing"),
        ];
        assert!(!matcher.find_evidence(&fact(), &records));
    }

    #[test]
    fn test_match_anywhere_in_sequence() {
        let matcher = RecoveryMatcher::default();
        let records = vec![
            record("Noise", "x"),
            record(DEFAULT_RECOVERY_REASON, &ready_text("node-2", 6)),
            record(DEFAULT_RECOVERY_REASON, &ready_text("node-1", 6)),
        ];
        assert!(matcher.find_evidence(&fact(), &records));
    }

    #[test]
    fn test_empty_records() {
        assert!(!RecoveryMatcher::default().find_evidence(&fact(), &[]));
    }

    #[test]
    fn test_custom_reason() {
        let matcher = RecoveryMatcher::new("revision changed");
        let records = vec![record("revision changed", &ready_text("node-1", 6))];
        assert!(matcher.find_evidence(&fact(), &records));
        assert!(!RecoveryMatcher::default().find_evidence(&fact(), &records));
    }

    #[test]
    fn test_reached_revision_parse() {
        assert_eq!(reached_revision("to 12 because static pod is ready"), Some(12));
        assert_eq!(reached_revision("to  because static pod is ready"), None);
        assert_eq!(reached_revision("reached 12"), None);
    }
}
