//! Secondary-source verification for failures the primary source could not
//! resolve.
//!
//! The structured and legacy event APIs have been seen to disagree. When the
//! primary source shows no recovery, the same match rule is re-applied to the
//! secondary source before a failure is reported. Diagnostics are advisory
//! and never change the outcome on their own.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::domain::{EventRecord, FailureFact};
use crate::error::SourceError;
use crate::matcher::RecoveryMatcher;
use crate::obs;
use crate::source::EventSource;

/// Result of consulting the secondary source for one fact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackOutcome {
    /// Whether the secondary source holds recovery evidence.
    pub resolved: bool,

    /// Advisory notes for debugging source skew.
    pub diagnostics: Vec<String>,

    /// Listing the secondary source failed; the fact stays unresolved.
    pub error: Option<SourceError>,
}

/// Re-runs recovery matching against the secondary event source.
pub struct FallbackVerifier {
    secondary: Arc<dyn EventSource>,
    matcher: RecoveryMatcher,
}

impl FallbackVerifier {
    pub fn new(secondary: Arc<dyn EventSource>, matcher: RecoveryMatcher) -> Self {
        Self { secondary, matcher }
    }

    /// Verify `fact` against the secondary source.
    ///
    /// `primary_records` are the records the primary scan already rejected;
    /// they are only used for diagnostics.
    pub async fn verify(&self, fact: &FailureFact, primary_records: &[EventRecord]) -> FallbackOutcome {
        let mut outcome = FallbackOutcome::default();

        if let Some(dump) = dump_records(primary_records) {
            outcome.diagnostics.push(format!(
                "failure '{}' has no recovery in primary events: {}",
                fact.raw_message(),
                dump
            ));
        }

        let secondary_records = match self.secondary.list_events(fact.namespace()).await {
            Ok(records) => records,
            Err(err) => {
                debug!(fact = %fact, error = %err, "secondary source unavailable");
                outcome.error = Some(err);
                return outcome;
            }
        };

        if self.matcher.find_evidence(fact, &secondary_records) {
            outcome.resolved = true;
            outcome.diagnostics.push(format!(
                "failure '{}' recovered: {} events report node {} at revision {} but primary events do not",
                fact.raw_message(),
                self.secondary.kind(),
                fact.node(),
                fact.target_revision()
            ));
            if let Some(dump) = dump_records(&secondary_records) {
                outcome.diagnostics.push(format!(
                    "failure '{}' recovered: corresponding {} events {}",
                    fact.raw_message(),
                    self.secondary.kind(),
                    dump
                ));
            }
            obs::emit_source_discrepancy(fact, self.secondary.kind());
        }

        outcome
    }
}

fn dump_records<T: Serialize>(records: &[T]) -> Option<String> {
    serde_json::to_string(records).ok()
}
