//! Structured observability hooks for the check lifecycle.
//!
//! This module provides:
//! - A check-scoped tracing span via `check_span`
//! - Emission functions for key events: start, extraction, verdicts,
//!   source discrepancies, finish
//!
//! Events are emitted at `info!` level except soft failures, which are
//! `warn!`. Filter with `RUST_LOG`; pass `--json` to the CLI for JSON lines.

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{FailureFact, SourceKind, Verdict};

/// Span tagging every event of one check with its id.
///
/// Checks are async, so attach it with `tracing::Instrument` rather than
/// entering it across awaits.
///
/// # Example
///
/// ```ignore
/// run(..).instrument(check_span(&Uuid::new_v4())).await
/// ```
pub fn check_span(check_id: &Uuid) -> tracing::Span {
    tracing::info_span!("podsettle.check", check_id = %check_id)
}

/// Emit event: check started over `namespaces` namespaces.
pub fn emit_check_started(test_name: &str, namespaces: usize) {
    info!(event = "check.started", test_name = %test_name, namespaces = namespaces);
}

/// Emit event: a failure fact was extracted.
pub fn emit_fact_extracted(fact: &FailureFact) {
    info!(
        event = "fact.extracted",
        namespace = %fact.namespace(),
        node = %fact.node(),
        target_revision = fact.target_revision(),
    );
}

/// Emit event: a soft error was recorded (warning level).
pub fn emit_soft_error(phase: &str, error: &dyn std::fmt::Display) {
    warn!(event = "check.soft_error", phase = %phase, error = %error);
}

/// Emit event: a verdict was reached for a fact.
pub fn emit_verdict(fact: &FailureFact, verdict: &Verdict) {
    info!(
        event = "fact.verdict",
        fact = %fact,
        resolved = verdict.is_resolved(),
    );
}

/// Emit event: the secondary source had evidence the primary lacked.
pub fn emit_source_discrepancy(fact: &FailureFact, recovered_in: SourceKind) {
    warn!(
        event = "source.discrepancy",
        fact = %fact,
        recovered_in = %recovered_in,
    );
}

/// Emit event: check finished.
pub fn emit_check_finished(passed: bool, facts: usize, unresolved: usize, soft_errors: usize) {
    info!(
        event = "check.finished",
        passed = passed,
        facts = facts,
        unresolved = unresolved,
        soft_errors = soft_errors,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_span_create() {
        let id = Uuid::new_v4();
        let _entered = check_span(&id).entered();
    }
}
