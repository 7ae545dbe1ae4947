//! Correlation of static pod failures with later recovery events.
//!
//! Runs in two sequential passes:
//! 1. every configured namespace is listed from the primary source and each
//!    failure note is extracted into a [`FailureFact`]
//! 2. every fact's namespace is listed again (events may have arrived since
//!    the first pass) and searched for recovery evidence, falling back to the
//!    secondary source when the primary has none
//!
//! Transport and extraction errors are collected as soft errors. The engine
//! is the only owner of the accumulated facts, verdicts and errors.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::CheckConfig;
use crate::domain::{EvidenceSource, FailureFact, Verdict};
use crate::error::SoftError;
use crate::extract::{is_failure_candidate, FailureExtractor, TemplateExtractor};
use crate::fallback::FallbackVerifier;
use crate::matcher::RecoveryMatcher;
use crate::obs;
use crate::source::{EventSource, EventSources};

/// A fact and the verdict reached for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactVerdict {
    pub fact: FailureFact,
    pub verdict: Verdict,
}

/// Everything one correlation run produced.
#[derive(Debug, Clone, Default)]
pub struct Correlation {
    /// One verdict per fact, in discovery order.
    pub verdicts: Vec<FactVerdict>,

    /// Transport and extraction errors from either pass.
    pub soft_errors: Vec<SoftError>,

    /// Advisory notes from the fallback path.
    pub diagnostics: Vec<String>,
}

impl Correlation {
    /// Facts with no recovery evidence, in discovery order.
    pub fn unresolved(&self) -> impl Iterator<Item = &FailureFact> {
        self.verdicts
            .iter()
            .filter(|fv| !fv.verdict.is_resolved())
            .map(|fv| &fv.fact)
    }

    pub fn unresolved_count(&self) -> usize {
        self.unresolved().count()
    }

    /// Facts resolved only through the secondary source.
    pub fn resolved_via_secondary(&self) -> usize {
        self.verdicts
            .iter()
            .filter(|fv| {
                fv.verdict
                    == Verdict::Resolved {
                        via: EvidenceSource::Secondary,
                    }
            })
            .count()
    }
}

/// Orchestrates extraction, matching and fallback verification.
pub struct CorrelationEngine {
    primary: Arc<dyn EventSource>,
    extractor: Arc<dyn FailureExtractor>,
    matcher: RecoveryMatcher,
    fallback: FallbackVerifier,
    noisy_reason: String,
}

impl CorrelationEngine {
    /// Build an engine over `sources` using the reasons from `config`.
    pub fn new(sources: EventSources, config: &CheckConfig) -> Self {
        let matcher = RecoveryMatcher::new(config.recovery_reason.clone());
        Self {
            primary: sources.primary,
            extractor: Arc::new(TemplateExtractor),
            fallback: FallbackVerifier::new(sources.secondary, matcher.clone()),
            matcher,
            noisy_reason: config.noisy_reason.clone(),
        }
    }

    /// Replace the failure extractor.
    pub fn with_extractor(mut self, extractor: Arc<dyn FailureExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Correlate failures across `namespaces`.
    pub async fn correlate<'a, I>(&self, namespaces: I) -> Correlation
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut correlation = Correlation::default();

        let facts = self
            .collect_failures(namespaces, &mut correlation.soft_errors)
            .await;
        info!(facts = facts.len(), "collected static pod failures");

        for fact in facts {
            let verdict = self.judge(&fact, &mut correlation).await;
            obs::emit_verdict(&fact, &verdict);
            correlation.verdicts.push(FactVerdict { fact, verdict });
        }

        correlation
    }

    async fn collect_failures<'a, I>(
        &self,
        namespaces: I,
        soft_errors: &mut Vec<SoftError>,
    ) -> Vec<FailureFact>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut facts = Vec::new();

        for namespace in namespaces {
            let records = match self.primary.list_events(namespace).await {
                Ok(records) => records,
                Err(err) => {
                    obs::emit_soft_error("collect", &err);
                    soft_errors.push(err.into());
                    continue;
                }
            };
            debug!(namespace = %namespace, records = records.len(), "listed events");

            for record in &records {
                if record.reason == self.noisy_reason {
                    continue;
                }
                if !is_failure_candidate(&record.text) {
                    continue;
                }

                match self.extractor.extract(&record.text) {
                    Ok(fact) => {
                        obs::emit_fact_extracted(&fact);
                        facts.push(fact);
                    }
                    Err(err) => {
                        obs::emit_soft_error("extract", &err);
                        soft_errors.push(err.into());
                    }
                }
            }
        }

        facts
    }

    async fn judge(&self, fact: &FailureFact, correlation: &mut Correlation) -> Verdict {
        // Listed again on purpose: recovery events may postdate the first pass.
        let primary_records = match self.primary.list_events(fact.namespace()).await {
            Ok(records) => records,
            Err(err) => {
                obs::emit_soft_error("verify", &err);
                correlation.soft_errors.push(err.into());
                Vec::new()
            }
        };

        if self.matcher.find_evidence(fact, &primary_records) {
            return Verdict::Resolved {
                via: EvidenceSource::Primary,
            };
        }

        let outcome = self.fallback.verify(fact, &primary_records).await;
        for diagnostic in &outcome.diagnostics {
            info!(event = "fact.diagnostic", fact = %fact, "{}", diagnostic);
        }
        correlation.diagnostics.extend(outcome.diagnostics);
        if let Some(err) = outcome.error {
            obs::emit_soft_error("fallback", &err);
            correlation.soft_errors.push(err.into());
        }

        if outcome.resolved {
            Verdict::Resolved {
                via: EvidenceSource::Secondary,
            }
        } else {
            Verdict::Unresolved
        }
    }
}
