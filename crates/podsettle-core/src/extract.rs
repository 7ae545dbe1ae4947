//! Static pod failure extraction from operator event notes.
//!
//! Operators report a static pod that never appeared with a note like:
//!
//! ```text
//! static pod lifecycle failure - static pod: "etcd" in namespace: "openshift-etcd" for revision: 6 on node: "master-2" didn't show up, waited: 2m30s
//! ```
//!
//! The pod name and wait duration are ignored. Anything that deviates from
//! the template is rejected with an [`ExtractionError`].

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::FailureFact;
use crate::error::ExtractionError;

/// Phrase every failure note starts with. Records without it are not
/// candidates for extraction.
pub const FAILURE_LEAD_IN: &str = "static pod lifecycle failure";

const FAILURE_TEMPLATE: &str = r#"static pod lifecycle failure - static pod: "[^"]*" in namespace: "([^"]+)" for revision: (\S+) on node: "([^"]+)" didn't show up, waited: .*"#;

fn failure_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(FAILURE_TEMPLATE).expect("failure template is a valid regex"))
}

/// Turns a free-text note into a [`FailureFact`].
pub trait FailureExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Result<FailureFact, ExtractionError>;
}

/// Regex extractor for the operator failure template.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateExtractor;

impl FailureExtractor for TemplateExtractor {
    fn extract(&self, text: &str) -> Result<FailureFact, ExtractionError> {
        extract(text)
    }
}

/// Extract a failure fact from `text`.
///
/// Pure and side-effect free: the same text always yields the same result.
pub fn extract(text: &str) -> Result<FailureFact, ExtractionError> {
    let caps = failure_regex()
        .captures(text)
        .ok_or_else(|| ExtractionError::NoMatch {
            text: text.to_string(),
        })?;

    // All three groups are mandatory in the pattern.
    let (namespace, token, node) = match (caps.get(1), caps.get(2), caps.get(3)) {
        (Some(ns), Some(rev), Some(node)) => (ns.as_str(), rev.as_str(), node.as_str()),
        _ => {
            return Err(ExtractionError::NoMatch {
                text: text.to_string(),
            })
        }
    };

    let invalid = || ExtractionError::InvalidRevision {
        token: token.to_string(),
        text: text.to_string(),
    };
    // `u64::from_str` tolerates a leading '+'; the template does not.
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let target_revision = token.parse::<u64>().map_err(|_| invalid())?;

    Ok(FailureFact::new(
        namespace.to_string(),
        node.to_string(),
        target_revision,
        text.to_string(),
    ))
}

/// Whether `text` looks like a failure note at all.
pub fn is_failure_candidate(text: &str) -> bool {
    text.contains(FAILURE_LEAD_IN)
}
