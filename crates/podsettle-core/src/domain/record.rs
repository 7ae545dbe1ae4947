//! Event records normalised across the structured and legacy event APIs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which event API a record was listed from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// events.k8s.io/v1, free text in `note`.
    Structured,

    /// core/v1, free text in `message`.
    Legacy,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Structured => "structured",
            SourceKind::Legacy => "legacy",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single cluster event.
///
/// `text` holds whichever free-text field the originating API uses, so the
/// matching logic never needs to know where a record came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventRecord {
    /// Namespace the record was listed from.
    pub namespace: String,

    /// Short machine-stable category.
    pub reason: String,

    /// Free-text note or message.
    pub text: String,

    /// When the event was last observed, if the API reported it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    /// API the record came from.
    pub source: SourceKind,
}

impl EventRecord {
    /// Create a record without a timestamp.
    pub fn new(
        source: SourceKind,
        namespace: impl Into<String>,
        reason: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            reason: reason.into(),
            text: text.into(),
            timestamp: None,
            source,
        }
    }

    /// Attach an observation timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}
