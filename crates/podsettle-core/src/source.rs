//! Event source abstraction.
//!
//! Both cluster event APIs are modelled as one capability. Implementations
//! translate their own text field into [`EventRecord::text`] so matching
//! logic is shared.
//!
//! In-memory fakes are provided for testing via the `fakes` module.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{EventRecord, SourceKind};
use crate::error::SourceError;

/// Result type for event listing.
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Lists cluster events for a namespace.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Which API this source reads.
    fn kind(&self) -> SourceKind;

    /// List every event currently stored for `namespace`.
    async fn list_events(&self, namespace: &str) -> SourceResult<Vec<EventRecord>>;
}

/// The pair of sources a check correlates across.
#[derive(Clone)]
pub struct EventSources {
    /// Source scanned for failures and first-pass recovery evidence.
    pub primary: Arc<dyn EventSource>,

    /// Source consulted only when the primary shows no recovery.
    pub secondary: Arc<dyn EventSource>,
}

impl EventSources {
    pub fn new(primary: Arc<dyn EventSource>, secondary: Arc<dyn EventSource>) -> Self {
        Self { primary, secondary }
    }
}

impl std::fmt::Debug for EventSources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSources")
            .field("primary", &self.primary.kind())
            .field("secondary", &self.secondary.kind())
            .finish()
    }
}
