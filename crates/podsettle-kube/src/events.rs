//! Event sources over the two Kubernetes event APIs.
//!
//! Both translate their own text field into `EventRecord::text` so the
//! correlation engine treats them interchangeably.

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Event as LegacyEvent;
use k8s_openapi::api::events::v1::Event as StructuredEvent;
use kube::api::{Api, ListParams};
use kube::Client;
use tracing::debug;

use podsettle_core::source::SourceResult;
use podsettle_core::{EventRecord, EventSource, SourceError, SourceKind};

/// Normalise an events.k8s.io/v1 event.
pub fn structured_record(namespace: &str, event: &StructuredEvent) -> EventRecord {
    let record = EventRecord::new(
        SourceKind::Structured,
        namespace,
        event.reason.clone().unwrap_or_default(),
        event.note.clone().unwrap_or_default(),
    );
    match event.metadata.creation_timestamp.as_ref() {
        Some(created) => record.with_timestamp(created.0),
        None => record,
    }
}

/// Normalise a core/v1 event.
pub fn legacy_record(namespace: &str, event: &LegacyEvent) -> EventRecord {
    let record = EventRecord::new(
        SourceKind::Legacy,
        namespace,
        event.reason.clone().unwrap_or_default(),
        event.message.clone().unwrap_or_default(),
    );
    let observed = event
        .last_timestamp
        .as_ref()
        .or(event.metadata.creation_timestamp.as_ref());
    match observed {
        Some(time) => record.with_timestamp(time.0),
        None => record,
    }
}

/// Lists events through the events.k8s.io/v1 API.
#[derive(Clone)]
pub struct StructuredEventSource {
    client: Client,
}

impl StructuredEventSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EventSource for StructuredEventSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Structured
    }

    async fn list_events(&self, namespace: &str) -> SourceResult<Vec<EventRecord>> {
        let api: Api<StructuredEvent> = Api::namespaced(self.client.clone(), namespace);
        let list = api
            .list(&ListParams::default())
            .await
            .map_err(|e| SourceError::transport(self.kind().as_str(), namespace, e))?;
        debug!(namespace = %namespace, count = list.items.len(), "listed structured events");
        Ok(list
            .items
            .iter()
            .map(|event| structured_record(namespace, event))
            .collect())
    }
}

/// Lists events through the core/v1 API.
#[derive(Clone)]
pub struct LegacyEventSource {
    client: Client,
}

impl LegacyEventSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EventSource for LegacyEventSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Legacy
    }

    async fn list_events(&self, namespace: &str) -> SourceResult<Vec<EventRecord>> {
        let api: Api<LegacyEvent> = Api::namespaced(self.client.clone(), namespace);
        let list = api
            .list(&ListParams::default())
            .await
            .map_err(|e| SourceError::transport(self.kind().as_str(), namespace, e))?;
        debug!(namespace = %namespace, count = list.items.len(), "listed legacy events");
        Ok(list
            .items
            .iter()
            .map(|event| legacy_record(namespace, event))
            .collect())
    }
}
