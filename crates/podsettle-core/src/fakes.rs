//! In-memory fakes for the event source and connector (testing only)
//!
//! `MemoryEventSource` satisfies the [`EventSource`] contract without a
//! cluster. It can fail listings for chosen namespaces and can release
//! "late" events that only become visible after the first listing, which
//! mirrors events arriving between the two correlation passes.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::check::ClusterConnector;
use crate::config::ClusterConfig;
use crate::domain::{EventRecord, SourceKind};
use crate::error::{ConnectionError, SourceError};
use crate::source::{EventSource, EventSources, SourceResult};

#[derive(Debug, Default)]
struct NamespaceState {
    events: Vec<EventRecord>,
    late: Vec<EventRecord>,
    list_calls: usize,
}

/// In-memory event source backed by a `HashMap<namespace, events>`.
#[derive(Debug)]
pub struct MemoryEventSource {
    kind: SourceKind,
    namespaces: Mutex<HashMap<String, NamespaceState>>,
    failing: Mutex<HashSet<String>>,
    fail_after: Mutex<HashMap<String, usize>>,
}

impl MemoryEventSource {
    pub fn new(kind: SourceKind) -> Self {
        Self {
            kind,
            namespaces: Mutex::new(HashMap::new()),
            failing: Mutex::new(HashSet::new()),
            fail_after: Mutex::new(HashMap::new()),
        }
    }

    /// Add an event to its namespace, visible immediately.
    pub fn push(&self, record: EventRecord) {
        let mut namespaces = self.namespaces.lock().unwrap();
        namespaces
            .entry(record.namespace.clone())
            .or_default()
            .events
            .push(record);
    }

    /// Add an event that becomes visible after the namespace's first listing.
    pub fn push_late(&self, record: EventRecord) {
        let mut namespaces = self.namespaces.lock().unwrap();
        namespaces
            .entry(record.namespace.clone())
            .or_default()
            .late
            .push(record);
    }

    /// Make every listing of `namespace` fail with a transport error.
    pub fn fail_namespace(&self, namespace: &str) {
        self.failing.lock().unwrap().insert(namespace.to_string());
    }

    /// Let the first `listings` listings of `namespace` succeed, then fail
    /// every later one with a transport error.
    pub fn fail_namespace_after(&self, namespace: &str, listings: usize) {
        self.fail_after
            .lock()
            .unwrap()
            .insert(namespace.to_string(), listings);
    }

    /// Number of times `namespace` has been listed.
    pub fn list_calls(&self, namespace: &str) -> usize {
        self.namespaces
            .lock()
            .unwrap()
            .get(namespace)
            .map(|state| state.list_calls)
            .unwrap_or(0)
    }
}

#[async_trait]
impl EventSource for MemoryEventSource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    async fn list_events(&self, namespace: &str) -> SourceResult<Vec<EventRecord>> {
        let mut namespaces = self.namespaces.lock().unwrap();
        let state = namespaces.entry(namespace.to_string()).or_default();
        state.list_calls += 1;

        let exhausted = self
            .fail_after
            .lock()
            .unwrap()
            .get(namespace)
            .is_some_and(|&listings| state.list_calls > listings);
        if exhausted || self.failing.lock().unwrap().contains(namespace) {
            return Err(SourceError::transport(
                self.kind.as_str(),
                namespace,
                "connection refused",
            ));
        }

        let events = state.events.clone();
        if state.list_calls == 1 && !state.late.is_empty() {
            let late = std::mem::take(&mut state.late);
            state.events.extend(late);
        }
        Ok(events)
    }
}

// ---------------------------------------------------------------------------
// MemoryConnector
// ---------------------------------------------------------------------------

/// Connector handing out a fixed pair of in-memory sources, or failing.
#[derive(Debug)]
pub struct MemoryConnector {
    outcome: Result<EventSources, ConnectionError>,
    seen_contexts: Mutex<Vec<Option<String>>>,
}

impl MemoryConnector {
    /// Connect to structured (primary) and legacy (secondary) fakes.
    pub fn new(primary: Arc<MemoryEventSource>, secondary: Arc<MemoryEventSource>) -> Self {
        Self {
            outcome: Ok(EventSources::new(primary, secondary)),
            seen_contexts: Mutex::new(Vec::new()),
        }
    }

    /// Every connection attempt fails with `error`.
    pub fn failing(error: ConnectionError) -> Self {
        Self {
            outcome: Err(error),
            seen_contexts: Mutex::new(Vec::new()),
        }
    }

    /// Contexts passed to `connect`, in call order.
    pub fn seen_contexts(&self) -> Vec<Option<String>> {
        self.seen_contexts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClusterConnector for MemoryConnector {
    async fn connect(&self, config: &ClusterConfig) -> Result<EventSources, ConnectionError> {
        self.seen_contexts
            .lock()
            .unwrap()
            .push(config.context.clone());
        self.outcome.clone()
    }
}
