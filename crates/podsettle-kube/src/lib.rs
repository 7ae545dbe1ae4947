//! Kubernetes backends for podsettle.
//!
//! - `StructuredEventSource`: events.k8s.io/v1, free text in `note`
//! - `LegacyEventSource`: core/v1, free text in `message`
//! - `KubeConnector`: builds a client from kubeconfig or in-cluster config

pub mod connector;
pub mod events;

pub use connector::{event_sources, KubeConnector};
pub use events::{legacy_record, structured_record, LegacyEventSource, StructuredEventSource};
