//! Cluster client construction.

use std::sync::Arc;

use async_trait::async_trait;
use kube::config::KubeConfigOptions;
use kube::{Client, Config};
use tracing::info;

use podsettle_core::{ClusterConfig, ClusterConnector, ConnectionError, EventSources};

use crate::events::{LegacyEventSource, StructuredEventSource};

/// Structured events as primary, legacy events as fallback.
pub fn event_sources(client: Client) -> EventSources {
    EventSources::new(
        Arc::new(StructuredEventSource::new(client.clone())),
        Arc::new(LegacyEventSource::new(client)),
    )
}

/// Connects with kubeconfig or in-cluster configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct KubeConnector;

impl KubeConnector {
    async fn load_config(cluster: &ClusterConfig) -> Result<Config, ConnectionError> {
        match &cluster.context {
            Some(context) => {
                let options = KubeConfigOptions {
                    context: Some(context.clone()),
                    ..Default::default()
                };
                Config::from_kubeconfig(&options)
                    .await
                    .map_err(|e| ConnectionError::Config(e.to_string()))
            }
            None => Config::infer()
                .await
                .map_err(|e| ConnectionError::Config(e.to_string())),
        }
    }
}

#[async_trait]
impl ClusterConnector for KubeConnector {
    async fn connect(&self, cluster: &ClusterConfig) -> Result<EventSources, ConnectionError> {
        let config = Self::load_config(cluster).await?;
        info!(cluster_url = %config.cluster_url, "connecting to cluster");
        let client = Client::try_from(config).map_err(|e| ConnectionError::Client(e.to_string()))?;
        Ok(event_sources(client))
    }
}
