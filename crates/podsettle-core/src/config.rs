//! Check configuration.
//!
//! Layers, lowest precedence first: compiled-in defaults, an optional TOML
//! file, then `PODSETTLE_*` environment variables. The CLI applies its own
//! flags on top.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Name reported on the check's test result.
pub const DEFAULT_TEST_NAME: &str = "[sig-node] static pods should start after being created";

/// Reason of clusteroperator status change events, skipped before extraction.
pub const DEFAULT_NOISY_REASON: &str = "OperatorStatusChanged";

/// Reason of events announcing a node reached a new static pod revision.
pub const DEFAULT_RECOVERY_REASON: &str = "NodeCurrentRevisionChanged";

/// Operator namespaces that manage static pods.
pub const DEFAULT_NAMESPACES: [&str; 4] = [
    "openshift-etcd-operator",
    "openshift-kube-apiserver-operator",
    "openshift-kube-controller-manager-operator",
    "openshift-kube-scheduler-operator",
];

/// Comma-separated namespace override.
pub const NAMESPACES_ENV: &str = "PODSETTLE_NAMESPACES";

/// Kubeconfig context override.
pub const KUBE_CONTEXT_ENV: &str = "PODSETTLE_KUBE_CONTEXT";

/// How to reach the cluster.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClusterConfig {
    /// Kubeconfig context to use. `None` infers in-cluster or current context.
    pub context: Option<String>,
}

/// Configuration for one static pod check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CheckConfig {
    /// Test case name on the result.
    pub test_name: String,

    /// Namespaces scanned for failures. Scanned in sorted order.
    pub namespaces: BTreeSet<String>,

    /// Reason skipped before extraction.
    pub noisy_reason: String,

    /// Reason that marks recovery evidence.
    pub recovery_reason: String,

    /// Cluster connection settings.
    pub cluster: ClusterConfig,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            test_name: DEFAULT_TEST_NAME.to_string(),
            namespaces: DEFAULT_NAMESPACES.iter().map(|ns| ns.to_string()).collect(),
            noisy_reason: DEFAULT_NOISY_REASON.to_string(),
            recovery_reason: DEFAULT_RECOVERY_REASON.to_string(),
            cluster: ClusterConfig::default(),
        }
    }
}

impl CheckConfig {
    /// Defaults overlaid with environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Load a TOML file; missing keys keep their defaults.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Overlay `PODSETTLE_NAMESPACES` and `PODSETTLE_KUBE_CONTEXT` if set.
    pub fn apply_env(&mut self) {
        if let Ok(raw) = std::env::var(NAMESPACES_ENV) {
            let namespaces = parse_namespace_list(&raw);
            if !namespaces.is_empty() {
                self.namespaces = namespaces;
            }
        }
        if let Ok(context) = std::env::var(KUBE_CONTEXT_ENV) {
            if !context.trim().is_empty() {
                self.cluster.context = Some(context.trim().to_string());
            }
        }
    }

    /// Replace the namespace set.
    pub fn with_namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namespaces = namespaces.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.namespaces.is_empty() {
            return Err(ConfigError::NoNamespaces);
        }
        if self.namespaces.iter().any(|ns| ns.trim().is_empty()) {
            return Err(ConfigError::EmptyNamespace);
        }
        Ok(())
    }
}

/// Split a comma-separated namespace list, dropping blanks.
pub fn parse_namespace_list(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|ns| !ns.is_empty())
        .map(str::to_string)
        .collect()
}
