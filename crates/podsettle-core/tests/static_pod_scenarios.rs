//! End-to-end check scenarios against in-memory event sources.

use std::sync::Arc;

use podsettle_core::config::DEFAULT_RECOVERY_REASON;
use podsettle_core::fakes::{MemoryConnector, MemoryEventSource};
use podsettle_core::{
    run_check, run_check_detailed, CheckConfig, ConnectionError, EventRecord, SourceKind,
};

const ETCD_NS: &str = "openshift-etcd-operator";
const APISERVER_NS: &str = "openshift-kube-apiserver-operator";
const FAILURE: &str = "static pod lifecycle failure - static pod: \"etcd\" in namespace: \"openshift-etcd-operator\" for revision: 6 on node: \"node-1\" didn't show up, waited: 2m30s";
const READY: &str = "Updated node \"node-1\" from revision 5 to 6 because static pod is ready";

struct Cluster {
    structured: Arc<MemoryEventSource>,
    legacy: Arc<MemoryEventSource>,
    connector: MemoryConnector,
}

fn cluster() -> Cluster {
    let structured = Arc::new(MemoryEventSource::new(SourceKind::Structured));
    let legacy = Arc::new(MemoryEventSource::new(SourceKind::Legacy));
    let connector = MemoryConnector::new(structured.clone(), legacy.clone());
    Cluster {
        structured,
        legacy,
        connector,
    }
}

fn structured(ns: &str, reason: &str, text: &str) -> EventRecord {
    EventRecord::new(SourceKind::Structured, ns, reason, text)
}

fn legacy(ns: &str, reason: &str, text: &str) -> EventRecord {
    EventRecord::new(SourceKind::Legacy, ns, reason, text)
}

/// Scenario 1: recovery recorded in the primary source.
#[tokio::test]
async fn test_recovered_in_primary_passes() {
    let c = cluster();
    c.structured.push(structured(ETCD_NS, "StaticPodFailed", FAILURE));
    c.structured.push(structured(ETCD_NS, DEFAULT_RECOVERY_REASON, READY));

    let result = run_check(&c.connector, &CheckConfig::default()).await;

    assert!(result.passed, "detail: {}", result.failure_detail);
    assert!(result.failure_detail.is_empty());
    assert_eq!(c.legacy.list_calls(ETCD_NS), 0);
}

/// Scenario 2: no recovery anywhere.
#[tokio::test]
async fn test_never_recovered_fails_with_raw_message() {
    let c = cluster();
    c.structured.push(structured(ETCD_NS, "StaticPodFailed", FAILURE));

    let result = run_check(&c.connector, &CheckConfig::default()).await;

    assert!(!result.passed);
    assert_eq!(result.failure_detail, FAILURE);
    assert_eq!(c.legacy.list_calls(ETCD_NS), 1);
}

/// Scenario 3: only the legacy API saw the recovery.
#[tokio::test]
async fn test_recovered_in_secondary_passes_with_diagnostic() {
    let c = cluster();
    c.structured.push(structured(ETCD_NS, "StaticPodFailed", FAILURE));
    c.legacy.push(legacy(ETCD_NS, DEFAULT_RECOVERY_REASON, READY));

    let outcome = run_check_detailed(&c.connector, &CheckConfig::default()).await;

    assert!(outcome.result.passed);
    assert_eq!(outcome.correlation.resolved_via_secondary(), 1);
    assert!(outcome
        .correlation
        .diagnostics
        .iter()
        .any(|d| d.contains("legacy events report node node-1 at revision 6")));
}

/// Scenario 4: malformed note is a soft error only.
#[tokio::test]
async fn test_malformed_note_does_not_fail_check() {
    let c = cluster();
    c.structured.push(structured(
        ETCD_NS,
        "StaticPodFailed",
        "static pod lifecycle failure - static pod: \"etcd\" in namespace: \"openshift-etcd-operator\" for revision: 6 on node: \"node-1\", waited: 2m30s",
    ));

    let outcome = run_check_detailed(&c.connector, &CheckConfig::default()).await;

    assert!(outcome.result.passed);
    assert!(outcome.correlation.verdicts.is_empty());
    assert_eq!(outcome.correlation.soft_errors.len(), 1);
    assert!(outcome.result.system_out.contains("does not match"));
}

#[tokio::test]
async fn test_transport_error_with_clean_namespace_passes() {
    let c = cluster();
    c.structured.fail_namespace(ETCD_NS);
    c.structured.push(structured(APISERVER_NS, "Pulled", "pulled image"));

    let config = CheckConfig::default().with_namespaces([ETCD_NS, APISERVER_NS]);
    let outcome = run_check_detailed(&c.connector, &config).await;

    assert!(outcome.result.passed);
    assert_eq!(outcome.correlation.soft_errors.len(), 1);
    assert!(outcome.result.system_out.contains(ETCD_NS));
}

#[tokio::test]
async fn test_transport_error_precedes_unresolved_in_detail() {
    let c = cluster();
    c.structured.fail_namespace(APISERVER_NS);
    c.structured.push(structured(ETCD_NS, "StaticPodFailed", FAILURE));

    let config = CheckConfig::default().with_namespaces([ETCD_NS, APISERVER_NS]);
    let result = run_check(&c.connector, &config).await;

    let lines: Vec<&str> = result.failure_detail.lines().collect();
    assert!(!result.passed);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains(APISERVER_NS));
    assert_eq!(lines[1], FAILURE);
}

#[tokio::test]
async fn test_connection_error_is_sole_failure() {
    let connector = MemoryConnector::failing(ConnectionError::Config(
        "no kubeconfig found".to_string(),
    ));

    let result = run_check(&connector, &CheckConfig::default()).await;

    assert!(!result.passed);
    assert_eq!(
        result.failure_detail,
        "cluster config could not be loaded: no kubeconfig found"
    );
    assert_eq!(result.system_out, result.failure_detail);
}

#[tokio::test]
async fn test_configured_context_reaches_connector() {
    let c = cluster();
    let mut config = CheckConfig::default();
    config.cluster.context = Some("ci-cluster".to_string());

    let result = run_check(&c.connector, &config).await;

    assert!(result.passed);
    assert_eq!(
        c.connector.seen_contexts(),
        vec![Some("ci-cluster".to_string())]
    );
}

#[tokio::test]
async fn test_only_configured_namespaces_are_scanned() {
    let c = cluster();
    c.structured.push(structured(ETCD_NS, "StaticPodFailed", FAILURE));

    let config = CheckConfig::default().with_namespaces([APISERVER_NS]);
    let result = run_check(&c.connector, &config).await;

    assert!(result.passed);
    assert_eq!(c.structured.list_calls(ETCD_NS), 0);
}

#[tokio::test]
async fn test_revision_past_target_is_not_recovery() {
    let c = cluster();
    c.structured.push(structured(ETCD_NS, "StaticPodFailed", FAILURE));
    c.structured.push(structured(
        ETCD_NS,
        DEFAULT_RECOVERY_REASON,
        "Updated node \"node-1\" from revision 5 to 7 because static pod is ready",
    ));

    let result = run_check(&c.connector, &CheckConfig::default()).await;

    assert!(!result.passed);
    assert_eq!(result.failure_detail, FAILURE);
}
