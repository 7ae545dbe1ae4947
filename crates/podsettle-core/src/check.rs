//! End-to-end static pod check.
//!
//! Connects to the cluster, correlates failures across the configured
//! namespaces and returns a single [`TestResult`]. A connection failure is the
//! only fatal error: it short-circuits the check and becomes the whole result.

use async_trait::async_trait;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::{CheckConfig, ClusterConfig};
use crate::correlate::{Correlation, CorrelationEngine};
use crate::domain::TestResult;
use crate::error::ConnectionError;
use crate::obs;
use crate::report::ReportBuilder;
use crate::source::EventSources;

/// Builds the event sources for a cluster.
#[async_trait]
pub trait ClusterConnector: Send + Sync {
    async fn connect(&self, config: &ClusterConfig) -> Result<EventSources, ConnectionError>;
}

/// Result of a check plus the correlation behind it.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub check_id: Uuid,
    pub result: TestResult,
    pub correlation: Correlation,
}

/// Run the check and return only its test result.
pub async fn run_check(connector: &dyn ClusterConnector, config: &CheckConfig) -> TestResult {
    run_check_detailed(connector, config).await.result
}

/// Run the check and keep the correlation for reporting.
pub async fn run_check_detailed(
    connector: &dyn ClusterConnector,
    config: &CheckConfig,
) -> CheckOutcome {
    let check_id = Uuid::new_v4();
    async move {
        obs::emit_check_started(&config.test_name, config.namespaces.len());

        let sources = match connector.connect(&config.cluster).await {
            Ok(sources) => sources,
            Err(err) => {
                let correlation = Correlation::default();
                let result =
                    ReportBuilder::build(&config.test_name, &[err.to_string()], &correlation);
                obs::emit_check_finished(false, 0, 0, 0);
                return CheckOutcome {
                    check_id,
                    result,
                    correlation,
                };
            }
        };

        let engine = CorrelationEngine::new(sources, config);
        let correlation = engine.correlate(&config.namespaces).await;
        let result = ReportBuilder::build(&config.test_name, &[], &correlation);

        obs::emit_check_finished(
            result.passed,
            correlation.verdicts.len(),
            correlation.unresolved_count(),
            correlation.soft_errors.len(),
        );

        CheckOutcome {
            check_id,
            result,
            correlation,
        }
    }
    .instrument(obs::check_span(&check_id))
    .await
}
