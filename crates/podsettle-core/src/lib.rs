//! podsettle core
//!
//! Decides whether "static pod didn't show up" failures seen in a cluster's
//! event stream were transient or real:
//! - extracts failure facts from operator event notes
//! - searches later events for proof the node reached the target revision
//! - double-checks the legacy event API when the structured one has no proof
//! - reduces everything to a single pass/fail test result

pub mod check;
pub mod config;
pub mod correlate;
pub mod domain;
pub mod error;
pub mod extract;
pub mod fakes;
pub mod fallback;
pub mod matcher;
pub mod obs;
pub mod report;
pub mod reporting;
pub mod source;
pub mod telemetry;

pub use check::{run_check, run_check_detailed, CheckOutcome, ClusterConnector};
pub use config::{CheckConfig, ClusterConfig};
pub use correlate::{Correlation, CorrelationEngine, FactVerdict};
pub use domain::{EventRecord, EvidenceSource, FailureFact, SourceKind, TestResult, Verdict};
pub use error::{ConfigError, ConnectionError, ExtractionError, SoftError, SourceError};
pub use extract::{extract, FailureExtractor, TemplateExtractor};
pub use fallback::{FallbackOutcome, FallbackVerifier};
pub use matcher::RecoveryMatcher;
pub use report::ReportBuilder;
pub use reporting::{render_result_md, write_result_json, CheckArtifact};
pub use source::{EventSource, EventSources, SourceResult};
pub use telemetry::init_tracing;

/// podsettle version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
