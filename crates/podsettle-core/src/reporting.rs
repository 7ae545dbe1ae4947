//! Report artifacts for CI consumption.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::check::CheckOutcome;
use crate::correlate::FactVerdict;
use crate::domain::TestResult;

/// Canonical check artifact written next to other CI results.
#[derive(Debug, Clone, Serialize)]
pub struct CheckArtifact<'a> {
    pub schema_version: &'static str,
    pub podsettle_version: &'static str,
    pub generated_at: DateTime<Utc>,
    pub check_id: Uuid,
    pub result: &'a TestResult,
    pub verdicts: &'a [FactVerdict],
    pub diagnostics: &'a [String],
}

impl<'a> CheckArtifact<'a> {
    pub fn new(outcome: &'a CheckOutcome) -> Self {
        Self {
            schema_version: "1.0",
            podsettle_version: crate::VERSION,
            generated_at: Utc::now(),
            check_id: outcome.check_id,
            result: &outcome.result,
            verdicts: &outcome.correlation.verdicts,
            diagnostics: &outcome.correlation.diagnostics,
        }
    }
}

/// Write the check artifact as pretty JSON.
pub fn write_result_json(path: &Path, outcome: &CheckOutcome) -> Result<()> {
    let content = serde_json::to_string_pretty(&CheckArtifact::new(outcome))
        .context("serialize check artifact")?;
    std::fs::write(path, content).with_context(|| format!("write {:?}", path))?;
    Ok(())
}

/// Render a markdown summary for PR comments or check output.
pub fn render_result_md(outcome: &CheckOutcome) -> String {
    let result = &outcome.result;
    let correlation = &outcome.correlation;

    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", result.name));
    out.push_str(&format!(
        "- status: {}\n- failures found: {}\n- unresolved: {}\n- resolved via secondary source: {}\n- soft errors: {}\n",
        if result.passed { "passed" } else { "failed" },
        correlation.verdicts.len(),
        correlation.unresolved_count(),
        correlation.resolved_via_secondary(),
        correlation.soft_errors.len()
    ));

    if !result.failure_detail.is_empty() {
        out.push_str("\n## Failure Detail\n");
        for line in result.failure_detail.lines() {
            out.push_str(&format!("- `{}`\n", line));
        }
    }
    out
}
