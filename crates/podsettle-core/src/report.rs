//! Pass/fail report building.

use crate::correlate::Correlation;
use crate::domain::TestResult;

/// Builds the single test result for a check.
pub struct ReportBuilder;

impl ReportBuilder {
    /// Build the result for a completed (or aborted) correlation.
    ///
    /// Rule:
    /// - Pass when there is no fatal error and every fact was resolved.
    ///   Soft errors alone never fail the check; they are kept in
    ///   `system_out`.
    /// - Otherwise fail. The detail lists fatal errors, then soft errors,
    ///   then the raw note of every unresolved fact in discovery order, one
    ///   per line.
    pub fn build(test_name: &str, fatal_errors: &[String], correlation: &Correlation) -> TestResult {
        let soft: Vec<String> = correlation
            .soft_errors
            .iter()
            .map(|err| err.to_string())
            .collect();
        let unresolved: Vec<&str> = correlation
            .unresolved()
            .map(|fact| fact.raw_message())
            .collect();

        if fatal_errors.is_empty() && unresolved.is_empty() {
            return TestResult::pass(test_name, soft.join("\n"));
        }

        let mut lines: Vec<&str> = Vec::new();
        lines.extend(fatal_errors.iter().map(String::as_str));
        lines.extend(soft.iter().map(String::as_str));
        lines.extend(unresolved);

        TestResult::fail(test_name, lines.join("\n"))
    }
}
