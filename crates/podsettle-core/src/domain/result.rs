//! Final check outcome.

use serde::{Deserialize, Serialize};

/// Single pass/fail result of a check, shaped like a JUnit test case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestResult {
    /// Test case name.
    pub name: String,

    /// Whether the check passed.
    pub passed: bool,

    /// Newline-delimited failure detail (empty if passed).
    pub failure_detail: String,

    /// Captured output; advisory soft errors on pass, the detail on failure.
    pub system_out: String,
}

impl TestResult {
    /// A passing result with optional advisory output.
    pub fn pass(name: impl Into<String>, system_out: String) -> Self {
        Self {
            name: name.into(),
            passed: true,
            failure_detail: String::new(),
            system_out,
        }
    }

    /// A failing result; `system_out` mirrors the detail.
    pub fn fail(name: impl Into<String>, failure_detail: String) -> Self {
        Self {
            name: name.into(),
            passed: false,
            system_out: failure_detail.clone(),
            failure_detail,
        }
    }
}
