//! Domain models for podsettle.
//!
//! Canonical definitions for the entities flowing through a check:
//! - `EventRecord`: one cluster event, normalised across event APIs
//! - `FailureFact`: a static pod failure extracted from an event note
//! - `Verdict`: whether a failure fact was later resolved
//! - `TestResult`: the single pass/fail outcome of a check

pub mod fact;
pub mod record;
pub mod result;
pub mod verdict;

pub use fact::FailureFact;
pub use record::{EventRecord, SourceKind};
pub use result::TestResult;
pub use verdict::{EvidenceSource, Verdict};
