//! Conformance tooling for the stublibc stub table.
//!
//! Probes every stub through its C entry point, checks the observed return
//! value and errno against the table, and renders reports plus a JSONL
//! structured log.

pub mod probes;
pub mod report;
pub mod structured_log;
pub mod verify;

pub use report::{ConformanceReport, TableRow, table_digest};
pub use verify::{VerificationResult, VerificationSummary};
