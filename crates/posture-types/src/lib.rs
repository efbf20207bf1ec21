//! Stable DTOs and IDs used across the posture workspace.
//!
//! This crate is intentionally boring:
//! - the decision record every check emits
//! - the report envelope produced by batch evaluation
//! - stable check kinds and annotation keys
//! - static per-check metadata shape
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod check;
pub mod decision;
pub mod explain;
pub mod ids;
pub mod report;
pub mod subject;

pub use check::CheckMeta;
pub use decision::{API_VERSION, Decision, DecisionHeader, DecisionType, Severity};
pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use report::{
    EvaluationError, PostureReport, PostureReportV1, ReportEnvelope, ReportSummary,
    ReportVerdict, SCHEMA_REPORT_V1, SeverityCounts, ToolMeta,
};
pub use subject::ResourceId;
