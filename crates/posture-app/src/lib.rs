//! Use case orchestration for posture.
//!
//! This crate provides the application layer: use cases that coordinate the settings, catalog,
//! domain, and render layers. It is intentionally thin and delegates heavy lifting to the
//! appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod evaluate;
mod explain;
mod list;
mod render;
mod report;

pub use evaluate::{
    EvaluateInput, EvaluateOutput, parse_requests, run_evaluate, verdict_exit_code,
};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use list::{CheckListing, format_list, run_list};
pub use render::{render_annotations, render_markdown};
pub use report::{parse_report_json, runtime_error_report, serialize_report, to_renderable};
