use anyhow::Context;
use posture_catalog::Catalog;
use posture_render::{
    RenderableDecision, RenderableError, RenderableOutcome, RenderableReport, RenderableSeverity,
    RenderableSummary, RenderableVerdict,
};
use posture_types::{
    Decision, DecisionType, EvaluationError, PostureReport, ReportSummary, ReportVerdict,
    SCHEMA_REPORT_V1, Severity, ToolMeta, explain, ids,
};
use time::OffsetDateTime;

pub fn parse_report_json(text: &str) -> anyhow::Result<PostureReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse posture report")
}

pub fn serialize_report(report: &PostureReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

/// Flatten a report for the renderers, enriching decisions with catalog titles
/// and remediation text where the kind is known.
pub fn to_renderable(report: &PostureReport) -> RenderableReport {
    let catalog = Catalog::builtin();
    RenderableReport {
        verdict: match report.verdict {
            ReportVerdict::Pass => RenderableVerdict::Pass,
            ReportVerdict::Fail => RenderableVerdict::Fail,
            ReportVerdict::Error => RenderableVerdict::Error,
        },
        decisions: report
            .decisions
            .iter()
            .filter_map(|d| renderable_decision(d, &catalog))
            .collect(),
        errors: report
            .errors
            .iter()
            .map(|e| RenderableError {
                kind: e.kind.clone(),
                subject: e.subject.as_ref().map(|s| s.as_str().to_string()),
                message: e.message.clone(),
            })
            .collect(),
        summary: RenderableSummary {
            profile: report.summary.profile.clone(),
            fail_on: report.summary.fail_on.clone(),
            requests: report.summary.requests,
            allowed: report.summary.allowed,
            denied: report.summary.denied,
            skipped: report.summary.skipped,
            errors: report.summary.errors,
        },
    }
}

/// `Undetermined` decisions carry no outcome and are not rendered.
fn renderable_decision(d: &Decision, catalog: &Catalog) -> Option<RenderableDecision> {
    let outcome = match d.header.decision_type {
        DecisionType::Allow => RenderableOutcome::Allow,
        DecisionType::Deny => RenderableOutcome::Deny,
        DecisionType::Undetermined => return None,
    };
    Some(RenderableDecision {
        outcome,
        severity: renderable_severity(d.header.severity),
        kind: d.header.kind.clone(),
        subject: d.header.subject.as_str().to_string(),
        locator: d.header.locator.clone(),
        title: catalog.get(&d.header.kind).map(|e| e.meta.title.to_string()),
        remediation: explain::lookup_explanation(&d.header.kind).map(|e| e.remediation.to_string()),
    })
}

fn renderable_severity(severity: Severity) -> RenderableSeverity {
    match severity {
        Severity::Info => RenderableSeverity::Info,
        Severity::Low => RenderableSeverity::Low,
        Severity::Medium => RenderableSeverity::Medium,
        Severity::High => RenderableSeverity::High,
        Severity::Critical => RenderableSeverity::Critical,
    }
}

/// Report written when the tool itself fails before producing decisions.
pub fn runtime_error_report(message: &str) -> PostureReport {
    let now = OffsetDateTime::now_utc();
    PostureReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "posture".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at: now,
        finished_at: now,
        verdict: ReportVerdict::Error,
        decisions: Vec::new(),
        errors: vec![EvaluationError {
            kind: ids::KIND_TOOL_RUNTIME.to_string(),
            subject: None,
            message: message.to_string(),
        }],
        summary: ReportSummary {
            profile: "unknown".to_string(),
            fail_on: "unknown".to_string(),
            errors: 1,
            ..ReportSummary::default()
        },
    }
}
