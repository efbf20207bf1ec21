//! The `evaluate` use case: resolve config, evaluate requests, and produce a report.

use anyhow::Context;
use posture_catalog::Catalog;
use posture_domain::EvaluationRequest;
use posture_settings::{Overrides, ResolvedConfig};
use posture_types::{PostureReport, ReportVerdict, SCHEMA_REPORT_V1, ToolMeta};
use time::OffsetDateTime;

/// Input for the evaluate use case.
#[derive(Clone, Debug)]
pub struct EvaluateInput<'a> {
    /// Evaluation requests: a JSON array or JSON Lines.
    pub requests_text: &'a str,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the evaluate use case.
#[derive(Clone, Debug)]
pub struct EvaluateOutput {
    pub report: PostureReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the evaluate use case: parse config, parse requests, evaluate, produce report.
pub fn run_evaluate(input: EvaluateInput<'_>) -> anyhow::Result<EvaluateOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        posture_settings::PostureConfigV1::default()
    } else {
        posture_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    let resolved = posture_settings::resolve_config(cfg, input.overrides.clone())
        .context("resolve config")?;

    let requests = parse_requests(input.requests_text).context("parse evaluation requests")?;

    let catalog = Catalog::builtin();
    let posture_domain::report::DomainReport {
        verdict,
        decisions,
        errors,
        summary,
    } = posture_domain::evaluate(requests, &catalog, &resolved.effective);

    let finished_at = OffsetDateTime::now_utc();

    let report = PostureReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "posture".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at,
        verdict,
        decisions,
        errors,
        summary,
    };

    Ok(EvaluateOutput {
        report,
        resolved_config: resolved,
    })
}

/// Parse evaluation requests from a JSON array or JSON Lines (one request per line).
pub fn parse_requests(text: &str) -> anyhow::Result<Vec<EvaluationRequest>> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).context("parse request array");
    }

    let mut requests = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let request: EvaluationRequest = serde_json::from_str(line)
            .with_context(|| format!("parse request on line {}", idx + 1))?;
        requests.push(request);
    }
    Ok(requests)
}

/// Map verdict to exit code: 0 = pass, 2 = fail, 1 = error.
pub fn verdict_exit_code(verdict: ReportVerdict) -> i32 {
    match verdict {
        ReportVerdict::Pass => 0,
        ReportVerdict::Fail => 2,
        ReportVerdict::Error => 1,
    }
}
