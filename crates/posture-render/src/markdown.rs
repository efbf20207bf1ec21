use crate::{RenderableOutcome, RenderableReport, RenderableVerdict};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Posture report\n\n");
    let verdict = match report.verdict {
        RenderableVerdict::Pass => "PASS",
        RenderableVerdict::Fail => "FAIL",
        RenderableVerdict::Error => "ERROR",
    };
    let s = &report.summary;
    out.push_str(&format!(
        "- Verdict: **{}**\n- Profile: {} (fail on: {})\n- Requests: {} ({} allowed, {} denied, {} skipped, {} errors)\n\n",
        verdict,
        code_span(&s.profile),
        code_span(&s.fail_on),
        s.requests,
        s.allowed,
        s.denied,
        s.skipped,
        s.errors
    ));

    if !report.errors.is_empty() {
        out.push_str("## Errors\n\n");
        for e in &report.errors {
            match &e.subject {
                Some(subject) => out.push_str(&format!(
                    "- {} on {}: {}\n",
                    code_span(&e.kind),
                    code_span(subject),
                    e.message
                )),
                None => out.push_str(&format!("- {}: {}\n", code_span(&e.kind), e.message)),
            }
        }
        out.push('\n');
    }

    let denies: Vec<_> = report
        .decisions
        .iter()
        .filter(|d| d.outcome == RenderableOutcome::Deny)
        .collect();

    if denies.is_empty() {
        out.push_str("No denied resources.\n");
        return out;
    }

    out.push_str("## Denied\n\n");

    for d in denies {
        let title = d.title.as_deref().unwrap_or(&d.kind);
        if d.locator.is_empty() {
            out.push_str(&format!(
                "- [{}] {}: {} ({})\n",
                d.severity.label(),
                code_span(&d.subject),
                title,
                code_span(&d.kind)
            ));
        } else {
            out.push_str(&format!(
                "- [{}] {}: {} ({}, at {})\n",
                d.severity.label(),
                code_span(&d.subject),
                title,
                code_span(&d.kind),
                code_span(&d.locator)
            ));
        }

        if let Some(remediation) = &d.remediation {
            out.push_str(&format!("  - fix: {}\n", remediation));
        }
    }

    out
}

/// Inline code whose fence is longer than any backtick run inside `text`.
fn code_span(text: &str) -> String {
    let longest_run = text
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run + 1);
    if text.starts_with('`') || text.ends_with('`') {
        format!("{fence} {text} {fence}")
    } else {
        format!("{fence}{text}{fence}")
    }
}
