use crate::{RenderableOutcome, RenderableReport, RenderableSeverity};

/// Render deny decisions and evaluation errors as GitHub Actions workflow
/// command annotations.
///
/// Format:
/// `::{level} file={path},line={line}::{message}`
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    let mut out = Vec::new();

    for d in &report.decisions {
        if d.outcome != RenderableOutcome::Deny {
            continue;
        }
        let level = match d.severity {
            RenderableSeverity::Critical | RenderableSeverity::High => "error",
            RenderableSeverity::Medium | RenderableSeverity::Low => "warning",
            RenderableSeverity::Info => "notice",
        };

        let meta = locator_meta(&d.locator);
        let message = match &d.title {
            Some(title) => format!("[{}] {}: {}", d.kind, d.subject, title),
            None => format!("[{}] {}", d.kind, d.subject),
        };
        out.push(command(level, &meta, &message));
    }

    for e in &report.errors {
        let message = match &e.subject {
            Some(subject) => format!("[{}] {}: {}", e.kind, subject, e.message),
            None => format!("[{}] {}", e.kind, e.message),
        };
        out.push(command("error", "", &message));
    }

    out
}

fn command(level: &str, meta: &str, message: &str) -> String {
    let message = escape(message);
    if meta.is_empty() {
        format!("::{}::{}", level, message)
    } else {
        format!("::{} {}::{}", level, meta, message)
    }
}

/// `path:line` becomes `file=path,line=N`; any other non-empty locator is a bare file.
fn locator_meta(locator: &str) -> String {
    if locator.is_empty() {
        return String::new();
    }
    match locator.rsplit_once(':') {
        Some((path, line)) if !path.is_empty() && line.parse::<u32>().is_ok() => {
            format!("file={},line={}", escape_property(path), line)
        }
        _ => format!("file={}", escape_property(locator)),
    }
}

fn escape(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape(s).replace(':', "%3A").replace(',', "%2C")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RenderableVerdict;
    use crate::RenderableError;
    use crate::model::fixtures::{allow, deny, report};

    #[test]
    fn deny_with_line_locator() {
        let mut d = deny(
            RenderableSeverity::Medium,
            "aws_s3_bucket_encryption_enabled",
            "arn:aws:s3:::my-bucket",
            "infra/s3.tf:12",
        );
        d.title = Some("S3 bucket default encryption enabled".to_string());
        let lines = render_github_annotations(&report(RenderableVerdict::Pass, vec![d], Vec::new()));
        insta::assert_snapshot!(
            lines.join("\n"),
            @"::warning file=infra/s3.tf,line=12::[aws_s3_bucket_encryption_enabled] arn:aws:s3:::my-bucket: S3 bucket default encryption enabled"
        );
    }

    #[test]
    fn allows_are_not_annotated() {
        let lines = render_github_annotations(&report(
            RenderableVerdict::Pass,
            vec![allow("aws_iam_root_access_key_absent", "acct")],
            Vec::new(),
        ));
        assert!(lines.is_empty());
    }

    #[test]
    fn levels_follow_severity_and_errors_come_last() {
        let lines = render_github_annotations(&report(
            RenderableVerdict::Error,
            vec![
                deny(RenderableSeverity::Critical, "a", "s1", ""),
                deny(RenderableSeverity::Low, "b", "s2", "main.tf"),
                deny(RenderableSeverity::Info, "c", "s3", ""),
            ],
            vec![RenderableError {
                kind: "d".to_string(),
                subject: None,
                message: "resource_exceptions must be string[]\n(element 0 is number)".to_string(),
            }],
        ));
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "::error::[a] s1");
        assert_eq!(lines[1], "::warning file=main.tf::[b] s2");
        assert_eq!(lines[2], "::notice::[c] s3");
        insta::assert_snapshot!(
            lines[3],
            @"::error::[d] resource_exceptions must be string[]%0A(element 0 is number)"
        );
    }

    #[test]
    fn non_numeric_suffix_is_part_of_the_path() {
        assert_eq!(locator_meta("arn:aws:s3:::bucket"), "file=arn%3Aaws%3As3%3A%3A%3Abucket");
        assert_eq!(locator_meta("a.tf:7"), "file=a.tf,line=7");
        assert_eq!(locator_meta(":7"), "file=%3A7");
    }
}
