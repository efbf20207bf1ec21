use crate::decision::{DecisionInput, assemble};
use crate::error::DecisionError;
use crate::exceptions::ExceptionParams;
use crate::policy::{EffectiveConfig, FailOn};
use crate::report::DomainReport;
use posture_types::{
    CheckMeta, Decision, DecisionType, EvaluationError, ReportSummary, ReportVerdict,
    SeverityCounts,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Resolves check kinds to their static metadata.
pub trait CheckLookup {
    fn lookup(&self, kind: &str) -> Option<&CheckMeta>;

    /// Checks a dynamic payload against the shape `kind` expects.
    ///
    /// Metadata-only lookups accept any payload.
    fn check_payload(&self, _kind: &str, _payload: &JsonValue) -> Result<(), serde_json::Error> {
        Ok(())
    }
}

impl CheckLookup for [CheckMeta] {
    fn lookup(&self, kind: &str) -> Option<&CheckMeta> {
        self.iter().find(|m| m.kind == kind)
    }
}

/// One dynamic evaluation: a check kind plus its decision input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub kind: String,
    #[serde(flatten)]
    pub input: DecisionInput<JsonValue>,
    /// Request-scoped exception params; replaces the configured ones when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<JsonValue>,
}

pub fn evaluate<L>(requests: Vec<EvaluationRequest>, lookup: &L, cfg: &EffectiveConfig) -> DomainReport
where
    L: CheckLookup + ?Sized,
{
    let requested = requests.len() as u32;
    let mut decisions: Vec<Decision> = Vec::new();
    let mut errors: Vec<EvaluationError> = Vec::new();
    let mut skipped = 0u32;

    for request in requests {
        match evaluate_one(request, lookup, cfg) {
            Ok(Some(decision)) => decisions.push(decision),
            Ok(None) => skipped += 1,
            Err(err) => errors.push(err),
        }
    }

    // Deterministic ordering for stable reports.
    decisions.sort_by(compare_decisions);

    let mut denied_by_severity = SeverityCounts::default();
    let mut allowed = 0u32;
    let mut denied = 0u32;
    for d in &decisions {
        match d.header.decision_type {
            DecisionType::Deny => {
                denied += 1;
                denied_by_severity.record(d.header.severity);
            }
            DecisionType::Allow => allowed += 1,
            DecisionType::Undetermined => {}
        }
    }

    let verdict = compute_verdict(&decisions, &errors, cfg.fail_on);

    let summary = ReportSummary {
        profile: cfg.profile.clone(),
        fail_on: cfg.fail_on.as_str().to_string(),
        requests: requested,
        allowed,
        denied,
        skipped,
        errors: errors.len() as u32,
        denied_by_severity,
    };

    DomainReport {
        verdict,
        decisions,
        errors,
        summary,
    }
}

/// `Ok(None)` means the check is disabled and the request was skipped.
fn evaluate_one<L>(
    request: EvaluationRequest,
    lookup: &L,
    cfg: &EffectiveConfig,
) -> Result<Option<Decision>, EvaluationError>
where
    L: CheckLookup + ?Sized,
{
    let EvaluationRequest {
        kind,
        mut input,
        params,
    } = request;
    let subject = input.subject.clone();
    let fail = |err: DecisionError| EvaluationError {
        kind: kind.clone(),
        subject: Some(subject.clone()),
        message: err.to_string(),
    };

    let meta = lookup
        .lookup(&kind)
        .ok_or_else(|| fail(DecisionError::UnknownCheck(kind.clone())))?;

    if cfg.is_disabled(&kind) {
        return Ok(None);
    }
    lookup
        .check_payload(&kind, &input.payload)
        .map_err(|err| fail(DecisionError::InvalidPayload(err.to_string())))?;
    let policy = cfg.check_policy(&kind);

    if input.severity.is_none() {
        input.severity = policy.and_then(|p| p.severity);
    }

    let request_params = params
        .as_ref()
        .map(ExceptionParams::from_value)
        .transpose()
        .map_err(&fail)?;
    let exceptions = request_params.as_ref().or(policy.map(|p| &p.exceptions));

    assemble(meta, input, exceptions).map(Some).map_err(&fail)
}

fn compute_verdict(
    decisions: &[Decision],
    errors: &[EvaluationError],
    fail_on: FailOn,
) -> ReportVerdict {
    if !errors.is_empty() {
        return ReportVerdict::Error;
    }

    let failing = decisions.iter().any(|d| {
        d.header.decision_type == DecisionType::Deny && fail_on.fails(d.header.severity)
    });
    if failing {
        return ReportVerdict::Fail;
    }

    ReportVerdict::Pass
}

fn compare_decisions(a: &Decision, b: &Decision) -> std::cmp::Ordering {
    // Ordering priority:
    // 1) deny -> allow -> undetermined
    // 2) severity (critical -> info)
    // 3) kind
    // 4) subject
    // 5) locator
    // 6) payload, compared as canonical JSON text
    let type_rank = |t: DecisionType| match t {
        DecisionType::Deny => 0,
        DecisionType::Allow => 1,
        DecisionType::Undetermined => 2,
    };
    let (ah, bh) = (&a.header, &b.header);

    type_rank(ah.decision_type)
        .cmp(&type_rank(bh.decision_type))
        .then(bh.severity.cmp(&ah.severity))
        .then(ah.kind.cmp(&bh.kind))
        .then(ah.subject.cmp(&bh.subject))
        .then(ah.locator.cmp(&bh.locator))
        .then_with(|| a.payload.to_string().cmp(&b.payload.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::CheckPolicy;
    use crate::test_support::{
        BucketShapedCatalog, CATALOG, ROOT_KEY, S3_ENCRYPTION, S3_LOGGING, config,
        config_with_policy, request,
    };
    use posture_types::{ResourceId, Severity};
    use serde_json::json;

    #[test]
    fn bucket_scenario_deny_then_excepted() {
        let cfg = config(FailOn::AtLeast(Severity::High));
        let report = evaluate(
            vec![request(S3_ENCRYPTION.kind, false, "arn:aws:s3:::my-bucket")],
            CATALOG,
            &cfg,
        );
        let header = &report.decisions[0].header;
        assert_eq!(header.decision_type, DecisionType::Deny);
        assert_eq!(header.severity, Severity::Medium);
        assert_eq!(header.locator, "");
        // medium is below the high threshold
        assert_eq!(report.verdict, ReportVerdict::Pass);

        let mut policy = CheckPolicy::enabled();
        policy.exceptions = ExceptionParams::from_strings(["arn:aws:s3:::my-bucket"]);
        let cfg = config_with_policy(S3_ENCRYPTION.kind, policy);
        let report = evaluate(
            vec![request(S3_ENCRYPTION.kind, false, "arn:aws:s3:::my-bucket")],
            CATALOG,
            &cfg,
        );
        let header = &report.decisions[0].header;
        assert_eq!(header.decision_type, DecisionType::Allow);
        assert_eq!(header.severity, Severity::Info);
    }

    #[test]
    fn unknown_kind_is_an_error_not_a_decision() {
        let cfg = config(FailOn::Never);
        let report = evaluate(vec![request("nope", false, "x")], CATALOG, &cfg);
        assert!(report.decisions.is_empty());
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, "nope");
        assert_eq!(report.errors[0].subject, Some(ResourceId::new("x")));
        assert_eq!(report.verdict, ReportVerdict::Error);
    }

    #[test]
    fn bad_exceptions_abort_only_that_request() {
        let mut policy = CheckPolicy::enabled();
        policy.exceptions = ExceptionParams {
            resource_exceptions: Some(vec![json!(123)]),
        };
        let cfg = config_with_policy(S3_LOGGING.kind, policy);

        let report = evaluate(
            vec![
                request(S3_LOGGING.kind, true, "a"),
                request(ROOT_KEY.kind, true, "b"),
            ],
            CATALOG,
            &cfg,
        );

        assert_eq!(report.decisions.len(), 1);
        assert_eq!(report.decisions[0].header.kind, ROOT_KEY.kind);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].message.contains("resource_exceptions must be string[]"));
        assert_eq!(report.summary.errors, 1);
        assert_eq!(report.summary.allowed, 1);
        assert_eq!(report.verdict, ReportVerdict::Error);
    }

    #[test]
    fn request_params_replace_configured_exceptions() {
        let mut policy = CheckPolicy::enabled();
        policy.exceptions = ExceptionParams::from_strings(["*"]);
        let cfg = config_with_policy(S3_LOGGING.kind, policy);

        let mut req = request(S3_LOGGING.kind, false, "a");
        req.params = Some(json!({ "resource_exceptions": ["b"] }));

        let report = evaluate(vec![req], CATALOG, &cfg);
        assert_eq!(report.decisions[0].header.decision_type, DecisionType::Deny);
    }

    #[test]
    fn malformed_request_params_are_errors() {
        let cfg = config(FailOn::Never);
        let mut req = request(S3_LOGGING.kind, false, "a");
        req.params = Some(json!("not an object"));

        let report = evaluate(vec![req], CATALOG, &cfg);
        assert!(report.decisions.is_empty());
        assert!(report.errors[0].message.contains("invalid exception params"));
    }

    #[test]
    fn severity_precedence_request_then_config_then_default() {
        let mut policy = CheckPolicy::enabled();
        policy.severity = Some(Severity::High);
        let cfg = config_with_policy(S3_LOGGING.kind, policy);

        let mut overridden = request(S3_LOGGING.kind, false, "a");
        overridden.input.severity = Some(Severity::Critical);
        let configured = request(S3_LOGGING.kind, false, "b");
        let defaulted = request(S3_ENCRYPTION.kind, false, "c");

        let report = evaluate(vec![defaulted, configured, overridden], CATALOG, &cfg);
        let severities: Vec<_> = report
            .decisions
            .iter()
            .map(|d| (d.header.subject.as_str().to_string(), d.header.severity))
            .collect();
        assert_eq!(
            severities,
            vec![
                ("a".to_string(), Severity::Critical),
                ("b".to_string(), Severity::High),
                ("c".to_string(), Severity::Medium),
            ]
        );
    }

    #[test]
    fn disabled_checks_are_skipped() {
        let cfg = config_with_policy(S3_LOGGING.kind, CheckPolicy::disabled());
        let report = evaluate(vec![request(S3_LOGGING.kind, false, "a")], CATALOG, &cfg);
        assert!(report.decisions.is_empty());
        assert_eq!(report.summary.skipped, 1);
        assert_eq!(report.summary.requests, 1);
        assert_eq!(report.verdict, ReportVerdict::Pass);
    }

    #[test]
    fn verdict_fails_at_threshold() {
        let cfg = config(FailOn::AtLeast(Severity::Critical));
        let report = evaluate(vec![request(ROOT_KEY.kind, false, "acct")], CATALOG, &cfg);
        assert_eq!(report.verdict, ReportVerdict::Fail);
        assert_eq!(report.summary.denied_by_severity.critical, 1);
    }

    #[test]
    fn ordering_puts_denies_first_by_severity() {
        let cfg = config(FailOn::Never);
        let report = evaluate(
            vec![
                request(S3_LOGGING.kind, true, "z"),
                request(S3_LOGGING.kind, false, "b"),
                request(ROOT_KEY.kind, false, "a"),
                request(S3_ENCRYPTION.kind, false, "c"),
            ],
            CATALOG,
            &cfg,
        );
        let kinds: Vec<_> = report
            .decisions
            .iter()
            .map(|d| (d.header.decision_type, d.header.severity))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (DecisionType::Deny, Severity::Critical),
                (DecisionType::Deny, Severity::Medium),
                (DecisionType::Deny, Severity::Low),
                (DecisionType::Allow, Severity::Info),
            ]
        );
    }

    #[test]
    fn request_deserializes_flattened_input() {
        let req: EvaluationRequest = serde_json::from_value(json!({
            "kind": "aws_s3_bucket_encryption_enabled",
            "allowed": false,
            "subject": "arn:aws:s3:::my-bucket",
            "locator": "main.tf:3",
            "severity": "high",
            "payload": { "bucket": "my-bucket" },
            "params": { "resource_exceptions": ["*"] }
        }))
        .expect("parse request");

        assert_eq!(req.kind, "aws_s3_bucket_encryption_enabled");
        assert_eq!(req.input.severity, Some(Severity::High));
        assert_eq!(req.input.locator.as_deref(), Some("main.tf:3"));
        assert!(req.params.is_some());
    }

    #[test]
    fn payload_shape_mismatch_is_a_per_request_error() {
        let cfg = config(FailOn::AtLeast(Severity::Low));
        let mut bad = request(ROOT_KEY.kind, false, "acct");
        bad.input.payload = json!("not a bucket payload");
        let good = request(S3_ENCRYPTION.kind, false, "arn:aws:s3:::my-bucket");

        let report = evaluate(vec![bad, good], &BucketShapedCatalog, &cfg);

        assert_eq!(report.decisions.len(), 1);
        assert_eq!(report.decisions[0].header.kind, S3_ENCRYPTION.kind);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, ROOT_KEY.kind);
        assert_eq!(report.errors[0].subject, Some(ResourceId::new("acct")));
        assert!(report.errors[0].message.contains("payload does not match check"));
        assert_eq!(report.summary.denied_by_severity.critical, 0);
        assert_eq!(report.verdict, ReportVerdict::Error);
    }

    #[test]
    fn disabled_checks_skip_payload_validation() {
        let cfg = config_with_policy(ROOT_KEY.kind, CheckPolicy::disabled());
        let mut req = request(ROOT_KEY.kind, false, "acct");
        req.input.payload = json!(42);

        let report = evaluate(vec![req], &BucketShapedCatalog, &cfg);
        assert!(report.errors.is_empty());
        assert_eq!(report.summary.skipped, 1);
    }

    #[test]
    fn header_ties_are_ordered_by_payload() {
        let cfg = config(FailOn::Never);
        let mut first = request(S3_LOGGING.kind, false, "a");
        first.input.payload = json!({ "bucket": "b" });
        let mut second = request(S3_LOGGING.kind, false, "a");
        second.input.payload = json!({ "bucket": "a" });

        let forward = evaluate(vec![first.clone(), second.clone()], CATALOG, &cfg);
        let backward = evaluate(vec![second, first], CATALOG, &cfg);

        assert_eq!(forward.decisions, backward.decisions);
        assert_eq!(forward.decisions[0].payload, json!({ "bucket": "a" }));
    }
}
