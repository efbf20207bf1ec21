use crate::decision::DecisionInput;
use crate::engine::{CheckLookup, EvaluationRequest};
use crate::policy::{CheckPolicy, EffectiveConfig, FailOn};
use posture_types::{CheckMeta, Severity, ids};
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;

pub const ROOT_KEY: CheckMeta = CheckMeta {
    kind: ids::CHECK_AWS_IAM_ROOT_ACCESS_KEY_ABSENT,
    title: "Root account has no access keys",
    category: "iam",
    default_severity: Severity::Critical,
    annotations: &[(ids::ANNOTATION_CIS_AWS, "1.4")],
};

pub const S3_LOGGING: CheckMeta = CheckMeta {
    kind: ids::CHECK_AWS_S3_BUCKET_ACCESS_LOGGING_ENABLED,
    title: "S3 bucket access logging enabled",
    category: "logging",
    default_severity: Severity::Low,
    annotations: &[(ids::ANNOTATION_CIS_AWS, "3.6")],
};

pub const S3_ENCRYPTION: CheckMeta = CheckMeta {
    kind: ids::CHECK_AWS_S3_BUCKET_ENCRYPTION_ENABLED,
    title: "S3 bucket default encryption enabled",
    category: "storage",
    default_severity: Severity::Medium,
    annotations: &[
        (ids::ANNOTATION_CIS_AWS, "2.1.1"),
        (ids::ANNOTATION_MANUAL_REVIEW, "false"),
    ],
};

pub const CATALOG: &[CheckMeta] = &[ROOT_KEY, S3_LOGGING, S3_ENCRYPTION];

/// Same checks as [`CATALOG`], but every payload must carry a string `bucket`.
pub struct BucketShapedCatalog;

impl CheckLookup for BucketShapedCatalog {
    fn lookup(&self, kind: &str) -> Option<&CheckMeta> {
        CATALOG.lookup(kind)
    }

    fn check_payload(&self, _kind: &str, payload: &Value) -> Result<(), serde_json::Error> {
        #[derive(Deserialize)]
        #[allow(dead_code)]
        struct BucketPayload {
            bucket: String,
        }
        BucketPayload::deserialize(payload).map(drop)
    }
}

pub fn bucket_payload() -> Value {
    json!({ "bucket": "my-bucket" })
}

pub fn request(kind: &str, allowed: bool, subject: &str) -> EvaluationRequest {
    EvaluationRequest {
        kind: kind.to_string(),
        input: DecisionInput::new(allowed, subject, bucket_payload()),
        params: None,
    }
}

pub fn config(fail_on: FailOn) -> EffectiveConfig {
    EffectiveConfig {
        profile: "test".to_string(),
        fail_on,
        checks: BTreeMap::new(),
    }
}

pub fn config_with_policy(kind: &str, policy: CheckPolicy) -> EffectiveConfig {
    let mut cfg = config(FailOn::AtLeast(Severity::High));
    cfg.checks.insert(kind.to_string(), policy);
    cfg
}
