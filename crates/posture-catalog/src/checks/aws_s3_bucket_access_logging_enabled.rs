use crate::{CheckEntry, payload_shape};
use posture_domain::{DecisionError, DecisionInput, ExceptionParams, assemble};
use posture_types::{CheckMeta, Decision, Severity, ids};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const META: CheckMeta = CheckMeta {
    kind: ids::CHECK_AWS_S3_BUCKET_ACCESS_LOGGING_ENABLED,
    title: "S3 bucket access logging enabled",
    category: "logging",
    default_severity: Severity::Low,
    annotations: &[
        (ids::ANNOTATION_CIS_AWS, "3.6"),
        (ids::ANNOTATION_NIST_800_53, "AU-2"),
        (ids::ANNOTATION_MANUAL_REVIEW, "false"),
    ],
};

pub const ENTRY: CheckEntry = CheckEntry {
    meta: META,
    validate_payload: payload_shape::<AccessLoggingPayload>,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AccessLoggingPayload {
    pub bucket: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_bucket: Option<String>,
}

pub fn decide(
    input: DecisionInput<AccessLoggingPayload>,
    exceptions: Option<&ExceptionParams>,
) -> Result<Decision<AccessLoggingPayload>, DecisionError> {
    assemble(&META, input, exceptions)
}
