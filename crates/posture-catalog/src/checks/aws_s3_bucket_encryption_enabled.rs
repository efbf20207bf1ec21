use crate::{CheckEntry, payload_shape};
use posture_domain::{DecisionError, DecisionInput, ExceptionParams, assemble};
use posture_types::{CheckMeta, Decision, Severity, ids};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const META: CheckMeta = CheckMeta {
    kind: ids::CHECK_AWS_S3_BUCKET_ENCRYPTION_ENABLED,
    title: "S3 bucket default encryption enabled",
    category: "storage",
    default_severity: Severity::Medium,
    annotations: &[
        (ids::ANNOTATION_CIS_AWS, "2.1.1"),
        (ids::ANNOTATION_NIST_800_53, "SC-28"),
        (ids::ANNOTATION_PCI_DSS, "3.4"),
        (ids::ANNOTATION_MANUAL_REVIEW, "false"),
    ],
};

pub const ENTRY: CheckEntry = CheckEntry {
    meta: META,
    validate_payload: payload_shape::<EncryptionPayload>,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EncryptionPayload {
    pub bucket: String,
    /// `AES256`, `aws:kms`, ... when a default rule exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sse_algorithm: Option<String>,
}

pub fn decide(
    input: DecisionInput<EncryptionPayload>,
    exceptions: Option<&ExceptionParams>,
) -> Result<Decision<EncryptionPayload>, DecisionError> {
    assemble(&META, input, exceptions)
}
