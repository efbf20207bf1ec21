//! All four public access block settings must be on and no ACL grant may be public.

use crate::{CheckEntry, payload_shape};
use posture_domain::{DecisionError, DecisionInput, ExceptionParams, assemble};
use posture_types::{CheckMeta, Decision, Severity, ids};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const META: CheckMeta = CheckMeta {
    kind: ids::CHECK_AWS_S3_BUCKET_PUBLIC_ACCESS_BLOCKED,
    title: "S3 bucket public access blocked",
    category: "storage",
    default_severity: Severity::High,
    annotations: &[
        (ids::ANNOTATION_CIS_AWS, "2.1.5"),
        (ids::ANNOTATION_NIST_800_53, "AC-3"),
        (ids::ANNOTATION_SOC2, "CC6.6"),
        (ids::ANNOTATION_MANUAL_REVIEW, "false"),
    ],
};

pub const ENTRY: CheckEntry = CheckEntry {
    meta: META,
    validate_payload: payload_shape::<PublicAccessPayload>,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PublicAccessPayload {
    pub bucket: String,
    /// Public access block settings that are off (e.g. `block_public_acls`).
    #[serde(default)]
    pub disabled_blocks: Vec<String>,
    /// ACL grantees that make the bucket public (e.g. `AllUsers`).
    #[serde(default)]
    pub public_grants: Vec<String>,
}

pub fn decide(
    input: DecisionInput<PublicAccessPayload>,
    exceptions: Option<&ExceptionParams>,
) -> Result<Decision<PublicAccessPayload>, DecisionError> {
    assemble(&META, input, exceptions)
}
