//! IAM user access keys must be rotated within the configured window.

use crate::{CheckEntry, payload_shape};
use posture_domain::{DecisionError, DecisionInput, ExceptionParams, assemble};
use posture_types::{CheckMeta, Decision, Severity, ids};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const META: CheckMeta = CheckMeta {
    kind: ids::CHECK_AWS_IAM_ACCESS_KEY_ROTATED,
    title: "IAM access keys are rotated",
    category: "iam",
    default_severity: Severity::Medium,
    annotations: &[
        (ids::ANNOTATION_CIS_AWS, "1.14"),
        (ids::ANNOTATION_NIST_800_53, "IA-5(1)"),
        (ids::ANNOTATION_SOC2, "CC6.1"),
        (ids::ANNOTATION_MANUAL_REVIEW, "false"),
    ],
};

pub const ENTRY: CheckEntry = CheckEntry {
    meta: META,
    validate_payload: payload_shape::<AccessKeyRotationPayload>,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UnrotatedKey {
    pub access_key_id: String,
    pub age_days: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AccessKeyRotationPayload {
    pub user_name: String,
    pub max_age_days: u32,
    #[serde(default)]
    pub unrotated_keys: Vec<UnrotatedKey>,
}

pub fn decide(
    input: DecisionInput<AccessKeyRotationPayload>,
    exceptions: Option<&ExceptionParams>,
) -> Result<Decision<AccessKeyRotationPayload>, DecisionError> {
    assemble(&META, input, exceptions)
}
