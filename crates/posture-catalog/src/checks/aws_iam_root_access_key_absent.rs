//! The root user must not hold access keys.

use crate::{CheckEntry, payload_shape};
use posture_domain::{DecisionError, DecisionInput, ExceptionParams, assemble};
use posture_types::{CheckMeta, Decision, Severity, ids};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const META: CheckMeta = CheckMeta {
    kind: ids::CHECK_AWS_IAM_ROOT_ACCESS_KEY_ABSENT,
    title: "Root account has no access keys",
    category: "iam",
    default_severity: Severity::Critical,
    annotations: &[
        (ids::ANNOTATION_CIS_AWS, "1.4"),
        (ids::ANNOTATION_NIST_800_53, "AC-6(2)"),
        (ids::ANNOTATION_SOC2, "CC6.1"),
        (ids::ANNOTATION_MANUAL_REVIEW, "false"),
    ],
};

pub const ENTRY: CheckEntry = CheckEntry {
    meta: META,
    validate_payload: payload_shape::<RootAccessKeyPayload>,
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RootAccessKeyPayload {
    pub account_id: String,
    /// Active access key IDs owned by the root user.
    #[serde(default)]
    pub active_access_key_ids: Vec<String>,
}

pub fn decide(
    input: DecisionInput<RootAccessKeyPayload>,
    exceptions: Option<&ExceptionParams>,
) -> Result<Decision<RootAccessKeyPayload>, DecisionError> {
    assemble(&META, input, exceptions)
}
