use crate::{CheckEntry, payload_shape};
use posture_domain::{DecisionError, DecisionInput, ExceptionParams, assemble};
use posture_types::{CheckMeta, Decision, Severity, ids};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const META: CheckMeta = CheckMeta {
    kind: ids::CHECK_GITHUB_BRANCH_PROTECTION_ENABLED,
    title: "GitHub default branch protected",
    category: "source_control",
    default_severity: Severity::Medium,
    annotations: &[
        (ids::ANNOTATION_OPENSSF_SCORECARD, "Branch-Protection"),
        (ids::ANNOTATION_SOC2, "CC8.1"),
        (ids::ANNOTATION_MANUAL_REVIEW, "false"),
    ],
};

pub const ENTRY: CheckEntry = CheckEntry {
    meta: META,
    validate_payload: payload_shape::<BranchProtectionPayload>,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BranchProtectionPayload {
    /// `owner/name`.
    pub repository: String,
    pub branch: String,
    pub protected: bool,
    pub required_approving_reviews: u32,
    pub minimum_reviews: u32,
}

pub fn decide(
    input: DecisionInput<BranchProtectionPayload>,
    exceptions: Option<&ExceptionParams>,
) -> Result<Decision<BranchProtectionPayload>, DecisionError> {
    assemble(&META, input, exceptions)
}
