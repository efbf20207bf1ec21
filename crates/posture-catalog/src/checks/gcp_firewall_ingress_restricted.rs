//! Firewall rules must not expose administrative ports to the internet.

use crate::{CheckEntry, payload_shape};
use posture_domain::{DecisionError, DecisionInput, ExceptionParams, assemble};
use posture_types::{CheckMeta, Decision, Severity, ids};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const META: CheckMeta = CheckMeta {
    kind: ids::CHECK_GCP_FIREWALL_INGRESS_RESTRICTED,
    title: "GCP firewall ingress restricted",
    category: "network",
    default_severity: Severity::High,
    annotations: &[
        (ids::ANNOTATION_CIS_GCP, "3.6"),
        (ids::ANNOTATION_NIST_800_53, "SC-7"),
        (ids::ANNOTATION_MANUAL_REVIEW, "false"),
    ],
};

pub const ENTRY: CheckEntry = CheckEntry {
    meta: META,
    validate_payload: payload_shape::<FirewallIngressPayload>,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FirewallIngressPayload {
    pub network: String,
    pub rule: String,
    #[serde(default)]
    pub exposed_ports: Vec<u16>,
    /// Source ranges open to the world (`0.0.0.0/0`, `::/0`).
    #[serde(default)]
    pub source_ranges: Vec<String>,
}

pub fn decide(
    input: DecisionInput<FirewallIngressPayload>,
    exceptions: Option<&ExceptionParams>,
) -> Result<Decision<FirewallIngressPayload>, DecisionError> {
    assemble(&META, input, exceptions)
}
