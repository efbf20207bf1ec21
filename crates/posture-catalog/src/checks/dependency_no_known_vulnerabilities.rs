//! Resolved dependency versions must not match a published advisory.
//!
//! Advisories often need triage (reachability, compensating controls), so the
//! check is flagged for manual review.

use crate::{CheckEntry, payload_shape};
use posture_domain::{DecisionError, DecisionInput, ExceptionParams, assemble};
use posture_types::{CheckMeta, Decision, Severity, ids};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const META: CheckMeta = CheckMeta {
    kind: ids::CHECK_DEPENDENCY_NO_KNOWN_VULNERABILITIES,
    title: "Dependency has no known vulnerabilities",
    category: "supply_chain",
    default_severity: Severity::High,
    annotations: &[
        (ids::ANNOTATION_OPENSSF_SCORECARD, "Vulnerabilities"),
        (ids::ANNOTATION_NIST_800_53, "RA-5"),
        (ids::ANNOTATION_MANUAL_REVIEW, "true"),
    ],
};

pub const ENTRY: CheckEntry = CheckEntry {
    meta: META,
    validate_payload: payload_shape::<VulnerabilityPayload>,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VulnerabilityPayload {
    pub package: String,
    pub version: String,
    /// Advisory identifiers (GHSA, CVE, RUSTSEC, ...).
    #[serde(default)]
    pub advisories: Vec<String>,
}

pub fn decide(
    input: DecisionInput<VulnerabilityPayload>,
    exceptions: Option<&ExceptionParams>,
) -> Result<Decision<VulnerabilityPayload>, DecisionError> {
    assemble(&META, input, exceptions)
}
