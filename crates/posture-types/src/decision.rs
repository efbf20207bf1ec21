use crate::ResourceId;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Stable schema identifier carried in every decision header.
pub const API_VERSION: &str = "posture.decision.v1";

/// Urgency of a non-compliant decision.
///
/// Variants are declared in ascending order so `Ord` compares by urgency.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Info,
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

/// Enforcement verdict of a decision.
///
/// `Undetermined` is the neutral state before any evaluation happened; the
/// decision core itself only ever produces `Allow` or `Deny`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum DecisionType {
    #[default]
    Undetermined,
    Allow,
    Deny,
}

impl DecisionType {
    pub fn as_str(self) -> &'static str {
        match self {
            DecisionType::Undetermined => "undetermined",
            DecisionType::Allow => "allow",
            DecisionType::Deny => "deny",
        }
    }
}

/// Metadata envelope for one policy evaluation result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DecisionHeader {
    pub api_version: String,
    /// Stable identifier of the check that produced this decision.
    pub kind: String,
    pub subject: ResourceId,
    #[serde(rename = "type")]
    pub decision_type: DecisionType,
    pub severity: Severity,
    /// Reserved for external enrichment; always empty when emitted by the core.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    /// Static per-check metadata (compliance references, review flag, category).
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
    /// Free-text pointer to the offending location; empty when not supplied.
    #[serde(default)]
    pub locator: String,
}

/// A single policy evaluation result.
///
/// The payload is opaque to the core. Dynamic callers use the default
/// `serde_json::Value`; typed constructors use a per-check payload struct.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Decision<P = JsonValue> {
    pub header: DecisionHeader,
    pub payload: P,
}
