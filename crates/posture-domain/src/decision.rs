//! Decision assembly: the shared core every check constructor runs.

use crate::error::DecisionError;
use crate::exceptions::{ExceptionParams, is_excepted};
use posture_types::{
    API_VERSION, CheckMeta, Decision, DecisionHeader, DecisionType, ResourceId, Severity,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The boolean compliance outcome for one subject, before exceptions are folded in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub allowed: bool,
    pub subject: ResourceId,
}

/// Caller input for one check evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionInput<P> {
    pub allowed: bool,
    pub subject: ResourceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locator: Option<String>,
    pub payload: P,
    /// Severity to emit on deny instead of the check's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

impl<P> DecisionInput<P> {
    pub fn new(allowed: bool, subject: impl Into<ResourceId>, payload: P) -> Self {
        Self {
            allowed,
            subject: subject.into(),
            locator: None,
            payload,
            severity: None,
        }
    }

    pub fn with_locator(mut self, locator: impl Into<String>) -> Self {
        self.locator = Some(locator.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn verdict(&self) -> Verdict {
        Verdict {
            allowed: self.allowed,
            subject: self.subject.clone(),
        }
    }
}

/// `true` -> allow, `false` -> deny. Never yields `Undetermined`.
pub fn resolve_decision_type(allowed: bool) -> DecisionType {
    if allowed {
        DecisionType::Allow
    } else {
        DecisionType::Deny
    }
}

/// Severity to emit for a folded verdict.
///
/// An allowed (compliant or excepted) decision is always `Info`; the override
/// only applies on deny.
pub fn resolve_severity(
    folded_allowed: bool,
    default_severity: Severity,
    severity_override: Option<Severity>,
) -> Severity {
    if folded_allowed {
        Severity::Info
    } else {
        severity_override.unwrap_or(default_severity)
    }
}

/// Build the decision record for one check evaluation.
///
/// # Errors
///
/// Returns [`DecisionError`] when the exception list is malformed. No decision
/// is produced in that case.
pub fn assemble<P>(
    meta: &CheckMeta,
    input: DecisionInput<P>,
    exceptions: Option<&ExceptionParams>,
) -> Result<Decision<P>, DecisionError> {
    let folded_allowed = is_excepted(&input.verdict(), exceptions)? || input.allowed;

    let DecisionInput {
        subject,
        locator,
        payload,
        severity,
        ..
    } = input;

    Ok(Decision {
        header: DecisionHeader {
            api_version: API_VERSION.to_string(),
            kind: meta.kind.to_string(),
            subject,
            decision_type: resolve_decision_type(folded_allowed),
            severity: resolve_severity(folded_allowed, meta.default_severity, severity),
            labels: BTreeMap::new(),
            annotations: meta.annotations_map(),
            locator: locator.unwrap_or_default(),
        },
        payload,
    })
}
