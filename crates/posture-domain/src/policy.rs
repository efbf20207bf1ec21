use crate::exceptions::ExceptionParams;
use posture_types::Severity;
use std::collections::BTreeMap;

/// Lowest deny severity that fails a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOn {
    Never,
    AtLeast(Severity),
}

impl FailOn {
    pub fn fails(self, severity: Severity) -> bool {
        match self {
            FailOn::Never => false,
            FailOn::AtLeast(threshold) => severity >= threshold,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FailOn::Never => "never",
            FailOn::AtLeast(sev) => sev.as_str(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CheckPolicy {
    pub enabled: bool,
    /// Configured deny severity; a per-request override still wins.
    pub severity: Option<Severity>,
    pub exceptions: ExceptionParams,
}

impl CheckPolicy {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            severity: None,
            exceptions: ExceptionParams::default(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            severity: None,
            exceptions: ExceptionParams::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EffectiveConfig {
    pub profile: String,
    pub fail_on: FailOn,
    pub checks: BTreeMap<String, CheckPolicy>,
}

impl EffectiveConfig {
    /// Policy for an enabled check. Kinds without an entry are not covered here;
    /// the engine evaluates them with catalog defaults.
    pub fn check_policy(&self, kind: &str) -> Option<&CheckPolicy> {
        self.checks.get(kind).filter(|p| p.enabled)
    }

    pub fn is_disabled(&self, kind: &str) -> bool {
        self.checks.get(kind).is_some_and(|p| !p.enabled)
    }
}
