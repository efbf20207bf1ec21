use posture_domain::policy::{CheckPolicy, EffectiveConfig, FailOn};
use posture_types::Severity;
use std::collections::BTreeMap;

pub const DEFAULT_PROFILE: &str = "standard";

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into repo config.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        "strict" => strict_profile(),
        "audit" => audit_profile(),
        // default
        _ => standard_profile(),
    }
}

fn strict_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "strict".to_string(),
        fail_on: FailOn::AtLeast(Severity::Low),
        checks: default_checks(),
    }
}

fn standard_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: DEFAULT_PROFILE.to_string(),
        fail_on: FailOn::AtLeast(Severity::High),
        checks: default_checks(),
    }
}

fn audit_profile() -> EffectiveConfig {
    // Report everything, never fail.
    EffectiveConfig {
        profile: "audit".to_string(),
        fail_on: FailOn::Never,
        checks: default_checks(),
    }
}

fn default_checks() -> BTreeMap<String, CheckPolicy> {
    posture_catalog::builtin_checks()
        .into_iter()
        .map(|meta| (meta.kind.to_string(), CheckPolicy::enabled()))
        .collect()
}
