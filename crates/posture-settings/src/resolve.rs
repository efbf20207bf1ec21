use crate::model::{CONFIG_SCHEMA_V1, PostureConfigV1};
use crate::presets;
use anyhow::Context;
use posture_domain::ExceptionParams;
use posture_domain::policy::{EffectiveConfig, FailOn};
use posture_types::Severity;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub fail_on: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(
    cfg: PostureConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != CONFIG_SCHEMA_V1
    {
        anyhow::bail!("unsupported config schema: {schema} (expected {CONFIG_SCHEMA_V1})");
    }

    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| presets::DEFAULT_PROFILE.to_string());

    let mut effective = presets::preset(&profile);

    // per-check overrides
    for (kind, cc) in cfg.checks {
        let Some(entry) = effective.checks.get_mut(&kind) else {
            anyhow::bail!("unknown check kind in config: {kind}");
        };

        if let Some(enabled) = cc.enabled {
            entry.enabled = enabled;
        }
        if let Some(sev) = cc.severity.as_deref() {
            entry.severity =
                Some(parse_severity(sev).with_context(|| format!("invalid severity for {kind}"))?);
        }
        if let Some(items) = cc.resource_exceptions {
            let params = ExceptionParams {
                resource_exceptions: Some(items),
            };
            params
                .validate()
                .with_context(|| format!("invalid resource_exceptions for {kind}"))?;
            entry.exceptions = params;
        }
    }

    // fail_on: CLI override, then config, then profile default
    if let Some(fail_on_s) = overrides.fail_on.as_deref().or(cfg.fail_on.as_deref()) {
        effective.fail_on = parse_fail_on(fail_on_s)?;
    }

    Ok(ResolvedConfig { effective })
}

pub fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    Severity::ALL
        .into_iter()
        .find(|sev| sev.as_str() == v)
        .with_context(|| format!("unknown severity: {v} (expected info|low|medium|high|critical)"))
}

pub fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    if v == "never" {
        return Ok(FailOn::Never);
    }
    parse_severity(v)
        .map(FailOn::AtLeast)
        .with_context(|| format!("unknown fail_on: {v} (expected never or a severity)"))
}
