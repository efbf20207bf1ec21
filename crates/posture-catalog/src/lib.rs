//! Central check catalog: static metadata per check and compile-time feature
//! availability.
//!
//! Each check lives in its own module under [`checks`] and is compiled only
//! when its `check-*` feature is enabled (all are on by default).

#![forbid(unsafe_code)]

pub mod checks;

use posture_domain::CheckLookup;
use posture_types::CheckMeta;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

/// One compiled-in check: static metadata plus the shape its payload must have.
#[derive(Clone, Copy)]
pub struct CheckEntry {
    pub meta: CheckMeta,
    pub validate_payload: fn(&JsonValue) -> Result<(), serde_json::Error>,
}

impl std::fmt::Debug for CheckEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckEntry")
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

/// Accepts a payload when it deserializes into `P`.
pub(crate) fn payload_shape<P: DeserializeOwned>(
    payload: &JsonValue,
) -> Result<(), serde_json::Error> {
    P::deserialize(payload).map(drop)
}

/// Every check compiled into this build, in kind order.
pub fn builtin_entries() -> Vec<CheckEntry> {
    #[allow(unused_mut)]
    let mut out: Vec<CheckEntry> = Vec::new();

    #[cfg(feature = "check-aws-iam-access-key-rotated")]
    out.push(checks::aws_iam_access_key_rotated::ENTRY);
    #[cfg(feature = "check-aws-iam-root-access-key-absent")]
    out.push(checks::aws_iam_root_access_key_absent::ENTRY);
    #[cfg(feature = "check-aws-s3-bucket-access-logging-enabled")]
    out.push(checks::aws_s3_bucket_access_logging_enabled::ENTRY);
    #[cfg(feature = "check-aws-s3-bucket-encryption-enabled")]
    out.push(checks::aws_s3_bucket_encryption_enabled::ENTRY);
    #[cfg(feature = "check-aws-s3-bucket-public-access-blocked")]
    out.push(checks::aws_s3_bucket_public_access_blocked::ENTRY);
    #[cfg(feature = "check-dependency-no-known-vulnerabilities")]
    out.push(checks::dependency_no_known_vulnerabilities::ENTRY);
    #[cfg(feature = "check-gcp-firewall-ingress-restricted")]
    out.push(checks::gcp_firewall_ingress_restricted::ENTRY);
    #[cfg(feature = "check-github-branch-protection-enabled")]
    out.push(checks::github_branch_protection_enabled::ENTRY);

    out
}

/// Metadata for every check compiled into this build, in kind order.
pub fn builtin_checks() -> Vec<CheckMeta> {
    builtin_entries().into_iter().map(|e| e.meta).collect()
}

/// Read-only registry over the compiled-in checks.
#[derive(Clone, Debug)]
pub struct Catalog {
    entries: Vec<CheckEntry>,
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            entries: builtin_entries(),
        }
    }

    pub fn all(&self) -> impl Iterator<Item = &CheckMeta> + '_ {
        self.entries.iter().map(|e| &e.meta)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.meta.kind)
    }

    pub fn get(&self, kind: &str) -> Option<&CheckEntry> {
        self.entries.iter().find(|e| e.meta.kind == kind)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CheckLookup for Catalog {
    fn lookup(&self, kind: &str) -> Option<&CheckMeta> {
        self.get(kind).map(|e| &e.meta)
    }

    fn check_payload(&self, kind: &str, payload: &JsonValue) -> Result<(), serde_json::Error> {
        match self.get(kind) {
            Some(entry) => (entry.validate_payload)(payload),
            None => Ok(()),
        }
    }
}
