//! One module per check: static metadata, typed payload, typed constructor.

#[cfg(feature = "check-aws-iam-access-key-rotated")]
pub mod aws_iam_access_key_rotated;
#[cfg(feature = "check-aws-iam-root-access-key-absent")]
pub mod aws_iam_root_access_key_absent;
#[cfg(feature = "check-aws-s3-bucket-access-logging-enabled")]
pub mod aws_s3_bucket_access_logging_enabled;
#[cfg(feature = "check-aws-s3-bucket-encryption-enabled")]
pub mod aws_s3_bucket_encryption_enabled;
#[cfg(feature = "check-aws-s3-bucket-public-access-blocked")]
pub mod aws_s3_bucket_public_access_blocked;
#[cfg(feature = "check-dependency-no-known-vulnerabilities")]
pub mod dependency_no_known_vulnerabilities;
#[cfg(feature = "check-gcp-firewall-ingress-restricted")]
pub mod gcp_firewall_ingress_restricted;
#[cfg(feature = "check-github-branch-protection-enabled")]
pub mod github_branch_protection_enabled;

#[cfg(all(
    test,
    feature = "check-aws-iam-access-key-rotated",
    feature = "check-aws-iam-root-access-key-absent",
    feature = "check-aws-s3-bucket-access-logging-enabled",
    feature = "check-aws-s3-bucket-encryption-enabled",
    feature = "check-aws-s3-bucket-public-access-blocked",
    feature = "check-dependency-no-known-vulnerabilities",
    feature = "check-gcp-firewall-ingress-restricted",
    feature = "check-github-branch-protection-enabled",
))]
