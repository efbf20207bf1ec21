//! Stable identifiers for checks and annotation keys.
//!
//! Check kinds are `<provider>_<service>_<resource>_<expectation>` snake_case.
//! Annotation keys are dotted.

// Checks: AWS IAM
pub const CHECK_AWS_IAM_ROOT_ACCESS_KEY_ABSENT: &str = "aws_iam_root_access_key_absent";
pub const CHECK_AWS_IAM_ACCESS_KEY_ROTATED: &str = "aws_iam_access_key_rotated";

// Checks: AWS S3
pub const CHECK_AWS_S3_BUCKET_ACCESS_LOGGING_ENABLED: &str =
    "aws_s3_bucket_access_logging_enabled";
pub const CHECK_AWS_S3_BUCKET_ENCRYPTION_ENABLED: &str = "aws_s3_bucket_encryption_enabled";
pub const CHECK_AWS_S3_BUCKET_PUBLIC_ACCESS_BLOCKED: &str = "aws_s3_bucket_public_access_blocked";

// Checks: GCP
pub const CHECK_GCP_FIREWALL_INGRESS_RESTRICTED: &str = "gcp_firewall_ingress_restricted";

// Checks: GitHub
pub const CHECK_GITHUB_BRANCH_PROTECTION_ENABLED: &str = "github_branch_protection_enabled";

// Checks: dependencies
pub const CHECK_DEPENDENCY_NO_KNOWN_VULNERABILITIES: &str = "dependency_no_known_vulnerabilities";

// Annotation keys
pub const ANNOTATION_CATEGORY: &str = "category";
pub const ANNOTATION_MANUAL_REVIEW: &str = "manual_review";
pub const ANNOTATION_CIS_AWS: &str = "compliance.cis_aws";
pub const ANNOTATION_CIS_GCP: &str = "compliance.cis_gcp";
pub const ANNOTATION_NIST_800_53: &str = "compliance.nist_800_53";
pub const ANNOTATION_SOC2: &str = "compliance.soc2";
pub const ANNOTATION_PCI_DSS: &str = "compliance.pci_dss";
pub const ANNOTATION_OPENSSF_SCORECARD: &str = "compliance.openssf_scorecard";

// Tool-level
pub const KIND_TOOL_RUNTIME: &str = "tool.runtime";
