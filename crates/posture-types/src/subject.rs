use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of the evaluated resource instance (an ARN, a GCP
/// self-link, `owner/repo`, a package URL, ...).
///
/// No normalization is applied: exception matching is exact string equality,
/// so the identifier is kept byte-for-byte as the caller supplied it.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new<S: Into<String>>(s: S) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        ResourceId::new(value)
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        ResourceId(value)
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
