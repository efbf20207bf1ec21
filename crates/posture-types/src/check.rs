use crate::Severity;
use std::collections::BTreeMap;

/// Static metadata for one check.
///
/// Instances are `const` tables owned by the check catalog; nothing here is
/// computed at evaluation time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckMeta {
    /// Stable check identifier, emitted as `header.kind`.
    pub kind: &'static str,
    pub title: &'static str,
    pub category: &'static str,
    /// Severity emitted on deny when the caller supplies no override.
    pub default_severity: Severity,
    /// Compliance cross-references and review flags, emitted as `header.annotations`.
    pub annotations: &'static [(&'static str, &'static str)],
}

impl CheckMeta {
    /// Annotations as emitted in the decision header.
    ///
    /// `category` is always present and reflects [`CheckMeta::category`].
    pub fn annotations_map(&self) -> BTreeMap<String, String> {
        let mut map: BTreeMap<String, String> = self
            .annotations
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        map.insert(
            crate::ids::ANNOTATION_CATEGORY.to_string(),
            self.category.to_string(),
        );
        map
    }
}
