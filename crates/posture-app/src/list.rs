//! The `list` use case: enumerate the compiled-in checks.

use posture_catalog::Catalog;
use posture_types::Severity;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckListing {
    pub kind: &'static str,
    pub title: &'static str,
    pub category: &'static str,
    pub default_severity: Severity,
}

pub fn run_list() -> Vec<CheckListing> {
    Catalog::builtin()
        .all()
        .map(|meta| CheckListing {
            kind: meta.kind,
            title: meta.title,
            category: meta.category,
            default_severity: meta.default_severity,
        })
        .collect()
}

/// One line per check: kind, default severity, category, title.
pub fn format_list(checks: &[CheckListing]) -> String {
    let width = checks.iter().map(|c| c.kind.len()).max().unwrap_or(0);
    let mut out = String::new();
    for c in checks {
        out.push_str(&format!(
            "{:<width$}  {:<8}  {:<14}  {}\n",
            c.kind,
            c.default_severity.as_str(),
            c.category,
            c.title,
            width = width
        ));
    }
    out
}
