//! The `explain` use case: look up check documentation.

use posture_types::explain::{self, Explanation};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    /// Found an explanation for the kind.
    Found(Explanation),
    /// Unknown kind; includes the kinds that are documented.
    NotFound {
        kind: String,
        available_kinds: &'static [&'static str],
    },
}

/// Look up an explanation for a check kind.
pub fn run_explain(kind: &str) -> ExplainOutput {
    match explain::lookup_explanation(kind) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            kind: kind.to_string(),
            available_kinds: explain::all_kinds(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    out.push_str(exp.title);
    out.push('\n');
    out.push_str(&"=".repeat(exp.title.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\n");
    out.push_str("Remediation\n");
    out.push_str("-----------\n");
    out.push_str(&explain::remediation_with_exception_hint(exp));
    out.push_str("\n\n");
    out.push_str("Examples\n");
    out.push_str("--------\n\n");
    out.push_str("Before (denied):\n");
    out.push_str("```\n");
    out.push_str(exp.examples.before);
    out.push('\n');
    out.push_str("```\n\n");
    out.push_str("After (allowed):\n");
    out.push_str("```\n");
    out.push_str(exp.examples.after);
    out.push('\n');
    out.push_str("```\n");

    out
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(kind: &str, available: &[&'static str]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Unknown check kind: {}\n\n", kind));
    out.push_str("Available check kinds:\n");
    for k in available {
        out.push_str(&format!("  - {}\n", k));
    }

    out
}
