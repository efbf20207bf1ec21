//! Shared test utilities for the posture workspace.
//!
//! `xtask` uses `normalize_nondeterministic` at runtime (not behind `#[cfg(test)]`),
//! so it lives in its own crate rather than a test module.

use serde_json::Value;

pub const VERSION_PLACEHOLDER: &str = "__VERSION__";
pub const TIMESTAMP_PLACEHOLDER: &str = "__TIMESTAMP__";

const ENVELOPE_KEYS: [&str; 5] = ["schema", "tool", "verdict", "decisions", "summary"];
const TIMESTAMP_KEYS: [&str; 2] = ["started_at", "finished_at"];

/// Normalize non-deterministic report fields for golden-file comparison.
///
/// `tool.version` is replaced only when the *root* object is a report envelope,
/// so decision payloads that happen to carry a `tool` object are left alone.
/// Timestamp keys are replaced at the root only; payloads are caller data.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    let Some(obj) = value.as_object_mut() else {
        return value;
    };
    if !ENVELOPE_KEYS.iter().all(|k| obj.contains_key(*k)) {
        return value;
    }

    if let Some(tool) = obj.get_mut("tool").and_then(Value::as_object_mut)
        && tool.contains_key("version")
    {
        tool.insert(
            "version".to_string(),
            Value::String(VERSION_PLACEHOLDER.to_string()),
        );
    }
    for key in TIMESTAMP_KEYS {
        if let Some(ts) = obj.get_mut(key) {
            *ts = Value::String(TIMESTAMP_PLACEHOLDER.to_string());
        }
    }
    value
}
