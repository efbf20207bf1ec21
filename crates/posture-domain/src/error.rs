use thiserror::Error;

/// Errors raised by the decision core.
///
/// # Invariants
/// - A configuration error never degrades into an allow or deny decision.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecisionError {
    /// An element of `resource_exceptions` is not a string.
    #[error("resource_exceptions must be string[] (element {index} is {found})")]
    InvalidResourceExceptions { index: usize, found: &'static str },

    /// The exception params object itself has the wrong shape.
    #[error("invalid exception params: {0}")]
    InvalidExceptionParams(String),

    /// No catalog entry exists for the requested check kind.
    #[error("unknown check kind: {0}")]
    UnknownCheck(String),

    /// The request payload does not have the shape the check expects.
    #[error("payload does not match check: {0}")]
    InvalidPayload(String),
}

pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
