//! Exception evaluation: is a subject administratively exempted from a check?
//!
//! The exception list arrives from loosely typed policy configuration, so it is
//! carried as raw JSON ([`ExceptionParams`]) until an explicit validation pass
//! turns it into [`ResourceExceptions`].

use crate::decision::Verdict;
use crate::error::{DecisionError, json_type_name};
use posture_types::ResourceId;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Reserved entry that matches every subject.
pub const WILDCARD: &str = "*";

/// Exception configuration as received from policy params.
///
/// Elements are kept untyped on purpose: a non-string element must surface as a
/// configuration error instead of being coerced or dropped during parsing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExceptionParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_exceptions: Option<Vec<JsonValue>>,
}

impl ExceptionParams {
    pub fn from_strings<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            resource_exceptions: Some(
                items
                    .into_iter()
                    .map(|s| JsonValue::String(s.into()))
                    .collect(),
            ),
        }
    }

    /// Parse params from an arbitrary JSON value.
    ///
    /// `null` and objects without `resource_exceptions` mean "no exceptions".
    /// Element types are not checked here; see [`ExceptionParams::validate`].
    pub fn from_value(value: &JsonValue) -> Result<Self, DecisionError> {
        match value {
            JsonValue::Null => Ok(Self::default()),
            JsonValue::Object(map) => match map.get("resource_exceptions") {
                None | Some(JsonValue::Null) => Ok(Self::default()),
                Some(JsonValue::Array(items)) => Ok(Self {
                    resource_exceptions: Some(items.clone()),
                }),
                Some(other) => Err(DecisionError::InvalidExceptionParams(format!(
                    "resource_exceptions must be an array, found {}",
                    json_type_name(other)
                ))),
            },
            other => Err(DecisionError::InvalidExceptionParams(format!(
                "expected an object, found {}",
                json_type_name(other)
            ))),
        }
    }

    /// Validate the whole list. Absent params validate to an empty list.
    pub fn validate(&self) -> Result<ResourceExceptions, DecisionError> {
        match self.resource_exceptions.as_deref() {
            Some(values) => ResourceExceptions::from_values(values),
            None => Ok(ResourceExceptions::default()),
        }
    }
}

/// A validated exception list: every entry is a string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceExceptions(Vec<String>);

impl ResourceExceptions {
    /// Validate raw entries. Fails on the first non-string element.
    pub fn from_values(values: &[JsonValue]) -> Result<Self, DecisionError> {
        let mut out = Vec::with_capacity(values.len());
        for (index, value) in values.iter().enumerate() {
            match value {
                JsonValue::String(s) => out.push(s.clone()),
                other => {
                    return Err(DecisionError::InvalidResourceExceptions {
                        index,
                        found: json_type_name(other),
                    });
                }
            }
        }
        Ok(Self(out))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Exact string equality, or the wildcard. No glob/prefix semantics.
    pub fn matches(&self, subject: &ResourceId) -> bool {
        self.iter().any(|e| e == WILDCARD || e == subject.as_str())
    }
}

impl<S: Into<String>> FromIterator<S> for ResourceExceptions {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Decide whether enforcement is skipped for the verdict's subject.
///
/// Returns `Ok(false)` when no exceptions are configured. The full list is
/// validated before any matching, so a non-string element fails for every
/// subject, including ones an earlier entry would have matched.
pub fn is_excepted(
    verdict: &Verdict,
    exceptions: Option<&ExceptionParams>,
) -> Result<bool, DecisionError> {
    let Some(list) = exceptions.and_then(|p| p.resource_exceptions.as_deref()) else {
        return Ok(false);
    };
    if list.is_empty() {
        return Ok(false);
    }

    let validated = ResourceExceptions::from_values(list)?;
    Ok(validated.matches(&verdict.subject))
}
