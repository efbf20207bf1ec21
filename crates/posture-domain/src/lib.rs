//! Pure decision core (no IO).
//!
//! Input: a check's static metadata plus a verdict, subject and payload.
//! Output: one decision record, or a configuration error.
//!
//! Every function here is synchronous and stateless; the batch engine is a
//! fold over independent requests.

#![forbid(unsafe_code)]

pub mod decision;
pub mod error;
pub mod exceptions;
pub mod policy;
pub mod report;

mod engine;

#[cfg(test)]
mod properties;
#[cfg(test)]
mod test_support;

pub use decision::{
    DecisionInput, Verdict, assemble, resolve_decision_type, resolve_severity,
};
pub use engine::{CheckLookup, EvaluationRequest, evaluate};
pub use error::DecisionError;
pub use exceptions::{ExceptionParams, ResourceExceptions, WILDCARD, is_excepted};
