//! Fuzz target for exception params parsing and matching.
//!
//! Goal: arbitrary JSON params and subjects **never panic**, and a positive
//! match always has the subject or the wildcard in the list.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_exception_params
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use posture_domain::{ExceptionParams, Verdict, WILDCARD, is_excepted};
use posture_types::ResourceId;

#[derive(Arbitrary, Debug)]
struct ExceptionInput {
    /// Raw JSON text for the params object.
    params: String,
    subject: String,
    allowed: bool,
}

fuzz_target!(|input: ExceptionInput| {
    if input.params.len() > 4096 || input.subject.len() > 512 {
        return;
    }

    let Ok(value) = serde_json::from_str::<serde_json::Value>(&input.params) else {
        return;
    };
    let Ok(params) = ExceptionParams::from_value(&value) else {
        return;
    };

    let verdict = Verdict {
        allowed: input.allowed,
        subject: ResourceId::new(input.subject.clone()),
    };

    if let Ok(true) = is_excepted(&verdict, Some(&params)) {
        let list = params.resource_exceptions.unwrap_or_default();
        assert!(
            list.iter()
                .any(|v| v.as_str() == Some(input.subject.as_str()) || v.as_str() == Some(WILDCARD)),
            "excepted without a matching entry"
        );
    }
});
