//! Property-based tests for the decision core.
//!
//! These tests use proptest to verify invariants around:
//! - Decision type resolution
//! - Exception matching (exact, wildcard, malformed lists)
//! - Severity resolution and exception folding
//! - Engine ordering determinism

use crate::decision::{DecisionInput, Verdict, assemble, resolve_decision_type, resolve_severity};
use crate::engine::{EvaluationRequest, evaluate};
use crate::error::DecisionError;
use crate::exceptions::{ExceptionParams, WILDCARD, is_excepted};
use crate::policy::FailOn;
use crate::test_support::{CATALOG, S3_ENCRYPTION, config};
use posture_types::{CheckMeta, DecisionType, ResourceId, Severity};
use proptest::prelude::*;
use serde_json::{Value, json};

// ============================================================================
// Strategies
// ============================================================================

/// Resource identifiers in the shapes seen in practice, plus arbitrary strings.
fn arb_subject() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z0-9-]{3,20}".prop_map(|b| format!("arn:aws:s3:::{b}")),
        "[0-9]{12}".prop_map(|acct| format!("arn:aws:iam::{acct}:root")),
        "[a-z][a-z0-9-]{0,15}/[a-z][a-z0-9-]{0,15}",
        ".{0,24}",
    ]
}

fn arb_severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Info),
        Just(Severity::Low),
        Just(Severity::Medium),
        Just(Severity::High),
        Just(Severity::Critical),
    ]
}

/// JSON values that are not strings.
fn arb_non_string() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        Just(json!([])),
        Just(json!({ "arn": "x" })),
    ]
}

fn arb_meta() -> impl Strategy<Value = CheckMeta> {
    (0..CATALOG.len()).prop_map(|i| CATALOG[i])
}

fn verdict(allowed: bool, subject: &str) -> Verdict {
    Verdict {
        allowed,
        subject: ResourceId::new(subject),
    }
}

// ============================================================================
// Type resolver
// ============================================================================

proptest! {
    #[test]
    fn decision_type_matches_boolean(b in any::<bool>()) {
        let expected = if b { DecisionType::Allow } else { DecisionType::Deny };
        prop_assert_eq!(resolve_decision_type(b), expected);
        prop_assert_ne!(resolve_decision_type(b), DecisionType::Undetermined);
    }
}

// ============================================================================
// Exception evaluator
// ============================================================================

proptest! {
    #[test]
    fn no_config_never_excepts(subject in arb_subject(), allowed in any::<bool>()) {
        let v = verdict(allowed, &subject);
        prop_assert_eq!(is_excepted(&v, None), Ok(false));
        prop_assert_eq!(is_excepted(&v, Some(&ExceptionParams::default())), Ok(false));
    }

    #[test]
    fn wildcard_excepts_every_subject(subject in arb_subject()) {
        let params = ExceptionParams::from_strings([WILDCARD]);
        prop_assert_eq!(is_excepted(&verdict(false, &subject), Some(&params)), Ok(true));
    }

    #[test]
    fn exact_member_is_excepted(subject in arb_subject()) {
        let params = ExceptionParams::from_strings([subject.clone()]);
        prop_assert_eq!(is_excepted(&verdict(false, &subject), Some(&params)), Ok(true));
    }

    #[test]
    fn lists_without_subject_or_wildcard_do_not_except(
        subject in arb_subject(),
        others in prop::collection::vec(arb_subject(), 1..8),
    ) {
        let list: Vec<String> = others
            .into_iter()
            .filter(|s| s != &subject && s != WILDCARD)
            .collect();
        prop_assume!(!list.is_empty());

        let params = ExceptionParams::from_strings(list);
        prop_assert_eq!(is_excepted(&verdict(false, &subject), Some(&params)), Ok(false));
    }

    #[test]
    fn non_string_element_is_a_configuration_error(
        subject in arb_subject(),
        prefix in prop::collection::vec(arb_subject(), 0..4),
        bad in arb_non_string(),
        with_wildcard in any::<bool>(),
    ) {
        let mut items: Vec<Value> = prefix.into_iter().map(Value::String).collect();
        if with_wildcard {
            items.insert(0, Value::String(WILDCARD.to_string()));
        }
        let bad_index = items.len();
        items.push(bad);

        let params = ExceptionParams { resource_exceptions: Some(items) };
        let result = is_excepted(&verdict(true, &subject), Some(&params));
        prop_assert!(
            matches!(result, Err(DecisionError::InvalidResourceExceptions { index, .. }) if index == bad_index),
            "unexpected result: {:?}",
            result
        );
    }
}

// ============================================================================
// Severity resolver and assembler
// ============================================================================

proptest! {
    #[test]
    fn allowed_is_always_info(default in arb_severity(), over in prop::option::of(arb_severity())) {
        prop_assert_eq!(resolve_severity(true, default, over), Severity::Info);
    }

    #[test]
    fn denied_uses_override_then_default(default in arb_severity(), over in prop::option::of(arb_severity())) {
        prop_assert_eq!(resolve_severity(false, default, over), over.unwrap_or(default));
    }

    #[test]
    fn exception_folds_any_verdict_to_allow(
        meta in arb_meta(),
        subject in arb_subject(),
        allowed in any::<bool>(),
        over in prop::option::of(arb_severity()),
    ) {
        let mut input = DecisionInput::new(allowed, subject.as_str(), json!({}));
        input.severity = over;
        let params = ExceptionParams::from_strings([subject.clone()]);

        let decision = assemble(&meta, input, Some(&params)).expect("valid params");
        prop_assert_eq!(decision.header.decision_type, DecisionType::Allow);
        prop_assert_eq!(decision.header.severity, Severity::Info);
    }

    #[test]
    fn header_carries_static_metadata(
        meta in arb_meta(),
        subject in arb_subject(),
        allowed in any::<bool>(),
        locator in prop::option::of("[a-z./]{1,12}:[0-9]{1,3}"),
    ) {
        let mut input = DecisionInput::new(allowed, subject.as_str(), json!({ "k": 1 }));
        input.locator = locator.clone();

        let decision = assemble(&meta, input, None).expect("no params");
        let header = &decision.header;
        prop_assert_eq!(&header.kind, meta.kind);
        prop_assert_eq!(header.subject.as_str(), subject.as_str());
        prop_assert_eq!(header.locator.clone(), locator.unwrap_or_default());
        prop_assert!(header.labels.is_empty());
        prop_assert_eq!(&header.annotations, &meta.annotations_map());
        prop_assert_eq!(
            header.severity,
            if allowed { Severity::Info } else { meta.default_severity }
        );
        prop_assert_eq!(&decision.payload, &json!({ "k": 1 }));
    }
}

// ============================================================================
// Engine
// ============================================================================

fn arb_request() -> impl Strategy<Value = EvaluationRequest> {
    (arb_meta(), any::<bool>(), arb_subject(), prop::option::of(arb_severity())).prop_map(
        |(meta, allowed, subject, severity)| {
            let mut input = DecisionInput::new(allowed, subject.as_str(), Value::Null);
            input.severity = severity;
            EvaluationRequest {
                kind: meta.kind.to_string(),
                input,
                params: None,
            }
        },
    )
}

proptest! {
    #[test]
    fn engine_output_is_order_independent(requests in prop::collection::vec(arb_request(), 0..16)) {
        let cfg = config(FailOn::AtLeast(Severity::High));
        let forward = evaluate(requests.clone(), CATALOG, &cfg);

        let mut reversed = requests;
        reversed.reverse();
        let backward = evaluate(reversed, CATALOG, &cfg);

        prop_assert_eq!(forward.decisions, backward.decisions);
        prop_assert_eq!(forward.verdict, backward.verdict);
        prop_assert_eq!(forward.summary, backward.summary);
    }

    #[test]
    fn engine_counts_add_up(requests in prop::collection::vec(arb_request(), 0..16)) {
        let cfg = config(FailOn::Never);
        let total = requests.len() as u32;
        let report = evaluate(requests, CATALOG, &cfg);
        let s = &report.summary;
        prop_assert_eq!(s.allowed + s.denied + s.skipped + s.errors, total);
        let by_sev: u32 = Severity::ALL.iter().map(|sev| s.denied_by_severity.get(*sev)).sum();
        prop_assert_eq!(by_sev, s.denied);
    }
}

#[test]
fn end_to_end_bucket_scenario() {
    let input = DecisionInput::new(false, "arn:aws:s3:::my-bucket", json!({}));
    let decision = assemble(&S3_ENCRYPTION, input.clone(), None).expect("assemble");
    assert_eq!(decision.header.decision_type, DecisionType::Deny);
    assert_eq!(decision.header.severity, Severity::Medium);
    assert_eq!(decision.header.locator, "");

    let params = ExceptionParams::from_strings(["arn:aws:s3:::my-bucket"]);
    let decision = assemble(&S3_ENCRYPTION, input, Some(&params)).expect("assemble");
    assert_eq!(decision.header.decision_type, DecisionType::Allow);
    assert_eq!(decision.header.severity, Severity::Info);
}
