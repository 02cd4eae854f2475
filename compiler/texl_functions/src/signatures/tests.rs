use pretty_assertions::assert_eq;

use super::*;
use crate::descriptor::{FunctionCategory, ParamSpec, ReturnSpec};

static FILTER: FunctionDescriptor = FunctionDescriptor::new(
    "Filter",
    FunctionCategory::Table,
    &[ParamSpec::Table, ParamSpec::Predicate],
    ReturnSpec::TableOfArg0,
)
.variadic()
.labels(&["source", "condition"]);

static MID: FunctionDescriptor = FunctionDescriptor::new(
    "Mid",
    FunctionCategory::Text,
    &[ParamSpec::TEXT, ParamSpec::NUMBER, ParamSpec::NUMBER],
    ReturnSpec::TEXT,
)
.optional(1)
.labels(&["text", "start", "count"]);

#[test]
fn fixed_signature_uses_labels() {
    let signature = signature_for_arity(&MID, 2).map(|s| s.to_string());
    assert_eq!(signature.as_deref(), Some("Mid(text, start)"));
    let signature = signature_for_arity(&MID, 3).map(|s| s.to_string());
    assert_eq!(signature.as_deref(), Some("Mid(text, start, count)"));
}

#[test]
fn out_of_range_arity_has_no_signature() {
    assert_eq!(signature_for_arity(&MID, 1), None);
    assert_eq!(signature_for_arity(&MID, 4), None);
}

#[test]
fn variadic_tail_is_numbered() {
    let signature = signature_for_arity(&FILTER, 4).map(|s| s.to_string());
    assert_eq!(
        signature.as_deref(),
        Some("Filter(source, condition1, condition2, condition3)")
    );
}

#[test]
fn missing_labels_fall_back_to_positions() {
    let unlabeled = MID.clone().labels(&[]);
    let signature = signature_for_arity(&unlabeled, 3).map(|s| s.labels);
    assert_eq!(
        signature,
        Some(vec!["arg1".to_string(), "arg2".to_string(), "arg3".to_string()])
    );
}

#[test]
fn signatures_list_every_arity() {
    let all: Vec<String> = signatures(&MID).map(|s| s.to_string()).collect();
    assert_eq!(all, vec!["Mid(text, start)", "Mid(text, start, count)"]);

    let filter: Vec<usize> = signatures(&FILTER).map(|s| s.labels.len()).collect();
    assert_eq!(filter, vec![2, 3, 4]);
}
