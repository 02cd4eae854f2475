//! End-to-end checks of individual calls.

use pretty_assertions::assert_eq;
use texl_diagnostic::{ErrorCode, Severity};
use texl_functions::{DelegationCapability, NotDelegable};
use texl_ir::{BinaryOp, NodeKind};
use texl_types::{DType, Features};

use crate::common::{registry, Harness, ACCOUNTS};

#[test]
fn abs_of_a_number() {
    let mut h = Harness::default();
    let (_, result) = h.check("Abs", &[DType::NUMBER]);

    assert!(result.is_valid());
    assert_eq!(result.return_type, DType::NUMBER);
    assert!(result.coercions.is_empty());
    assert!(result.diagnostics.is_empty());
}

#[test]
fn abs_follows_the_decimal_mode() {
    let mut h = Harness::default();
    let (_, result) = h.check("Abs", &[DType::DECIMAL]);
    assert_eq!(result.return_type, DType::DECIMAL);

    let mut h = Harness::new(Features::default().with_number_is_float(true));
    let (_, result) = h.check("Abs", &[DType::BOOLEAN]);
    assert_eq!(result.return_type, DType::NUMBER);
}

#[test]
fn len_of_a_number_converts_to_text() {
    let mut h = Harness::new(Features::default().with_number_is_float(true));
    let (call, result) = h.check("Len", &[DType::NUMBER]);

    assert!(result.is_valid());
    assert_eq!(result.return_type, DType::NUMBER);
    assert_eq!(result.coercions.len(), 1);
    assert_eq!(result.coercions.get(h.arg(call, 0)), Some(&DType::STRING));
}

#[test]
fn table_of_records_with_conflicting_field() {
    let mut h = Harness::default();
    let number = h.record(&[("a", DType::NUMBER)]);
    let text = h.record(&[("a", DType::STRING)]);
    let (call, result) = h.check("Table", &[number, text]);

    assert!(!result.is_valid());
    assert!(result.guarantee.is_some());
    assert!(result.has_code(ErrorCode::E2005));
    assert_eq!(result.diagnostics[0].node, Some(h.arg(call, 1)));
}

#[test]
fn table_of_compatible_records() {
    let mut h = Harness::default();
    let first = h.record(&[("a", DType::NUMBER)]);
    let second = h.record(&[("a", DType::DECIMAL), ("b", DType::STRING)]);
    let (_, result) = h.check("Table", &[first, second]);

    assert!(result.is_valid());
    assert_eq!(
        result.return_type,
        h.table(&[("a", DType::NUMBER), ("b", DType::STRING)])
    );
}

#[test]
fn min_of_date_and_date_time_under_legacy_rules() {
    let mut h = Harness::new(Features::legacy());
    let (call, result) = h.check("Min", &[DType::DATE, DType::DATE_TIME]);

    assert!(result.is_valid());
    assert_eq!(result.return_type, DType::DATE_TIME);
    assert_eq!(result.coercions.get(h.arg(call, 0)), Some(&DType::DATE_TIME));
    assert_eq!(result.coercions.get(h.arg(call, 1)), None);
}

#[test]
fn count_rows_over_relationship_stays_local() {
    let mut h = Harness::default();
    h.connect_accounts(DelegationCapability::all());
    let source = h.ident("Contacts");
    let call = h.call("CountRows", &[source]);
    let types = [h.accounts().with_expand_info()];

    let checked = registry().check_call(&h.cx(), &h.site(call, &types));
    assert!(checked.is_valid());

    let check = h.delegation(call, &types);
    assert!(!check.delegable);
    assert_eq!(check.reason, Some(NotDelegable::OneToMany));
    let diagnostic = check.diagnostic.expect("delegatable source gets a warning");
    assert_eq!(diagnostic.code, ErrorCode::W4002);
    assert_eq!(diagnostic.severity, Severity::Warning);

    let events = h.telemetry.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].function, "CountRows");
    assert_eq!(events[0].node, call);
    assert_eq!(events[0].source, Some(ACCOUNTS));
    assert_eq!(events[0].reason, NotDelegable::OneToMany);
}

#[test]
fn count_rows_over_plain_source_delegates() {
    let mut h = Harness::default();
    h.connect_accounts(DelegationCapability::COUNT);
    let source = h.ident("Accounts");
    let call = h.call("CountRows", &[source]);

    let check = h.delegation(call, &[h.accounts()]);

    assert!(check.delegable);
    assert_eq!(check.diagnostic, None);
    assert!(h.telemetry.is_empty());
}

#[test]
fn reduce_without_initial_value_over_blank_formula() {
    let mut h = Harness::default();
    let orders = h.table(&[("Qty", DType::NUMBER)]);
    let (call, result) = h.check("Reduce", &[orders, DType::OBJ_NULL]);

    assert!(!result.is_valid());
    assert!(result.has_code(ErrorCode::E2007));
    assert_eq!(result.diagnostics[0].node, Some(call));
    assert_eq!(result.diagnostics[0].severity, Severity::Severe);
}

#[test]
fn filter_with_supported_predicate_delegates() {
    let mut h = Harness::default();
    h.connect_accounts(DelegationCapability::FILTER | DelegationCapability::GT);
    let source = h.ident("Accounts");
    let rating = h.ident("Rating");
    let three = h.node(NodeKind::NumLit);
    let predicate = h.node(NodeKind::BinaryOp {
        op: BinaryOp::Gt,
        left: rating,
        right: three,
    });
    let call = h.call("Filter", &[source, predicate]);
    let types = [h.accounts(), DType::BOOLEAN];

    let checked = registry().check_call(&h.cx(), &h.site(call, &types));
    assert!(checked.is_valid());
    assert_eq!(checked.return_type, h.accounts());
    assert!(h.delegation(call, &types).delegable);
}

#[test]
fn filter_with_unsupported_operator_warns() {
    let mut h = Harness::default();
    h.connect_accounts(DelegationCapability::FILTER);
    let source = h.ident("Accounts");
    let rating = h.ident("Rating");
    let three = h.node(NodeKind::NumLit);
    let predicate = h.node(NodeKind::BinaryOp {
        op: BinaryOp::Lt,
        left: rating,
        right: three,
    });
    let call = h.call("Filter", &[source, predicate]);

    let check = h.delegation(call, &[h.accounts(), DType::BOOLEAN]);

    assert!(!check.delegable);
    assert_eq!(check.reason, Some(NotDelegable::UnsupportedExpression(predicate)));
    assert_eq!(check.diagnostic.map(|d| d.code), Some(ErrorCode::W4001));
    assert_eq!(h.telemetry.len(), 1);
}

#[test]
fn unknown_function_and_arity() {
    let mut h = Harness::default();
    let (_, unknown) = h.check("NoSuchFunction", &[]);
    assert!(unknown.has_code(ErrorCode::E1002));

    let (_, arity) = h.check("Abs", &[DType::NUMBER, DType::NUMBER]);
    assert!(arity.has_code(ErrorCode::E1001));
    assert_eq!(arity.return_type, DType::ERROR);
}

#[test]
fn failed_call_converts_into_error() {
    let mut h = Harness::default();
    let (_, result) = h.check("Upper", &[DType::COLOR]);

    let failed = result.into_result().expect_err("Color does not convert to Text");
    assert_eq!(failed.diagnostics.len(), 1);
    assert_eq!(failed.diagnostics[0].code, ErrorCode::E2001);
}

#[test]
fn signature_help_for_variadic_function() {
    let rendered: Vec<String> = registry()
        .signatures_for(None, "Concatenate", 3)
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(rendered.len(), 1);
    assert!(rendered[0].starts_with("Concatenate("));
}
