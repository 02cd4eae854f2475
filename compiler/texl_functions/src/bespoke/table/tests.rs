use pretty_assertions::assert_eq;
use texl_diagnostic::ErrorCode;
use texl_types::DType;

use crate::test_support::Fixture;

#[test]
fn empty_table() {
    let mut fx = Fixture::new();
    let (_, result) = fx.check("Table", &[]);
    assert_eq!(result.return_type, DType::empty_table());
}

#[test]
fn records_union_into_rows() {
    let mut fx = Fixture::new();
    let first = fx.record(&[("a", DType::NUMBER)]);
    let second = fx.record(&[("b", DType::STRING)]);
    let (_, result) = fx.check("Table", &[first, second]);

    assert!(result.is_valid());
    assert_eq!(
        result.return_type,
        fx.table(&[("a", DType::NUMBER), ("b", DType::STRING)])
    );
}

#[test]
fn conflicting_records() {
    let mut fx = Fixture::new();
    let first = fx.record(&[("a", DType::NUMBER)]);
    let second = fx.record(&[("a", DType::COLOR)]);
    let (call, result) = fx.check("Table", &[first, second]);

    assert!(result.has_code(ErrorCode::E2005));
    assert_eq!(result.diagnostics[0].node, Some(fx.arena.call_args(call)[1]));
}

#[test]
fn non_record_argument() {
    let mut fx = Fixture::new();
    let (_, result) = fx.check("Table", &[DType::NUMBER]);
    assert!(result.has_code(ErrorCode::E2004));
}

#[test]
fn concatenate_tables() {
    let mut fx = Fixture::new();
    let left = fx.table(&[("a", DType::DATE)]);
    let right = fx.table(&[("a", DType::DATE_TIME)]);
    let (_, result) = fx.check("TableConcatenate", &[left, right]);
    assert_eq!(result.return_type, fx.table(&[("a", DType::DATE_TIME)]));

    let other = fx.table(&[("a", DType::COLOR)]);
    let numbers = fx.table(&[("a", DType::NUMBER)]);
    let (_, result) = fx.check("TableConcatenate", &[numbers, other]);
    assert!(result.has_code(ErrorCode::E2006));
}

#[test]
fn single_record_with_error_field() {
    let mut fx = Fixture::new();
    let broken = fx.record(&[("a", DType::ERROR)]);

    let (call, one) = fx.check("Table", std::slice::from_ref(&broken));
    assert!(!one.is_valid());
    assert!(one.has_code(ErrorCode::E2005));
    assert_eq!(one.diagnostics[0].node, Some(fx.arena.call_args(call)[0]));

    let (_, two) = fx.check("Table", &[broken.clone(), broken]);
    assert!(two.has_code(ErrorCode::E2005));
}
