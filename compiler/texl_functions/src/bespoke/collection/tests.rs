use pretty_assertions::assert_eq;
use texl_diagnostic::ErrorCode;
use texl_types::{DType, DataSourceId};

use crate::test_support::Fixture;
use crate::{CheckPhase, DataSourceInfo, DelegationCapability};

const SCRATCH: DataSourceId = DataSourceId::new(3);

#[test]
fn clear_a_collection() {
    let mut fx = Fixture::new();
    fx.behavior = true;
    fx.catalog.insert(SCRATCH, DataSourceInfo::collection("Scratch"));
    let scratch = fx.table(&[("Name", DType::STRING)]).with_source(SCRATCH);

    let (_, result) = fx.check("Clear", &[scratch]);

    assert!(result.is_valid());
    assert_eq!(result.return_type, DType::BOOLEAN);
}

#[test]
fn clear_a_connected_source() {
    let mut fx = Fixture::new();
    fx.behavior = true;
    fx.catalog
        .insert(SCRATCH, DataSourceInfo::connected("Accounts", DelegationCapability::all()));
    let accounts = fx.table(&[("Name", DType::STRING)]).with_source(SCRATCH);

    let (_, result) = fx.check("Clear", &[accounts]);

    assert!(result.has_code(ErrorCode::E3001));
    assert_eq!(result.phase, CheckPhase::OverloadSpecificChecked);
}

#[test]
fn clear_outside_behavior_formula() {
    let mut fx = Fixture::new();
    fx.catalog.insert(SCRATCH, DataSourceInfo::collection("Scratch"));
    let scratch = fx.table(&[("Name", DType::STRING)]).with_source(SCRATCH);

    let (_, result) = fx.check("Clear", &[scratch]);

    assert!(result.has_code(ErrorCode::E3006));
}

#[test]
fn collect_compatible_items() {
    let mut fx = Fixture::new();
    fx.behavior = true;
    let scratch = fx.table(&[("Name", DType::STRING)]).with_source(SCRATCH);
    let row = fx.record(&[("Name", DType::STRING)]);
    let rows = fx.table(&[("Name", DType::STRING)]);

    let (_, result) = fx.check("Collect", &[scratch.clone(), row, rows]);

    assert!(result.is_valid());
    assert_eq!(result.return_type, scratch);
}

#[test]
fn collect_incompatible_item() {
    let mut fx = Fixture::new();
    fx.behavior = true;
    let scratch = fx.table(&[("Name", DType::STRING)]);
    let row = fx.record(&[("Name", DType::COLOR)]);

    let (_, result) = fx.check("Collect", &[scratch.clone(), row]);
    assert!(result.has_code(ErrorCode::E2005));

    let (_, result) = fx.check("Collect", &[scratch, DType::NUMBER]);
    assert!(result.has_code(ErrorCode::E2004));
}

#[test]
fn collect_converts_boolean_field_to_number() {
    let mut fx = Fixture::new();
    fx.behavior = true;
    let scratch = fx.table(&[("a", DType::NUMBER)]);
    let row = fx.record(&[("a", DType::BOOLEAN)]);

    let (call, result) = fx.check("Collect", &[scratch.clone(), row]);

    assert!(result.is_valid());
    assert_eq!(result.return_type, scratch);
    let item = fx.arena.call_args(call)[1];
    assert_eq!(result.coercions.get(item), Some(&fx.record(&[("a", DType::NUMBER)])));
}

#[test]
fn collect_records_date_to_date_time_conversion() {
    let mut fx = Fixture::new();
    fx.behavior = true;
    let scratch = fx.table(&[("a", DType::DATE_TIME)]);
    let rows = fx.table(&[("a", DType::DATE)]);

    let (call, result) = fx.check("Collect", &[scratch, rows]);

    assert!(result.is_valid());
    assert_eq!(result.coercions.len(), 1);
    let item = fx.arena.call_args(call)[1];
    assert_eq!(result.coercions.get(item), Some(&fx.table(&[("a", DType::DATE_TIME)])));
}

#[test]
fn collect_widens_with_new_fields() {
    let mut fx = Fixture::new();
    fx.behavior = true;
    let scratch = fx.table(&[("a", DType::NUMBER)]).with_source(SCRATCH);
    let first = fx.record(&[("a", DType::NUMBER), ("b", DType::STRING)]);
    let second = fx.record(&[("b", DType::STRING)]);

    let (_, result) = fx.check("Collect", &[scratch, first, second]);

    assert!(result.is_valid());
    assert!(result.coercions.is_empty());
    assert_eq!(
        result.return_type,
        fx.table(&[("a", DType::NUMBER), ("b", DType::STRING)])
            .with_source(SCRATCH)
    );
}

#[test]
fn collect_new_field_must_agree_with_earlier_item() {
    let mut fx = Fixture::new();
    fx.behavior = true;
    let scratch = fx.table(&[("a", DType::NUMBER)]);
    let first = fx.record(&[("b", DType::STRING)]);
    let second = fx.record(&[("b", DType::COLOR)]);

    let (call, result) = fx.check("Collect", &[scratch, first, second]);

    assert!(result.has_code(ErrorCode::E2005));
    assert_eq!(result.diagnostics[0].node, Some(fx.arena.call_args(call)[2]));
}

#[test]
fn collect_rejects_item_with_error_field() {
    let mut fx = Fixture::new();
    fx.behavior = true;
    let scratch = fx.table(&[("a", DType::NUMBER)]);
    let row = fx.record(&[("b", DType::ERROR)]);

    let (_, result) = fx.check("Collect", &[scratch, row]);

    assert!(result.has_code(ErrorCode::E2005));
}
