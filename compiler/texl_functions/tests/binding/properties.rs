//! Laws that hold for every registered overload or every input.

#![allow(
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use proptest::prelude::*;
use texl_diagnostic::ErrorCode;
use texl_functions::{check_overload, FunctionOverload};
use texl_types::{numeric_return_type, DType, Features};

use crate::common::{registry, Harness};

// -- Strategies --

fn features() -> impl Strategy<Value = Features> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(float, v1, consistent)| {
        Features::legacy()
            .with_number_is_float(float)
            .with_v1_rules(v1)
            .with_consistent_one_column_table_result(consistent)
    })
}

fn any_scalar() -> impl Strategy<Value = DType> {
    prop_oneof![
        Just(DType::NUMBER),
        Just(DType::DECIMAL),
        Just(DType::BOOLEAN),
        Just(DType::STRING),
        Just(DType::DATE),
        Just(DType::DATE_TIME),
        Just(DType::COLOR),
        Just(DType::OBJ_NULL),
        Just(DType::UNTYPED_OBJECT),
    ]
}

fn numeric_like() -> impl Strategy<Value = DType> {
    prop_oneof![
        Just(DType::NUMBER),
        Just(DType::DECIMAL),
        Just(DType::BOOLEAN),
        Just(DType::OBJ_NULL),
    ]
}

/// One-argument scalar functions with a table form, and the column types
/// their scalar form accepts.
const NUMERIC_LIFTS: &[&str] = &["Abs", "Int", "Trunc", "Sqrt", "Exp", "Ln", "Char", "UniChar"];
const TEXT_LIFTS: &[&str] = &["Lower", "Upper", "Trim", "TrimEnds", "Proper", "Len"];

fn lifted_call() -> impl Strategy<Value = (&'static str, DType)> {
    prop_oneof![
        (prop::sample::select(NUMERIC_LIFTS), numeric_like()),
        (
            prop::sample::select(TEXT_LIFTS),
            prop_oneof![Just(DType::STRING), Just(DType::NUMBER), Just(DType::BOOLEAN)],
        ),
    ]
}

/// An argument count outside `overload`'s bounds, if there is one.
fn out_of_bounds(overload: &dyn FunctionOverload, pick: usize) -> Option<usize> {
    let arity = overload.descriptor().arity;
    if arity.min > 0 && (pick % 2 == 0 || arity.max.is_none()) {
        return Some(pick % arity.min);
    }
    arity.max.map(|max| max + 1 + pick % 3)
}

// -- Properties --

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn arity_outside_bounds_is_always_an_error(
        index in 0..registry().len(),
        pick in 0usize..64,
        types in prop::collection::vec(any_scalar(), 8),
        features in features(),
    ) {
        let overload = registry().iter().nth(index).unwrap();
        let count = out_of_bounds(overload, pick);
        prop_assume!(count.is_some());
        let count = count.unwrap();

        let mut h = Harness::new(features);
        let arg_types: Vec<DType> = types.iter().cycle().take(count).cloned().collect();
        let call = h.call_with(overload.descriptor().name, &arg_types);
        let result = check_overload(overload, &h.cx(), &h.site(call, &arg_types));

        prop_assert!(!result.is_valid());
        prop_assert!(result.has_code(ErrorCode::E1001));
        prop_assert_eq!(result.return_type, DType::ERROR);
    }

    #[test]
    fn sum_return_type_is_deterministic(
        args in prop::collection::vec(numeric_like(), 1..6),
        features in features(),
    ) {
        let mut first = Harness::new(features);
        let mut second = Harness::new(features);
        let (_, a) = first.check("Sum", &args);
        let (_, b) = second.check("Sum", &args);

        prop_assert!(a.is_valid());
        prop_assert_eq!(a.return_type.kind(), b.return_type.kind());
        prop_assert_eq!(a.return_type, numeric_return_type(&args, &features, true));
    }

    #[test]
    fn min_return_type_is_deterministic(
        args in prop::collection::vec(numeric_like(), 1..6),
        features in features(),
    ) {
        let mut h = Harness::new(features);
        let (_, a) = h.check("Min", &args);
        let (_, b) = h.check("Min", &args);

        prop_assert_eq!(a.is_valid(), b.is_valid());
        prop_assert_eq!(a.return_type.kind(), b.return_type.kind());
    }

    #[test]
    fn sequence_column_is_deterministic(
        args in prop::collection::vec(numeric_like(), 1..=3),
        features in features(),
    ) {
        let mut h = Harness::new(features);
        let (_, a) = h.check("Sequence", &args);
        let (_, b) = h.check("Sequence", &args);

        prop_assert!(a.is_valid());
        prop_assert_eq!(&a.return_type, &b.return_type);
        let (_, column) = a.return_type.single_column().unwrap();
        prop_assert_eq!(column, &numeric_return_type(&args[1..], &features, true));
    }

    #[test]
    fn table_form_returns_a_column_of_the_scalar_result(
        (func, column_type) in lifted_call(),
        column in "[A-Z][a-z]{0,6}",
        features in features(),
    ) {
        let mut h = Harness::new(features);
        let (_, scalar) = h.check(func, std::slice::from_ref(&column_type));
        let table = h.table(&[(column.as_str(), column_type)]);
        let (_, lifted) = h.check(func, &[table]);

        prop_assert!(scalar.is_valid());
        prop_assert!(lifted.is_valid());
        let result_column = h.interner.intern(features.one_column_name());
        prop_assert_eq!(
            lifted.return_type,
            DType::single_column_table(result_column, scalar.return_type)
        );
    }
}
