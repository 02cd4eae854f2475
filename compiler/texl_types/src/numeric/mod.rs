//! Decimal-versus-Number return type policy.
//!
//! Every numeric function (`Sum`, `Min`, `Max`, `Sequence`, `Trunc`, the
//! math lifts...) picks its return type here so the precision policy cannot
//! drift between functions.

use crate::{DType, Features, Kind};

/// Numeric type of literals and results with no numeric input to follow.
#[inline]
pub fn default_numeric_type(features: &Features) -> DType {
    if features.number_is_float {
        DType::NUMBER
    } else {
        DType::DECIMAL
    }
}

/// Return type of a numeric function given its numeric argument types.
///
/// - A function without native Decimal support always returns Number.
/// - Any argument that is not Decimal-compatible (Decimal, Boolean or
///   Blank) makes the result Number.
/// - Otherwise the result is Decimal, unless the engine treats numbers as
///   floats and no argument is an actual Decimal.
///
/// Pure in its inputs: the same argument kinds always give the same type.
pub fn numeric_return_type<'a>(
    arg_types: impl IntoIterator<Item = &'a DType>,
    features: &Features,
    native_decimal: bool,
) -> DType {
    if !native_decimal {
        return DType::NUMBER;
    }

    let mut saw_decimal = false;
    for ty in arg_types {
        match ty.kind() {
            Kind::Decimal => saw_decimal = true,
            Kind::Boolean | Kind::ObjNull => {}
            _ => return DType::NUMBER,
        }
    }

    if features.number_is_float && !saw_decimal {
        DType::NUMBER
    } else {
        DType::DECIMAL
    }
}
