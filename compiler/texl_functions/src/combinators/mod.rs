//! Generic overload driven entirely by its descriptor.
//!
//! Pure passthroughs, table lifts and numeric functions differ only in
//! their [`ReturnSpec`]; [`Builtin`] resolves that spec against the actual
//! argument types, so those functions need no code of their own.

use texl_diagnostic::ErrorCode;
use texl_types::{default_numeric_type, numeric_return_type, DType, Features};

use crate::check::CallChecker;
use crate::descriptor::{FunctionDescriptor, ParamSpec, ReturnSpec, Scalar, ScalarReturn};
use crate::FunctionOverload;

/// An overload described by a static descriptor row.
#[derive(Debug)]
pub struct Builtin {
    descriptor: &'static FunctionDescriptor,
}

impl Builtin {
    pub const fn new(descriptor: &'static FunctionDescriptor) -> Self {
        Builtin { descriptor }
    }
}

impl FunctionOverload for Builtin {
    fn descriptor(&self) -> &FunctionDescriptor {
        self.descriptor
    }

    fn check_types(&self, checker: &mut CallChecker<'_>) -> DType {
        resolve_return(self.descriptor.returns, checker)
    }
}

/// Return type of `spec` for the call being checked.
pub fn resolve_return(spec: ReturnSpec, checker: &mut CallChecker<'_>) -> DType {
    match spec {
        ReturnSpec::Scalar(scalar) => {
            scalar_return(scalar, &numeric_args(checker), checker.features())
        }
        ReturnSpec::Lifted(scalar) => {
            let column = scalar_return(scalar, &numeric_args(checker), checker.features());
            DType::single_column_table(checker.one_column_name(), column)
        }
        ReturnSpec::RowOfArg0 => checker.arg_type(0).to_record(),
        ReturnSpec::TableOfArg0 => checker.arg_type(0).clone(),
        ReturnSpec::ArgOrRowOfArg0(index) if index < checker.arg_count() => {
            checker.arg_type(index).clone()
        }
        ReturnSpec::ArgOrRowOfArg0(_) => checker.arg_type(0).to_record(),
        ReturnSpec::UnionOfArgs => checker
            .union_args(0..checker.arg_count(), ErrorCode::E2008)
            .unwrap_or(DType::ERROR),
        ReturnSpec::Void => DType::VOID,
        ReturnSpec::Custom => DType::UNKNOWN,
    }
}

/// Resolve a scalar return given the numeric inputs it follows.
pub fn scalar_return(scalar: ScalarReturn, numeric_args: &[&DType], features: &Features) -> DType {
    match scalar {
        ScalarReturn::Kind(kind) => DType::scalar(kind),
        ScalarReturn::Numeric => numeric_return_type(numeric_args.iter().copied(), features, true),
        ScalarReturn::DefaultNumeric => default_numeric_type(features),
        ScalarReturn::Float => DType::NUMBER,
    }
}

/// Types feeding numeric resolution: numeric scalar arguments and the
/// column of numeric one-column tables.
fn numeric_args<'a>(checker: &CallChecker<'a>) -> Vec<&'a DType> {
    (0..checker.arg_count())
        .filter_map(|index| match checker.descriptor().param(index) {
            Some(ParamSpec::Scalar(Scalar::Numeric)) => Some(checker.arg_type(index)),
            Some(ParamSpec::Column(Scalar::Numeric)) => {
                checker.arg_type(index).single_column().map(|(_, ty)| ty)
            }
            _ => None,
        })
        .collect()
}
