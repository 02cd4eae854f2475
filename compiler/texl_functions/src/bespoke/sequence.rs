//! `Sequence(records, start, step)`.

use texl_types::{numeric_return_type, DType};

use crate::check::CallChecker;
use crate::descriptor::{FunctionCategory, FunctionDescriptor, ParamSpec, ReturnSpec};
use crate::FunctionOverload;

static SEQUENCE: FunctionDescriptor = FunctionDescriptor::new(
    "Sequence",
    FunctionCategory::Table,
    &[ParamSpec::NUMBER, ParamSpec::NUMBER, ParamSpec::NUMBER],
    ReturnSpec::Custom,
)
.optional(2)
.labels(&["records", "start", "step"]);

/// The column is always `Value`. Its type follows `start` and `step`: the
/// record count does not appear in the output.
#[derive(Debug)]
pub(crate) struct Sequence;

impl FunctionOverload for Sequence {
    fn descriptor(&self) -> &FunctionDescriptor {
        &SEQUENCE
    }

    fn check_types(&self, checker: &mut CallChecker<'_>) -> DType {
        let column = numeric_return_type(
            (1..checker.arg_count()).map(|index| checker.arg_type(index)),
            checker.features(),
            true,
        );
        DType::single_column_table(checker.intern("Value"), column)
    }
}
