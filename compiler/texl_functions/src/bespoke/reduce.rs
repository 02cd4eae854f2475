//! `Reduce(source, formula, initial)`: fold a table into one value.

use texl_diagnostic::ErrorCode;
use texl_types::{try_coerce, DType};

use crate::check::CallChecker;
use crate::descriptor::{ArgMask, FunctionCategory, FunctionDescriptor, ParamSpec, ReturnSpec, Shape};
use crate::FunctionOverload;

static REDUCE: FunctionDescriptor = FunctionDescriptor::new(
    "Reduce",
    FunctionCategory::Table,
    &[ParamSpec::Table, ParamSpec::RowExpr, ParamSpec::ANY],
    ReturnSpec::Custom,
)
.optional(1)
.shape(Shape::Table)
.lambdas(ArgMask::NONE.with(1))
.labels(&["source", "formula", "initial"]);

#[derive(Debug)]
pub(crate) struct Reduce;

impl FunctionOverload for Reduce {
    fn descriptor(&self) -> &FunctionDescriptor {
        &REDUCE
    }

    /// The accumulator has the initial value's type. A blank or missing
    /// initial value defers to the formula, which then must be typed.
    fn check_types(&self, checker: &mut CallChecker<'_>) -> DType {
        let formula = checker.arg_type(1);
        let initial = (checker.arg_count() == 3)
            .then(|| checker.arg_type(2))
            .filter(|ty| !ty.is_blank());

        if let Some(initial) = initial {
            return match try_coerce(formula, initial, checker.features()) {
                Some(coercion) => {
                    checker.record(1, coercion);
                    initial.clone()
                }
                None => {
                    let expected = checker.display(initial);
                    checker.type_mismatch(1, &expected);
                    DType::ERROR
                }
            };
        }

        if formula.is_blank() {
            let diagnostic = checker
                .at_call(ErrorCode::E2007)
                .with_message("the type of the accumulator cannot be determined; give Reduce a typed initial value");
            checker.report(diagnostic);
            return DType::ERROR;
        }
        formula.clone()
    }
}
