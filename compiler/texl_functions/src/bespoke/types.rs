//! `AsType`, `IsType` and `ParseJSON`: functions taking a type argument.

use texl_diagnostic::ErrorCode;
use texl_types::{DType, Kind};

use crate::check::CallChecker;
use crate::descriptor::{FunctionCategory, FunctionDescriptor, ParamSpec, ReturnSpec, Shape};
use crate::FunctionOverload;

static AS_TYPE: FunctionDescriptor = FunctionDescriptor::new(
    "AsType",
    FunctionCategory::Information,
    &[ParamSpec::ANY, ParamSpec::TypeArg],
    ReturnSpec::Custom,
)
.shape(Shape::Any)
.type_arg(1)
.labels(&["value", "type"]);

static IS_TYPE: FunctionDescriptor = FunctionDescriptor::new(
    "IsType",
    FunctionCategory::Information,
    &[ParamSpec::ANY, ParamSpec::TypeArg],
    ReturnSpec::BOOLEAN,
)
.shape(Shape::Any)
.type_arg(1)
.labels(&["value", "type"]);

static PARSE_JSON: FunctionDescriptor = FunctionDescriptor::new(
    "ParseJSON",
    FunctionCategory::Information,
    &[ParamSpec::TEXT, ParamSpec::TypeArg],
    ReturnSpec::Custom,
)
.optional(1)
.type_arg(1)
.labels(&["json", "type"]);

#[derive(Debug)]
pub(crate) struct AsType;

impl FunctionOverload for AsType {
    fn descriptor(&self) -> &FunctionDescriptor {
        &AS_TYPE
    }

    fn check_types(&self, checker: &mut CallChecker<'_>) -> DType {
        if !check_cast_source(checker) {
            return DType::ERROR;
        }
        let target = checker.arg_type(1);
        if target.is_aggregate() {
            target.to_record()
        } else {
            target.clone()
        }
    }

    fn check_semantics(&self, checker: &mut CallChecker<'_>, _return_type: &DType) {
        check_connected(checker);
    }
}

#[derive(Debug)]
pub(crate) struct IsType;

impl FunctionOverload for IsType {
    fn descriptor(&self) -> &FunctionDescriptor {
        &IS_TYPE
    }

    fn check_types(&self, checker: &mut CallChecker<'_>) -> DType {
        if !check_cast_source(checker) {
            return DType::ERROR;
        }
        DType::BOOLEAN
    }

    fn check_semantics(&self, checker: &mut CallChecker<'_>, _return_type: &DType) {
        check_connected(checker);
    }
}

/// Untyped without a type argument, the literal's type with one.
#[derive(Debug)]
pub(crate) struct ParseJson;

impl FunctionOverload for ParseJson {
    fn descriptor(&self) -> &FunctionDescriptor {
        &PARSE_JSON
    }

    fn check_types(&self, checker: &mut CallChecker<'_>) -> DType {
        if checker.arg_count() == 2 {
            checker.arg_type(1).clone()
        } else {
            DType::UNTYPED_OBJECT
        }
    }
}

/// Only records, polymorphic values and untyped objects can be cast.
fn check_cast_source(checker: &mut CallChecker<'_>) -> bool {
    let value = checker.arg_type(0);
    let ok = value.is_record()
        || value.is_blank()
        || matches!(value.kind(), Kind::Polymorphic | Kind::UntypedObject);
    if !ok {
        checker.need_record(0);
    }
    ok
}

/// A data source used as the type must be a connected tabular source.
fn check_connected(checker: &mut CallChecker<'_>) {
    let Some(source) = checker.arg_type(1).source() else {
        return;
    };
    let catalog = checker.cx().catalog;
    if catalog.is_connected(source) {
        return;
    }
    let name = catalog.name(source).unwrap_or("data source").to_string();
    let function = checker.descriptor().name;
    let diagnostic = checker
        .at_arg(1, ErrorCode::E3002)
        .with_message(format!("{function} needs a connected data source, {name} is not one"))
        .with_arg(function)
        .with_arg(name);
    checker.report(diagnostic);
}
