//! `Table(record, ...)` and `TableConcatenate(table, ...)`.

use texl_diagnostic::ErrorCode;
use texl_types::DType;

use crate::check::CallChecker;
use crate::descriptor::{FunctionCategory, FunctionDescriptor, ParamSpec, ReturnSpec, Shape};
use crate::FunctionOverload;

static TABLE: FunctionDescriptor = FunctionDescriptor::new(
    "Table",
    FunctionCategory::Table,
    &[ParamSpec::Record],
    ReturnSpec::Custom,
)
.variadic()
.min_args(0)
.labels(&["record"]);

static TABLE_CONCATENATE: FunctionDescriptor = FunctionDescriptor::new(
    "TableConcatenate",
    FunctionCategory::Table,
    &[ParamSpec::Table],
    ReturnSpec::Custom,
)
.variadic()
.shape(Shape::Table)
.labels(&["table"]);

/// A table whose row type is the union of the records.
#[derive(Debug)]
pub(crate) struct TableConstructor;

impl FunctionOverload for TableConstructor {
    fn descriptor(&self) -> &FunctionDescriptor {
        &TABLE
    }

    fn check_types(&self, checker: &mut CallChecker<'_>) -> DType {
        if checker.arg_count() == 0 {
            return DType::empty_table();
        }
        checker
            .union_args(0..checker.arg_count(), ErrorCode::E2005)
            .map_or(DType::ERROR, |row| row.to_table())
    }
}

#[derive(Debug)]
pub(crate) struct TableConcatenate;

impl FunctionOverload for TableConcatenate {
    fn descriptor(&self) -> &FunctionDescriptor {
        &TABLE_CONCATENATE
    }

    fn check_types(&self, checker: &mut CallChecker<'_>) -> DType {
        checker
            .union_args(0..checker.arg_count(), ErrorCode::E2006)
            .unwrap_or(DType::ERROR)
    }
}

#[cfg(test)]
mod tests;
