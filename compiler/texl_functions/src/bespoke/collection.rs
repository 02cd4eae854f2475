//! `Clear` and `Collect`: behavior functions over collections.

use texl_diagnostic::ErrorCode;
use texl_types::{try_coerce, DType};

use crate::check::{restrict_to_fields_of, CallChecker};
use crate::descriptor::{FunctionCategory, FunctionDescriptor, FunctionFlags, ParamSpec, ReturnSpec, Shape};
use crate::FunctionOverload;

static CLEAR: FunctionDescriptor = FunctionDescriptor::new(
    "Clear",
    FunctionCategory::Behavior,
    &[ParamSpec::Table],
    ReturnSpec::BOOLEAN,
)
.shape(Shape::Table)
.flags(FunctionFlags::BEHAVIOR)
.labels(&["collection"]);

static COLLECT: FunctionDescriptor = FunctionDescriptor::new(
    "Collect",
    FunctionCategory::Behavior,
    &[ParamSpec::Table, ParamSpec::ANY],
    ReturnSpec::TableOfArg0,
)
.variadic()
.shape(Shape::Table)
.flags(FunctionFlags::BEHAVIOR)
.labels(&["collection", "item"]);

#[derive(Debug)]
pub(crate) struct Clear;

impl FunctionOverload for Clear {
    fn descriptor(&self) -> &FunctionDescriptor {
        &CLEAR
    }

    fn check_types(&self, _checker: &mut CallChecker<'_>) -> DType {
        DType::BOOLEAN
    }

    fn check_semantics(&self, checker: &mut CallChecker<'_>, _return_type: &DType) {
        let clearable = checker
            .arg_type(0)
            .source()
            .is_some_and(|source| checker.cx().catalog.is_clearable(source));
        if !clearable {
            let diagnostic = checker
                .at_arg(0, ErrorCode::E3001)
                .with_message("Clear only works on collections");
            checker.report(diagnostic);
        }
    }
}

/// Every item must be a record or table whose rows fit the collection.
///
/// Fields the collection already has must convert to the collection's
/// field type; the conversion is recorded on the item. Fields the
/// collection lacks widen the returned table, and a later item naming the
/// same new field must convert to the type the first one gave it.
#[derive(Debug)]
pub(crate) struct Collect;

impl FunctionOverload for Collect {
    fn descriptor(&self) -> &FunctionDescriptor {
        &COLLECT
    }

    fn check_types(&self, checker: &mut CallChecker<'_>) -> DType {
        let mut collection = checker.arg_type(0).clone();
        for index in 1..checker.arg_count() {
            let item = checker.arg_type(index);
            if item.is_blank() {
                continue;
            }
            if !item.is_aggregate() {
                checker.need_record(index);
                continue;
            }

            let shared = if item.is_table() {
                collection.clone()
            } else {
                collection.to_record()
            };
            let target = restrict_to_fields_of(&shared, item);
            let coercion = if item.is_valid() {
                try_coerce(item, &target, checker.features())
            } else {
                None
            };
            let Some(coercion) = coercion else {
                let found = checker.display(item);
                let expected = checker.display(&collection.to_record());
                let diagnostic = checker
                    .at_arg(index, ErrorCode::E2005)
                    .with_message(format!("{found} does not fit the rows of {expected}"))
                    .with_arg(expected)
                    .with_arg(found);
                checker.report(diagnostic);
                continue;
            };
            checker.record(index, coercion);

            for (name, field) in item.fields() {
                if !collection.has_field(name) {
                    collection = collection.add_field(name, field.clone());
                }
            }
        }
        collection
    }
}

#[cfg(test)]
mod tests;
