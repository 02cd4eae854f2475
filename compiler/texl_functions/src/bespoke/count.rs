//! `CountRows` and `Count`.

use texl_diagnostic::ErrorCode;
use texl_types::{default_numeric_type, DType, Kind};

use crate::check::CallChecker;
use crate::delegation::{default_delegation, DelegationQuery, NotDelegable};
use crate::descriptor::{
    DelegationCapability, FunctionCategory, FunctionDescriptor, ParamSpec, ReturnSpec, Shape,
};
use crate::FunctionOverload;

static COUNT_ROWS: FunctionDescriptor = FunctionDescriptor::new(
    "CountRows",
    FunctionCategory::Table,
    &[ParamSpec::Table],
    ReturnSpec::DEFAULT_NUMERIC,
)
.shape(Shape::Table)
.delegates(DelegationCapability::COUNT)
.labels(&["source"]);

static COUNT: FunctionDescriptor = FunctionDescriptor::new(
    "Count",
    FunctionCategory::Table,
    &[ParamSpec::Table],
    ReturnSpec::DEFAULT_NUMERIC,
)
.shape(Shape::Table)
.delegates(DelegationCapability::COUNT)
.labels(&["column"]);

#[derive(Debug)]
pub(crate) struct CountRows;

impl FunctionOverload for CountRows {
    fn descriptor(&self) -> &FunctionDescriptor {
        &COUNT_ROWS
    }

    fn check_types(&self, checker: &mut CallChecker<'_>) -> DType {
        default_numeric_type(checker.features())
    }

    /// Rows reached through a one-to-many relationship cannot be counted
    /// server-side, whatever the source supports.
    fn is_delegable(&self, query: &DelegationQuery<'_>) -> Result<(), NotDelegable> {
        if query.source().is_some() && query.has_expand_info() {
            return Err(NotDelegable::OneToMany);
        }
        default_delegation(self.delegation_capability(), query)
    }
}

/// `Count(Orders.Quantity)`: numeric values in a one-column table.
#[derive(Debug)]
pub(crate) struct Count;

impl FunctionOverload for Count {
    fn descriptor(&self) -> &FunctionDescriptor {
        &COUNT
    }

    fn check_types(&self, checker: &mut CallChecker<'_>) -> DType {
        let result = default_numeric_type(checker.features());
        let table = checker.arg_type(0);
        let Some((column, column_type)) = table.single_column() else {
            let diagnostic = checker
                .at_arg(0, ErrorCode::E2003)
                .with_message(format!(
                    "Count expects a table with exactly one column, found {} columns",
                    table.field_count()
                ));
            checker.report(diagnostic);
            return DType::ERROR;
        };

        let column_name = checker.cx().interner.lookup(column);
        if column_type.is_unknown() || column_type.kind() == Kind::UntypedObject {
            let diagnostic = checker
                .at_arg(0, ErrorCode::W2001)
                .with_message(format!(
                    "the type of column {column_name} is not known; non-numeric values will not be counted"
                ))
                .with_arg(column_name);
            checker.report(diagnostic);
            return result;
        }
        if !(column_type.is_numeric() || column_type.is_blank()) {
            let found = checker.display(column_type);
            let diagnostic = checker
                .at_arg(0, ErrorCode::E2010)
                .with_message(format!("column {column_name} must be numeric, found {found}"))
                .with_arg(column_name)
                .with_arg(found);
            checker.report(diagnostic);
            return DType::ERROR;
        }
        result
    }
}
