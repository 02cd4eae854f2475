//! `Sum`, `Average`, `StdevP`, `VarP`, `Min` and `Max`.
//!
//! Each has a scalar form over its arguments and a table form over a
//! row-scoped expression. `Min` and `Max` also order dates and times, in
//! separate overloads tried after the numeric ones.

use texl_diagnostic::ErrorCode;
use texl_types::{numeric_return_type, DType};

use crate::check::CallChecker;
use crate::descriptor::{
    ArgMask, DelegationCapability, FunctionCategory, FunctionDescriptor, ParamSpec, ReturnSpec,
    Scalar, Shape,
};
use crate::FunctionOverload;

const NUMBER_PARAMS: &[ParamSpec] = &[ParamSpec::NUMBER];
const ANY_PARAMS: &[ParamSpec] = &[ParamSpec::ANY];
const TABLE_PARAMS: &[ParamSpec] = &[ParamSpec::Table, ParamSpec::RowExpr];

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum Aggregate {
    Sum,
    Average,
    StdevP,
    VarP,
    Min,
    Max,
}

impl Aggregate {
    const fn name(self) -> &'static str {
        match self {
            Self::Sum => "Sum",
            Self::Average => "Average",
            Self::StdevP => "StdevP",
            Self::VarP => "VarP",
            Self::Min => "Min",
            Self::Max => "Max",
        }
    }

    /// Implemented over Decimal as well as Number.
    const fn native_decimal(self) -> bool {
        !matches!(self, Self::StdevP | Self::VarP)
    }

    const fn capability(self) -> DelegationCapability {
        match self {
            Self::Sum => DelegationCapability::SUM,
            Self::Average => DelegationCapability::AVERAGE,
            Self::Min => DelegationCapability::MIN,
            Self::Max => DelegationCapability::MAX,
            Self::StdevP | Self::VarP => DelegationCapability::empty(),
        }
    }

    const fn orders_dates(self) -> bool {
        matches!(self, Self::Min | Self::Max)
    }
}

/// `Sum(1, 2, 3)`.
#[derive(Debug)]
pub(crate) struct ScalarAggregate {
    aggregate: Aggregate,
    descriptor: FunctionDescriptor,
}

impl ScalarAggregate {
    pub(crate) const fn new(aggregate: Aggregate) -> Self {
        // Min and Max take anything so mixed dates and numbers are caught
        // by name rather than as a plain mismatch.
        let params = if aggregate.orders_dates() {
            ANY_PARAMS
        } else {
            NUMBER_PARAMS
        };
        ScalarAggregate {
            aggregate,
            descriptor: FunctionDescriptor::new(
                aggregate.name(),
                FunctionCategory::Math,
                params,
                ReturnSpec::NUMERIC,
            )
            .variadic()
            .labels(&["number"]),
        }
    }
}

impl FunctionOverload for ScalarAggregate {
    fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }

    fn check_types(&self, checker: &mut CallChecker<'_>) -> DType {
        let count = checker.arg_count();
        if self.aggregate.orders_dates() {
            if report_mixed_dates(checker) {
                return DType::ERROR;
            }
            for index in 0..count {
                checker.check_scalar(index, Scalar::Numeric);
            }
            if checker.has_errors() {
                return DType::ERROR;
            }
        }
        numeric_return_type(
            (0..count).map(|index| checker.arg_type(index)),
            checker.features(),
            self.aggregate.native_decimal(),
        )
    }
}

/// `Sum(Orders, Quantity * Price)`.
#[derive(Debug)]
pub(crate) struct TableAggregate {
    aggregate: Aggregate,
    descriptor: FunctionDescriptor,
}

impl TableAggregate {
    pub(crate) const fn new(aggregate: Aggregate) -> Self {
        TableAggregate {
            aggregate,
            descriptor: table_form(aggregate, ReturnSpec::NUMERIC),
        }
    }
}

impl FunctionOverload for TableAggregate {
    fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }

    fn check_types(&self, checker: &mut CallChecker<'_>) -> DType {
        let expression = checker.arg_type(1);
        if self.aggregate.orders_dates() && expression.is_date_time() {
            checker.type_mismatch(1, "Number");
            return DType::ERROR;
        }
        if !checker.check_scalar(1, Scalar::Numeric) {
            return DType::ERROR;
        }
        numeric_return_type(
            [expression],
            checker.features(),
            self.aggregate.native_decimal(),
        )
    }
}

/// `Min(Date(2024, 1, 1), Now())` and `Max(Orders, Shipped)`.
///
/// Date and DateTime mix, with dates converting to DateTime. Time does not
/// mix with either.
#[derive(Debug)]
pub(crate) struct DateTimeExtremum {
    descriptor: FunctionDescriptor,
}

impl DateTimeExtremum {
    pub(crate) const fn scalar(aggregate: Aggregate) -> Self {
        DateTimeExtremum {
            descriptor: FunctionDescriptor::new(
                aggregate.name(),
                FunctionCategory::DateTime,
                ANY_PARAMS,
                ReturnSpec::DATE_TIME,
            )
            .variadic()
            .labels(&["value"]),
        }
    }

    pub(crate) const fn table(aggregate: Aggregate) -> Self {
        DateTimeExtremum {
            descriptor: table_form(aggregate, ReturnSpec::DATE_TIME),
        }
    }

    fn is_table_form(&self) -> bool {
        self.descriptor.shape == Shape::Table
    }
}

impl FunctionOverload for DateTimeExtremum {
    fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }

    fn check_types(&self, checker: &mut CallChecker<'_>) -> DType {
        let values = if self.is_table_form() {
            1..2
        } else {
            0..checker.arg_count()
        };
        if !self.is_table_form() && report_mixed_dates(checker) {
            return DType::ERROR;
        }
        for index in values.clone() {
            let ty = checker.arg_type(index);
            if !(ty.is_date_time() || ty.is_blank()) {
                checker.type_mismatch(index, "DateTime");
            }
        }
        if checker.has_errors() {
            return DType::ERROR;
        }
        if values.clone().all(|index| checker.arg_type(index).is_blank()) {
            return DType::DATE_TIME;
        }
        checker
            .union_args(values, ErrorCode::E2008)
            .unwrap_or(DType::ERROR)
    }
}

const fn table_form(aggregate: Aggregate, returns: ReturnSpec) -> FunctionDescriptor {
    FunctionDescriptor::new(aggregate.name(), FunctionCategory::Table, TABLE_PARAMS, returns)
        .shape(Shape::Table)
        .lambdas(ArgMask::NONE.with(1))
        .delegates(aggregate.capability())
        .labels(&["source", "expression"])
}

/// `ErrDateAndNumberMixed` at the first date argument when numbers are
/// present too.
fn report_mixed_dates(checker: &mut CallChecker<'_>) -> bool {
    let count = checker.arg_count();
    let first_date = (0..count).find(|&index| checker.arg_type(index).is_date_time());
    let has_number = (0..count).any(|index| checker.arg_type(index).is_numeric());
    match first_date {
        Some(index) if has_number => {
            let name = checker.descriptor().name;
            let diagnostic = checker
                .at_arg(index, ErrorCode::E2011)
                .with_message(format!("{name} cannot mix dates and numbers"))
                .with_arg(name);
            checker.report(diagnostic);
            true
        }
        _ => false,
    }
}
