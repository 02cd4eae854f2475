//! The builtin function library.
//!
//! [`BUILTINS`] is the single table of mechanical overloads: each row is a
//! complete [`FunctionDescriptor`] and is checked by the generic
//! [`Builtin`] combinator. Functions whose return type needs real logic are
//! registered from [`crate::bespoke`] after the table.

use texl_types::Kind;

use crate::bespoke;
use crate::combinators::Builtin;
use crate::descriptor::{
    ArgMask, DelegationCapability as D, FunctionCategory as C, FunctionDescriptor, FunctionFlags,
    ParamSpec as P, ReturnSpec as R, ScalarReturn, Shape,
};
use crate::{FunctionRegistry, RegistryError};

const fn row(
    name: &'static str,
    category: C,
    params: &'static [P],
    returns: R,
    labels: &'static [&'static str],
) -> FunctionDescriptor {
    FunctionDescriptor::new(name, category, params, returns).labels(labels)
}

/// `F(column)` over a one-column table, the table form of a one-argument
/// scalar function returning `returns`.
const fn lift(
    name: &'static str,
    category: C,
    params: &'static [P],
    returns: ScalarReturn,
) -> FunctionDescriptor {
    FunctionDescriptor::new(name, category, params, R::Lifted(returns))
        .shape(Shape::Table)
        .labels(&["column"])
}

const fn math(name: &'static str, returns: R) -> FunctionDescriptor {
    row(name, C::Math, &[P::NUMBER], returns, &["number"])
}

const fn text(name: &'static str) -> FunctionDescriptor {
    row(name, C::Text, &[P::TEXT], R::TEXT, &["text"])
}

const fn date_part(name: &'static str) -> FunctionDescriptor {
    row(name, C::DateTime, &[P::DATE_TIME], R::DEFAULT_NUMERIC, &["datetime"])
        .delegates(D::DATE_PARTS)
}

const fn table(
    name: &'static str,
    params: &'static [P],
    returns: R,
    labels: &'static [&'static str],
) -> FunctionDescriptor {
    row(name, C::Table, params, returns, labels).shape(Shape::Table)
}

/// All table-driven builtin overloads.
pub static BUILTINS: &[FunctionDescriptor] = &[
    // === Math ===
    math("Abs", R::NUMERIC).delegates(D::ABS),
    lift("Abs", C::Math, &[P::NUMBER_COLUMN], ScalarReturn::Numeric),
    math("Int", R::NUMERIC),
    lift("Int", C::Math, &[P::NUMBER_COLUMN], ScalarReturn::Numeric),
    row("Trunc", C::Math, &[P::NUMBER, P::NUMBER], R::NUMERIC, &["number", "digits"]).optional(1),
    lift("Trunc", C::Math, &[P::NUMBER_COLUMN], ScalarReturn::Numeric),
    math("Sqrt", R::FLOAT),
    lift("Sqrt", C::Math, &[P::NUMBER_COLUMN], ScalarReturn::Float),
    math("Exp", R::FLOAT),
    lift("Exp", C::Math, &[P::NUMBER_COLUMN], ScalarReturn::Float),
    math("Ln", R::FLOAT),
    lift("Ln", C::Math, &[P::NUMBER_COLUMN], ScalarReturn::Float),
    row("Power", C::Math, &[P::NUMBER, P::NUMBER], R::FLOAT, &["number", "exponent"]),
    row("Mod", C::Math, &[P::NUMBER, P::NUMBER], R::NUMERIC, &["number", "divisor"]),
    row("Round", C::Math, &[P::NUMBER, P::NUMBER], R::NUMERIC, &["number", "digits"]),
    row("RoundUp", C::Math, &[P::NUMBER, P::NUMBER], R::NUMERIC, &["number", "digits"]),
    row("RoundDown", C::Math, &[P::NUMBER, P::NUMBER], R::NUMERIC, &["number", "digits"]),
    row("Pi", C::Math, &[], R::FLOAT, &[]),
    row("Rand", C::Math, &[], R::FLOAT, &[]).volatile(),
    row("RandBetween", C::Math, &[P::NUMBER, P::NUMBER], R::DEFAULT_NUMERIC, &["bottom", "top"]).volatile(),

    // === Text ===
    text("Lower").delegates(D::TEXT_CASE),
    lift("Lower", C::Text, &[P::TEXT_COLUMN], ScalarReturn::Kind(Kind::String)),
    text("Upper").delegates(D::TEXT_CASE),
    lift("Upper", C::Text, &[P::TEXT_COLUMN], ScalarReturn::Kind(Kind::String)),
    text("Trim").delegates(D::TRIM),
    lift("Trim", C::Text, &[P::TEXT_COLUMN], ScalarReturn::Kind(Kind::String)),
    text("TrimEnds").delegates(D::TRIM),
    lift("TrimEnds", C::Text, &[P::TEXT_COLUMN], ScalarReturn::Kind(Kind::String)),
    text("Proper"),
    lift("Proper", C::Text, &[P::TEXT_COLUMN], ScalarReturn::Kind(Kind::String)),
    row("Left", C::Text, &[P::TEXT, P::NUMBER], R::TEXT, &["text", "count"]),
    row("Left", C::Text, &[P::TEXT_COLUMN, P::NUMBER], R::Lifted(ScalarReturn::Kind(Kind::String)), &["column", "count"])
        .shape(Shape::Table),
    row("Right", C::Text, &[P::TEXT, P::NUMBER], R::TEXT, &["text", "count"]),
    row("Right", C::Text, &[P::TEXT_COLUMN, P::NUMBER], R::Lifted(ScalarReturn::Kind(Kind::String)), &["column", "count"])
        .shape(Shape::Table),
    row("Mid", C::Text, &[P::TEXT, P::NUMBER, P::NUMBER], R::TEXT, &["text", "start", "count"]).optional(1),
    row("Concatenate", C::Text, &[P::TEXT], R::TEXT, &["text"]).variadic(),
    row("Find", C::Text, &[P::TEXT, P::TEXT, P::NUMBER], R::DEFAULT_NUMERIC, &["find", "within", "start"]).optional(1),
    row("Substitute", C::Text, &[P::TEXT, P::TEXT, P::TEXT, P::NUMBER], R::TEXT, &["text", "old", "new", "instance"])
        .optional(1),
    row("Replace", C::Text, &[P::TEXT, P::NUMBER, P::NUMBER, P::TEXT], R::TEXT, &["text", "start", "count", "new"]),
    row("StartsWith", C::Text, &[P::TEXT, P::TEXT], R::BOOLEAN, &["text", "start"]).delegates(D::STARTS_WITH),
    row("EndsWith", C::Text, &[P::TEXT, P::TEXT], R::BOOLEAN, &["text", "end"]).delegates(D::ENDS_WITH),
    row("Char", C::Text, &[P::NUMBER], R::TEXT, &["code"]),
    lift("Char", C::Text, &[P::NUMBER_COLUMN], ScalarReturn::Kind(Kind::String)),
    row("UniChar", C::Text, &[P::NUMBER], R::TEXT, &["code"]),
    lift("UniChar", C::Text, &[P::NUMBER_COLUMN], ScalarReturn::Kind(Kind::String)),
    row("Len", C::Text, &[P::TEXT], R::DEFAULT_NUMERIC, &["text"]),
    lift("Len", C::Text, &[P::TEXT_COLUMN], ScalarReturn::DefaultNumeric),
    row("Value", C::Text, &[P::TEXT, P::TEXT], R::DEFAULT_NUMERIC, &["text", "language"]).optional(1),
    row("Decimal", C::Text, &[P::TEXT, P::TEXT], R::DECIMAL, &["text", "language"]).optional(1),
    row("Float", C::Text, &[P::TEXT, P::TEXT], R::FLOAT, &["text", "language"]).optional(1),
    row("Text", C::Text, &[P::ANY, P::TEXT, P::TEXT], R::TEXT, &["value", "format", "language"]).optional(2),
    row("Boolean", C::Text, &[P::TEXT], R::BOOLEAN, &["text"]),
    row("GUID", C::Text, &[P::TEXT], R::GUID, &["text"]).optional(1).volatile(),
    row("Hex2Dec", C::Text, &[P::TEXT], R::FLOAT, &["hex"]),
    row("Dec2Hex", C::Text, &[P::NUMBER, P::NUMBER], R::TEXT, &["number", "places"]).optional(1),

    // === Date and time ===
    row("Now", C::DateTime, &[], R::DATE_TIME, &[]).volatile(),
    row("Today", C::DateTime, &[], R::DATE, &[]).volatile(),
    row("Date", C::DateTime, &[P::NUMBER, P::NUMBER, P::NUMBER], R::DATE, &["year", "month", "day"]),
    row("Time", C::DateTime, &[P::NUMBER, P::NUMBER, P::NUMBER, P::NUMBER], R::TIME, &["hour", "minute", "second", "millisecond"])
        .optional(1),
    row(
        "DateTime",
        C::DateTime,
        &[P::NUMBER, P::NUMBER, P::NUMBER, P::NUMBER, P::NUMBER, P::NUMBER, P::NUMBER],
        R::DATE_TIME,
        &["year", "month", "day", "hour", "minute", "second", "millisecond"],
    )
    .optional(1),
    date_part("Year"),
    date_part("Month"),
    date_part("Day"),
    date_part("Hour"),
    date_part("Minute"),
    date_part("Second"),
    row("Weekday", C::DateTime, &[P::DATE_TIME, P::ANY], R::DEFAULT_NUMERIC, &["datetime", "start_of_week"]).optional(1),
    row("DateValue", C::DateTime, &[P::TEXT, P::TEXT], R::DATE, &["text", "language"]).optional(1),
    row("TimeValue", C::DateTime, &[P::TEXT, P::TEXT], R::TIME, &["text", "language"]).optional(1),
    row("DateTimeValue", C::DateTime, &[P::TEXT, P::TEXT], R::DATE_TIME, &["text", "language"]).optional(1),
    row("DateAdd", C::DateTime, &[P::DATE_TIME, P::NUMBER, P::ANY], R::DATE_TIME, &["datetime", "addition", "units"])
        .optional(1),
    row("DateDiff", C::DateTime, &[P::DATE_TIME, P::DATE_TIME, P::ANY], R::DEFAULT_NUMERIC, &["start", "end", "units"])
        .optional(1),
    row("IsToday", C::DateTime, &[P::DATE_TIME], R::BOOLEAN, &["datetime"]).volatile(),

    // === Color ===
    row("RGBA", C::Color, &[P::NUMBER, P::NUMBER, P::NUMBER, P::NUMBER], R::COLOR, &["red", "green", "blue", "alpha"]),
    row("ColorValue", C::Color, &[P::TEXT], R::COLOR, &["text"]),
    row("ColorFade", C::Color, &[P::COLOR, P::NUMBER], R::COLOR, &["color", "fade"]),

    // === Logical and information ===
    row("Not", C::Logical, &[P::BOOLEAN], R::BOOLEAN, &["value"]).delegates(D::NOT),
    row("IsBlank", C::Information, &[P::ANY], R::BOOLEAN, &["value"])
        .shape(Shape::Any)
        .delegates(D::IS_BLANK),
    row("IsEmpty", C::Information, &[P::Table], R::BOOLEAN, &["source"]).shape(Shape::Table),
    row("IsError", C::Information, &[P::ANY], R::BOOLEAN, &["value"])
        .shape(Shape::Any)
        .flags(FunctionFlags::PURE.union(FunctionFlags::REQUIRES_ERROR_CONTEXT)),
    row("IsNumeric", C::Information, &[P::ANY], R::BOOLEAN, &["value"]).shape(Shape::Any),
    row("Coalesce", C::Logical, &[P::ANY], R::UnionOfArgs, &["value"])
        .variadic()
        .shape(Shape::Any),

    // === Tables ===
    table("CountA", &[P::ANY_COLUMN], R::DEFAULT_NUMERIC, &["column"]).delegates(D::COUNT),
    table("First", &[P::Table], R::RowOfArg0, &["source"]).delegates(D::TOP),
    table("Last", &[P::Table], R::RowOfArg0, &["source"]),
    table("Index", &[P::Table, P::NUMBER], R::RowOfArg0, &["source", "index"]),
    table("Defaults", &[P::Table], R::RowOfArg0, &["source"]),
    table("FirstN", &[P::Table, P::NUMBER], R::TableOfArg0, &["source", "count"])
        .optional(1)
        .delegates(D::TOP),
    table("LastN", &[P::Table, P::NUMBER], R::TableOfArg0, &["source", "count"]).optional(1),
    table("Shuffle", &[P::Table], R::TableOfArg0, &["source"]).volatile(),
    table("Filter", &[P::Table, P::Predicate], R::TableOfArg0, &["source", "condition"])
        .variadic()
        .lambdas(ArgMask::ALL_BUT_FIRST)
        .delegates(D::FILTER),
    table("LookUp", &[P::Table, P::Predicate, P::RowExpr], R::ArgOrRowOfArg0(2), &["source", "condition", "result"])
        .optional(1)
        .lambdas(ArgMask::ALL_BUT_FIRST)
        .delegates(D::LOOKUP),
    table("Sort", &[P::Table, P::RowExpr, P::ANY], R::TableOfArg0, &["source", "formula", "order"])
        .optional(1)
        .lambdas(ArgMask::NONE.with(1))
        .delegates(D::SORT),
];

/// Register the whole builtin library: the table rows, then the bespoke
/// overloads.
pub fn register_builtins(registry: &mut FunctionRegistry) -> Result<(), RegistryError> {
    for descriptor in BUILTINS {
        registry.register(Builtin::new(descriptor))?;
    }
    bespoke::register(registry)
}
