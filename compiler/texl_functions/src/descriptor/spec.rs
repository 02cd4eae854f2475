//! Parameter and return specifications.

use texl_types::Kind;

/// What a scalar position takes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Scalar {
    /// Number or Decimal; Boolean converts.
    Numeric,
    /// Text; other scalars convert to text.
    Text,
    Boolean,
    /// A specific primitive kind, with the general conversions.
    Of(Kind),
    /// Any non-absorbing type.
    Any,
}

/// What one argument position takes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParamSpec {
    Scalar(Scalar),
    /// A one-column table whose column satisfies the scalar spec. Converting
    /// the column keeps the table's name, rows and source.
    Column(Scalar),
    Table,
    Record,
    /// Row-scoped expression that must yield a Boolean.
    Predicate,
    /// Row-scoped expression of any type.
    RowExpr,
    /// A type literal.
    TypeArg,
}

impl ParamSpec {
    pub const NUMBER: Self = Self::Scalar(Scalar::Numeric);
    pub const TEXT: Self = Self::Scalar(Scalar::Text);
    pub const BOOLEAN: Self = Self::Scalar(Scalar::Boolean);
    pub const ANY: Self = Self::Scalar(Scalar::Any);
    pub const DATE: Self = Self::Scalar(Scalar::Of(Kind::Date));
    pub const TIME: Self = Self::Scalar(Scalar::Of(Kind::Time));
    pub const DATE_TIME: Self = Self::Scalar(Scalar::Of(Kind::DateTime));
    pub const COLOR: Self = Self::Scalar(Scalar::Of(Kind::Color));

    pub const NUMBER_COLUMN: Self = Self::Column(Scalar::Numeric);
    pub const TEXT_COLUMN: Self = Self::Column(Scalar::Text);
    pub const ANY_COLUMN: Self = Self::Column(Scalar::Any);

    /// Human-readable name of what the position expects.
    pub fn expected(self) -> &'static str {
        match self {
            Self::Scalar(scalar) => scalar.expected(),
            Self::Column(Scalar::Numeric) => "Table{Number}",
            Self::Column(Scalar::Text) => "Table{Text}",
            Self::Column(Scalar::Boolean) => "Table{Boolean}",
            Self::Column(_) | Self::Table => "Table",
            Self::Record => "Record",
            Self::Predicate => "Boolean",
            Self::RowExpr => "expression",
            Self::TypeArg => "type",
        }
    }
}

impl Scalar {
    pub fn expected(self) -> &'static str {
        match self {
            Self::Numeric => "Number",
            Self::Text => "Text",
            Self::Boolean => "Boolean",
            Self::Of(kind) => kind.name(),
            Self::Any => "value",
        }
    }
}

/// Return type of a scalar computation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ScalarReturn {
    /// Always this primitive kind.
    Kind(Kind),
    /// Follows the numeric arguments (Decimal in, Decimal out).
    Numeric,
    /// Decimal, or Number when numbers are floats.
    DefaultNumeric,
    /// Always Number; the function has no Decimal implementation.
    Float,
}

/// How an overload's return type is derived from its arguments.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ReturnSpec {
    Scalar(ScalarReturn),
    /// One-column table whose column is the scalar return computed from the
    /// first argument's column type.
    Lifted(ScalarReturn),
    /// Row type of the table in argument 0.
    RowOfArg0,
    /// The table in argument 0, unchanged.
    TableOfArg0,
    /// The type of argument `n` when present, else the row of argument 0.
    ArgOrRowOfArg0(usize),
    /// Common type of all arguments; earlier arguments convert toward it.
    UnionOfArgs,
    Void,
    /// Derived by the overload's own `check_types`.
    Custom,
}

impl ReturnSpec {
    pub const NUMERIC: Self = Self::Scalar(ScalarReturn::Numeric);
    pub const DEFAULT_NUMERIC: Self = Self::Scalar(ScalarReturn::DefaultNumeric);
    pub const FLOAT: Self = Self::Scalar(ScalarReturn::Float);
    pub const TEXT: Self = Self::Scalar(ScalarReturn::Kind(Kind::String));
    pub const BOOLEAN: Self = Self::Scalar(ScalarReturn::Kind(Kind::Boolean));
    pub const DATE: Self = Self::Scalar(ScalarReturn::Kind(Kind::Date));
    pub const TIME: Self = Self::Scalar(ScalarReturn::Kind(Kind::Time));
    pub const DATE_TIME: Self = Self::Scalar(ScalarReturn::Kind(Kind::DateTime));
    pub const COLOR: Self = Self::Scalar(ScalarReturn::Kind(Kind::Color));
    pub const GUID: Self = Self::Scalar(ScalarReturn::Kind(Kind::Guid));
    pub const DECIMAL: Self = Self::Scalar(ScalarReturn::Kind(Kind::Decimal));
}
