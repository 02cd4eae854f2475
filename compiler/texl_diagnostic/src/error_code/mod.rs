//! Error codes for call-site diagnostics.
//!
//! The first digit is the protocol phase that reports the code:
//! - E1xxx: resolution and arity
//! - E2xxx: argument and return types
//! - E3xxx: semantic checks (data-source context, constant arguments)
//! - W4xxx: delegation advice
//!
//! Each code also carries the resource key of its message template. The
//! checker never localizes; it hands the key and the ordered template
//! arguments to the host.

use std::fmt;

use crate::Severity;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Resolution / arity (E1xxx)
    /// Argument count outside the overload's bounds
    E1001,
    /// No function registered under this name
    E1002,
    /// No overload accepts this argument shape (scalar vs table)
    E1003,

    // Types (E2xxx)
    /// Argument type neither accepted nor coercible
    E2001,
    /// Table argument required
    E2002,
    /// One-column table required
    E2003,
    /// Record argument required
    E2004,
    /// Records cannot be unified into one table
    E2005,
    /// Tables cannot be unified
    E2006,
    /// `Reduce` accumulator type cannot be determined
    E2007,
    /// Return type cannot be determined from the arguments
    E2008,
    /// Type literal required in this position
    E2009,
    /// Column of a numeric aggregate is not numeric
    E2010,
    /// Date/time and numeric arguments mixed in one aggregate
    E2011,
    /// Column type unknown; result computed on a best-effort basis
    W2001,

    // Semantics (E3xxx)
    /// `Clear` target is not a clearable collection
    E3001,
    /// `AsType`/`IsType` table argument is not a connected data source
    E3002,
    /// `Trace` custom record contains a field that cannot be serialized
    E3003,
    /// Regular expression must be a constant
    E3004,
    /// Regular expression does not compile
    E3005,
    /// Behavior function used where side effects are not allowed
    E3006,
    /// `Blank()` is not a valid type literal under strict type arguments
    E3007,

    // Delegation (W4xxx)
    /// Call shape not delegable; evaluated locally
    W4001,
    /// Source is a one-to-many relationship expansion; evaluated locally
    W4002,
}

/// Protocol phase a code belongs to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Phase {
    Arity,
    Types,
    Semantics,
    Delegation,
}

impl ErrorCode {
    /// Every code, for exhaustive tests.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E2008,
        ErrorCode::E2009,
        ErrorCode::E2010,
        ErrorCode::E2011,
        ErrorCode::W2001,
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        ErrorCode::E3004,
        ErrorCode::E3005,
        ErrorCode::E3006,
        ErrorCode::E3007,
        ErrorCode::W4001,
        ErrorCode::W4002,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::E1001 => "E1001",
            Self::E1002 => "E1002",
            Self::E1003 => "E1003",
            Self::E2001 => "E2001",
            Self::E2002 => "E2002",
            Self::E2003 => "E2003",
            Self::E2004 => "E2004",
            Self::E2005 => "E2005",
            Self::E2006 => "E2006",
            Self::E2007 => "E2007",
            Self::E2008 => "E2008",
            Self::E2009 => "E2009",
            Self::E2010 => "E2010",
            Self::E2011 => "E2011",
            Self::W2001 => "W2001",
            Self::E3001 => "E3001",
            Self::E3002 => "E3002",
            Self::E3003 => "E3003",
            Self::E3004 => "E3004",
            Self::E3005 => "E3005",
            Self::E3006 => "E3006",
            Self::E3007 => "E3007",
            Self::W4001 => "W4001",
            Self::W4002 => "W4002",
        }
    }

    /// Resource key of the message template.
    pub const fn resource_key(self) -> &'static str {
        match self {
            Self::E1001 => "ErrBadArity",
            Self::E1002 => "ErrUnknownFunction",
            Self::E1003 => "ErrBadSchema_ExpectedShape",
            Self::E2001 => "ErrBadType_ExpectedType_ProvidedType",
            Self::E2002 => "ErrNeedTable_Func",
            Self::E2003 => "ErrInvalidSchemaNeedCol",
            Self::E2004 => "ErrNeedRecord_Func",
            Self::E2005 => "ErrIncompatibleRecord",
            Self::E2006 => "ErrIncompatibleTable",
            Self::E2007 => "ErrReduceUndeterminedType",
            Self::E2008 => "ErrUndeterminedReturnType",
            Self::E2009 => "ErrExpectedTypeLiteral",
            Self::E2010 => "ErrInvalidSchemaNeedNumCol_Col",
            Self::E2011 => "ErrMixedDateTimeAndNumber",
            Self::W2001 => "WrnUnknownColumnType_Col",
            Self::E3001 => "ErrInvalidClearTarget",
            Self::E3002 => "ErrAsTypeAndIsTypeExpectConnectedDataSource",
            Self::E3003 => "ErrTraceInvalidCustomRecordType",
            Self::E3004 => "ErrVariableRegEx",
            Self::E3005 => "ErrInvalidRegEx",
            Self::E3006 => "ErrBehaviorFunctionInDataContext",
            Self::E3007 => "ErrBlankTypeLiteral",
            Self::W4001 => "SuggestRemoteExecutionHint",
            Self::W4002 => "SuggestRemoteExecutionHint_OneToMany",
        }
    }

    pub const fn phase(self) -> Phase {
        match self {
            Self::E1001 | Self::E1002 | Self::E1003 => Phase::Arity,
            Self::E2001
            | Self::E2002
            | Self::E2003
            | Self::E2004
            | Self::E2005
            | Self::E2006
            | Self::E2007
            | Self::E2008
            | Self::E2009
            | Self::E2010
            | Self::E2011
            | Self::W2001 => Phase::Types,
            Self::E3001
            | Self::E3002
            | Self::E3003
            | Self::E3004
            | Self::E3005
            | Self::E3006
            | Self::E3007 => Phase::Semantics,
            Self::W4001 | Self::W4002 => Phase::Delegation,
        }
    }

    /// Warning codes (`W` prefix).
    pub const fn is_warning(self) -> bool {
        matches!(self, Self::W2001 | Self::W4001 | Self::W4002)
    }

    /// Severity a diagnostic with this code is reported at.
    pub const fn default_severity(self) -> Severity {
        if self.is_warning() {
            Severity::Warning
        } else {
            Severity::Severe
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests;
