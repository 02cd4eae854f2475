//! Declarative description of one function overload.
//!
//! A [`FunctionDescriptor`] is plain const data: name, arity, parameter and
//! return specs, purity flags and delegation capability. Most builtins are
//! nothing but a descriptor driven by the generic combinators; bespoke
//! overloads carry one too, so the registry, signature help and the arity
//! check never need to know which kind they are looking at.

mod spec;

use std::fmt;

use bitflags::bitflags;

pub use spec::{ParamSpec, ReturnSpec, Scalar, ScalarReturn};

bitflags! {
    /// Declarative contracts consumed by the binder and runtime.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct FunctionFlags: u16 {
        /// No observable effect beyond the return value.
        const SELF_CONTAINED = 1 << 0;
        /// Same arguments, same result. False for `Now`, `Rand`, `GUID`.
        const STATELESS = 1 << 1;
        /// Changes data; only legal in behavior formulas.
        const MODIFIES_VALUES = 1 << 2;
        /// The first argument is the collection being changed.
        const MUTATES_ARG0 = 1 << 3;
        /// Errors in arguments reach the function instead of short-circuiting.
        const REQUIRES_ERROR_CONTEXT = 1 << 4;

        const PURE = Self::SELF_CONTAINED.bits() | Self::STATELESS.bits();
        const BEHAVIOR = Self::MODIFIES_VALUES.bits() | Self::MUTATES_ARG0.bits();
    }
}

bitflags! {
    /// Server-side operations a function or operator needs from a data
    /// source to be delegated.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct DelegationCapability: u32 {
        // === Table operations ===
        const FILTER = 1 << 0;
        const SORT = 1 << 1;
        const LOOKUP = 1 << 2;
        const COUNT = 1 << 3;
        const SUM = 1 << 4;
        const AVERAGE = 1 << 5;
        const MIN = 1 << 6;
        const MAX = 1 << 7;
        const TOP = 1 << 8;

        // === Operators inside delegated predicates ===
        const EQ = 1 << 12;
        const NOT_EQ = 1 << 13;
        const LT = 1 << 14;
        const LT_EQ = 1 << 15;
        const GT = 1 << 16;
        const GT_EQ = 1 << 17;
        const AND = 1 << 18;
        const OR = 1 << 19;
        const NOT = 1 << 20;
        const ARITHMETIC = 1 << 21;
        const IN = 1 << 22;

        // === Scalar functions inside delegated predicates ===
        const IS_BLANK = 1 << 24;
        const STARTS_WITH = 1 << 25;
        const ENDS_WITH = 1 << 26;
        const TEXT_CASE = 1 << 27;
        const TRIM = 1 << 28;
        const ABS = 1 << 29;
        const DATE_PARTS = 1 << 30;
    }
}

/// Argument count bounds. `max == None` is unbounded.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Arity {
    pub min: usize,
    pub max: Option<usize>,
}

impl Arity {
    pub const fn exactly(n: usize) -> Self {
        Arity { min: n, max: Some(n) }
    }

    pub const fn between(min: usize, max: usize) -> Self {
        Arity { min, max: Some(max) }
    }

    pub const fn at_least(min: usize) -> Self {
        Arity { min, max: None }
    }

    #[inline]
    pub const fn contains(self, count: usize) -> bool {
        count >= self.min
            && match self.max {
                Some(max) => count <= max,
                None => true,
            }
    }

    #[inline]
    pub const fn is_variadic(self) -> bool {
        self.max.is_none()
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) if max == self.min => write!(f, "{max}"),
            Some(max) => write!(f, "{}..={max}", self.min),
            None => write!(f, "{}..", self.min),
        }
    }
}

/// Bit set of argument positions. Positions past 31 fold into bit 31,
/// which is enough for the variadic tails it is used for.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Debug)]
pub struct ArgMask(u32);

impl ArgMask {
    pub const NONE: ArgMask = ArgMask(0);
    /// Every position from 1 on.
    pub const ALL_BUT_FIRST: ArgMask = ArgMask(!1);

    #[inline]
    const fn bit(index: usize) -> u32 {
        if index >= 31 {
            1 << 31
        } else {
            1 << index
        }
    }

    #[must_use]
    pub const fn with(self, index: usize) -> Self {
        ArgMask(self.0 | Self::bit(index))
    }

    #[inline]
    pub const fn contains(self, index: usize) -> bool {
        self.0 & Self::bit(index) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Shape of the first argument an overload is written for.
///
/// Overloads sharing a name (`Len` over text, `Len` over a one-column
/// table) are told apart by this shape, not by argument types alone.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Shape {
    /// First argument is a scalar or a record (or there is none).
    Scalar,
    /// First argument is a table.
    Table,
    /// No preference.
    Any,
}

impl Shape {
    pub fn matches(self, first_arg: Option<&texl_types::DType>) -> bool {
        match (self, first_arg) {
            (Self::Any, _) => true,
            (Self::Scalar, None) => true,
            (Self::Table, None) => false,
            (Self::Scalar, Some(ty)) => !ty.is_table(),
            (Self::Table, Some(ty)) => ty.is_table(),
        }
    }
}

/// Grouping used by signature help.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FunctionCategory {
    Math,
    Text,
    DateTime,
    Color,
    Logical,
    Information,
    Table,
    Behavior,
}

/// One overload's static declaration.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FunctionDescriptor {
    /// Locale-independent name.
    pub name: &'static str,
    pub namespace: Option<&'static str>,
    pub category: FunctionCategory,
    pub arity: Arity,
    /// Declared parameters. When the arity is unbounded the last entry
    /// repeats for the tail.
    pub params: &'static [ParamSpec],
    pub returns: ReturnSpec,
    pub shape: Shape,
    pub flags: FunctionFlags,
    pub delegation: DelegationCapability,
    /// Positions evaluated once per row with the row's fields in scope.
    pub lambda_args: ArgMask,
    /// Positions that are type literals rather than values.
    pub type_args: ArgMask,
    /// Parameter labels for signature help, one per declared parameter.
    pub labels: &'static [&'static str],
}

impl FunctionDescriptor {
    /// A pure, scalar-shaped overload taking exactly `params`.
    pub const fn new(
        name: &'static str,
        category: FunctionCategory,
        params: &'static [ParamSpec],
        returns: ReturnSpec,
    ) -> Self {
        FunctionDescriptor {
            name,
            namespace: None,
            category,
            arity: Arity::exactly(params.len()),
            params,
            returns,
            shape: Shape::Scalar,
            flags: FunctionFlags::PURE,
            delegation: DelegationCapability::empty(),
            lambda_args: ArgMask::NONE,
            type_args: ArgMask::NONE,
            labels: &[],
        }
    }

    /// Make the last `count` parameters optional.
    #[must_use]
    pub const fn optional(mut self, count: usize) -> Self {
        self.arity.min = self.params.len() - count;
        self
    }

    /// Let the last parameter repeat.
    #[must_use]
    pub const fn variadic(mut self) -> Self {
        self.arity.max = None;
        self
    }

    #[must_use]
    pub const fn min_args(mut self, min: usize) -> Self {
        self.arity.min = min;
        self
    }

    #[must_use]
    pub const fn shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    #[must_use]
    pub const fn flags(mut self, flags: FunctionFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Same result for the same arguments no longer holds.
    #[must_use]
    pub const fn volatile(mut self) -> Self {
        self.flags = self.flags.difference(FunctionFlags::STATELESS);
        self
    }

    #[must_use]
    pub const fn delegates(mut self, capability: DelegationCapability) -> Self {
        self.delegation = capability;
        self
    }

    #[must_use]
    pub const fn lambdas(mut self, mask: ArgMask) -> Self {
        self.lambda_args = mask;
        self
    }

    #[must_use]
    pub const fn type_arg(mut self, index: usize) -> Self {
        self.type_args = self.type_args.with(index);
        self
    }

    #[must_use]
    pub const fn labels(mut self, labels: &'static [&'static str]) -> Self {
        self.labels = labels;
        self
    }

    #[must_use]
    pub const fn in_namespace(mut self, namespace: &'static str) -> Self {
        self.namespace = Some(namespace);
        self
    }

    /// Parameter for argument `index`, following the variadic tail.
    pub fn param(&self, index: usize) -> Option<&ParamSpec> {
        match self.params.get(index) {
            Some(spec) => Some(spec),
            None if self.arity.is_variadic() => self.params.last(),
            None => None,
        }
    }

    #[inline]
    pub fn is_lambda(&self, index: usize) -> bool {
        self.lambda_args.contains(index)
    }

    #[inline]
    pub fn is_type_arg(&self, index: usize) -> bool {
        self.type_args.contains(index)
    }

    #[inline]
    pub fn is_behavior(&self) -> bool {
        self.flags.contains(FunctionFlags::MODIFIES_VALUES)
    }

    /// `Namespace.Name`, or just the name.
    pub fn qualified_name(&self) -> String {
        match self.namespace {
            Some(namespace) => format!("{namespace}.{}", self.name),
            None => self.name.to_string(),
        }
    }
}
