//! Language feature switches that change type-checking rules.

/// Feature set consulted by relations and function checks.
///
/// `Default` is the legacy rule set. Hosts build variations with the
/// `with_*` methods:
///
/// ```
/// use texl_types::Features;
///
/// let features = Features::v1().with_number_is_float(true);
/// assert!(features.power_fx_v1_compatibility_rules);
/// assert!(features.number_is_float);
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Features {
    /// Untyped numeric literals and results default to Number rather than
    /// Decimal.
    pub number_is_float: bool,
    /// Stricter coercions (no Text to DateTime) and consistent single-column
    /// table naming.
    pub power_fx_v1_compatibility_rules: bool,
    /// Table-producing scalar functions name their single column `Value`
    /// regardless of rule set.
    pub consistent_one_column_table_result: bool,
    /// Type arguments of `AsType`, `IsType` and `ParseJSON` must not be Blank.
    pub strict_type_arguments: bool,
}

impl Features {
    pub const fn legacy() -> Self {
        Self {
            number_is_float: false,
            power_fx_v1_compatibility_rules: false,
            consistent_one_column_table_result: false,
            strict_type_arguments: false,
        }
    }

    pub const fn v1() -> Self {
        Self {
            number_is_float: false,
            power_fx_v1_compatibility_rules: true,
            consistent_one_column_table_result: true,
            strict_type_arguments: true,
        }
    }

    #[must_use]
    pub const fn with_number_is_float(mut self, on: bool) -> Self {
        self.number_is_float = on;
        self
    }

    #[must_use]
    pub const fn with_v1_rules(mut self, on: bool) -> Self {
        self.power_fx_v1_compatibility_rules = on;
        self
    }

    #[must_use]
    pub const fn with_consistent_one_column_table_result(mut self, on: bool) -> Self {
        self.consistent_one_column_table_result = on;
        self
    }

    #[must_use]
    pub const fn with_strict_type_arguments(mut self, on: bool) -> Self {
        self.strict_type_arguments = on;
        self
    }

    /// Legacy rules let Text coerce to DateTime.
    #[inline]
    pub const fn allows_text_to_date_time(self) -> bool {
        !self.power_fx_v1_compatibility_rules
    }

    /// Name of the single column in tables built from scalars.
    #[inline]
    pub const fn one_column_name(self) -> &'static str {
        if self.power_fx_v1_compatibility_rules || self.consistent_one_column_table_result {
            "Value"
        } else {
            "Result"
        }
    }
}
