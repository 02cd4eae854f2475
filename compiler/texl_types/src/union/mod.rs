//! Structural union: the common type of two operands.

use texl_ir::Name;
use texl_stack::ensure_sufficient_stack;

use crate::{DType, Kind};

/// Why two types have no common type.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum UnionError {
    #[error("{left} and {right} have no common type")]
    KindMismatch { left: Kind, right: Kind },
    #[error("field {field:?} is {left} on one side and {right} on the other")]
    FieldConflict { field: Name, left: Kind, right: Kind },
    #[error("values of different option sets cannot be combined")]
    OptionSetMismatch,
    #[error("an operand contains an error type")]
    ErrorOperand,
    #[error("an operand is not yet determined")]
    Undetermined,
}

impl DType {
    /// The narrowest type both `self` and `other` fit into.
    ///
    /// - Blank unions to the other operand.
    /// - Date and DateTime widen to DateTime; Number and Decimal to Number.
    /// - Records with records and tables with tables merge their fields;
    ///   a field present on only one side is kept, a field on both sides is
    ///   unioned recursively.
    /// - A type that accepts the other absorbs it (Text with Hyperlink).
    ///
    /// Text and Number do not unify: that needs an explicit conversion.
    pub fn union(&self, other: &DType) -> Result<DType, UnionError> {
        if self.flags().has_errors() || other.flags().has_errors() {
            return Err(UnionError::ErrorOperand);
        }
        if !self.is_valid() || !other.is_valid() {
            return Err(UnionError::Undetermined);
        }
        if self == other || other.is_blank() {
            return Ok(self.clone());
        }
        if self.is_blank() {
            return Ok(other.clone());
        }

        match (self.kind(), other.kind()) {
            (Kind::Date, Kind::DateTime) | (Kind::DateTime, Kind::Date) => Ok(DType::DATE_TIME),
            (Kind::Number, Kind::Decimal) | (Kind::Decimal, Kind::Number) => Ok(DType::NUMBER),
            (Kind::Record, Kind::Record) | (Kind::Table, Kind::Table) => {
                ensure_sufficient_stack(|| self.union_fields(other))
            }
            (Kind::OptionSetValue, Kind::OptionSetValue) => Err(UnionError::OptionSetMismatch),
            _ if self.accepts(other) => Ok(self.clone()),
            _ if other.accepts(self) => Ok(other.clone()),
            (left, right) => Err(UnionError::KindMismatch { left, right }),
        }
    }

    fn union_fields(&self, other: &DType) -> Result<DType, UnionError> {
        let mut merged = if self.source() == other.source() {
            self.clone()
        } else {
            self.without_source()
        };
        for (name, field) in other.fields() {
            let field_type = match self.field(name) {
                Some(existing) => existing.union(field).map_err(|err| match err {
                    UnionError::KindMismatch { left, right } => {
                        UnionError::FieldConflict { field: name, left, right }
                    }
                    nested => nested,
                })?,
                None => field.clone(),
            };
            if merged.field(name) != Some(&field_type) {
                merged = merged.add_field(name, field_type);
            }
        }
        if other.has_expand_info() && !merged.has_expand_info() {
            merged = merged.with_expand_info();
        }
        Ok(merged)
    }
}
