//! Precomputed type metadata flags.
//!
//! `TypeFlags` are computed once when a [`DType`](crate::DType) is built and
//! carried with it, so "does this record contain an error anywhere?" is a
//! bit test rather than a walk over nested fields.

use bitflags::bitflags;

use crate::Kind;

bitflags! {
    /// Precomputed type properties.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TypeFlags: u32 {
        // === Presence flags (bits 0-7) ===
        // What a type contains, at any depth.

        /// Contains the Error kind.
        const HAS_ERROR = 1 << 0;
        /// Contains Unknown or Void.
        const HAS_UNKNOWN = 1 << 1;
        /// Contains a Blank-typed field.
        const HAS_BLANK = 1 << 2;
        /// Contains an UntypedObject.
        const HAS_UNTYPED = 1 << 3;
        /// Contains a field whose value is expanded from a relationship.
        const HAS_EXPAND = 1 << 4;

        // === Category flags (bits 8-15) ===

        const IS_PRIMITIVE = 1 << 8;
        const IS_AGGREGATE = 1 << 9;
        const IS_EXTERNAL = 1 << 10;
        /// Number or Decimal.
        const IS_NUMERIC = 1 << 11;
        /// Date, Time or DateTime.
        const IS_DATE_TIME = 1 << 12;
        /// Text or a text-backed kind.
        const IS_TEXTUAL = 1 << 13;

        // === Top-level markers (bits 16-23) ===
        // Never propagate to a parent.

        /// Error, Unknown or Void at the top level.
        const IS_ABSORBING = 1 << 16;
        /// The aggregate is bound to a connected data source.
        const HAS_DATA_SOURCE = 1 << 17;
    }
}

impl TypeFlags {
    /// Flags inherited from field types via bitwise OR.
    pub const PROPAGATE_MASK: Self = Self::from_bits_truncate(
        Self::HAS_ERROR.bits()
            | Self::HAS_UNKNOWN.bits()
            | Self::HAS_BLANK.bits()
            | Self::HAS_UNTYPED.bits()
            | Self::HAS_EXPAND.bits(),
    );

    /// Flags of a type of `kind` with no fields.
    pub const fn for_kind(kind: Kind) -> Self {
        let mut flags = Self::empty();
        if kind.is_primitive() {
            flags = flags.union(Self::IS_PRIMITIVE);
        }
        if kind.is_aggregate() {
            flags = flags.union(Self::IS_AGGREGATE);
        }
        if kind.is_external() {
            flags = flags.union(Self::IS_EXTERNAL);
        }
        if kind.is_numeric() {
            flags = flags.union(Self::IS_NUMERIC);
        }
        if kind.is_date_time() {
            flags = flags.union(Self::IS_DATE_TIME);
        }
        if kind.is_textual() {
            flags = flags.union(Self::IS_TEXTUAL);
        }
        if kind.is_absorbing() {
            flags = flags.union(Self::IS_ABSORBING);
        }
        match kind {
            Kind::Error => flags.union(Self::HAS_ERROR),
            Kind::Unknown | Kind::Void => flags.union(Self::HAS_UNKNOWN),
            Kind::ObjNull => flags.union(Self::HAS_BLANK),
            Kind::UntypedObject => flags.union(Self::HAS_UNTYPED),
            _ => flags,
        }
    }

    #[inline]
    pub const fn propagate_from(child: Self) -> Self {
        Self::from_bits_truncate(child.bits() & Self::PROPAGATE_MASK.bits())
    }

    #[inline]
    pub fn propagate_all(children: impl IntoIterator<Item = Self>) -> Self {
        let mut result = Self::empty();
        for child in children {
            result = result.union(Self::propagate_from(child));
        }
        result
    }

    #[inline]
    pub const fn has_errors(self) -> bool {
        self.contains(Self::HAS_ERROR)
    }

    /// No Error, Unknown or Void anywhere inside.
    #[inline]
    pub const fn is_resolved(self) -> bool {
        !self.intersects(Self::HAS_ERROR.union(Self::HAS_UNKNOWN))
    }

    #[inline]
    pub const fn is_absorbing(self) -> bool {
        self.contains(Self::IS_ABSORBING)
    }

    #[inline]
    pub const fn category(self) -> TypeCategory {
        if self.contains(Self::IS_PRIMITIVE) {
            TypeCategory::Primitive
        } else if self.contains(Self::IS_AGGREGATE) {
            TypeCategory::Aggregate
        } else if self.contains(Self::IS_EXTERNAL) {
            TypeCategory::External
        } else {
            TypeCategory::Special
        }
    }
}

/// Broad classification derived from the category bits.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeCategory {
    Primitive,
    /// Record or Table.
    Aggregate,
    /// Option set value, polymorphic or untyped.
    External,
    /// Unknown, Error, Void or Blank.
    Special,
}

impl Default for TypeFlags {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests;
