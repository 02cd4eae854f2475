//! Type kind tag.
//!
//! Every [`DType`](crate::DType) has a `Kind` that identifies its family.
//! The kind decides how the rest of the type is interpreted.
//!
//! # Kind ranges
//!
//! - 0-15: Special kinds (absorbing markers and Blank)
//! - 16-47: Primitives (no payload)
//! - 48-63: Aggregates (payload = field map)
//! - 64-79: External references (payload = host-owned id)

use std::fmt;

/// Type kind discriminant.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(u8)]
pub enum Kind {
    // === Special (0-15) ===
    /// Not yet determined. Absorbing.
    Unknown = 0,
    /// Type of an erroneous expression. Absorbing.
    Error = 1,
    /// Blank, accepted anywhere a value is expected.
    ObjNull = 2,
    /// Result of a behavior call whose value must not be used. Absorbing.
    Void = 3,

    // === Primitives (16-47) ===
    /// IEEE-754 double.
    Number = 16,
    /// Exact decimal.
    Decimal = 17,
    Boolean = 18,
    /// Text.
    String = 19,
    Hyperlink = 20,
    Image = 21,
    Media = 22,
    Blob = 23,
    Color = 24,
    Guid = 25,
    Date = 26,
    Time = 27,
    DateTime = 28,

    // === Aggregates (48-63) ===
    Record = 48,
    Table = 49,

    // === External references (64-79) ===
    /// A value of a host option set.
    OptionSetValue = 64,
    /// A record from one of several data sources.
    Polymorphic = 65,
    /// Opaque value whose shape is only known at run time.
    UntypedObject = 66,
}

impl Kind {
    /// Absorbing kinds make every relation fail.
    #[inline]
    pub const fn is_absorbing(self) -> bool {
        matches!(self, Self::Unknown | Self::Error | Self::Void)
    }

    #[inline]
    pub const fn is_primitive(self) -> bool {
        let v = self as u8;
        v >= 16 && v < 48
    }

    #[inline]
    pub const fn is_aggregate(self) -> bool {
        matches!(self, Self::Record | Self::Table)
    }

    #[inline]
    pub const fn is_external(self) -> bool {
        (self as u8) >= 64
    }

    /// Number or Decimal.
    #[inline]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Number | Self::Decimal)
    }

    /// Date, Time or DateTime.
    #[inline]
    pub const fn is_date_time(self) -> bool {
        matches!(self, Self::Date | Self::Time | Self::DateTime)
    }

    /// Text and the kinds stored as text (links and media URIs).
    #[inline]
    pub const fn is_textual(self) -> bool {
        matches!(
            self,
            Self::String | Self::Hyperlink | Self::Image | Self::Media | Self::Blob
        )
    }

    /// User-facing name of this kind.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Error => "Error",
            Self::ObjNull => "Blank",
            Self::Void => "Void",
            Self::Number => "Number",
            Self::Decimal => "Decimal",
            Self::Boolean => "Boolean",
            Self::String => "Text",
            Self::Hyperlink => "Hyperlink",
            Self::Image => "Image",
            Self::Media => "Media",
            Self::Blob => "Blob",
            Self::Color => "Color",
            Self::Guid => "GUID",
            Self::Date => "Date",
            Self::Time => "Time",
            Self::DateTime => "DateTime",
            Self::Record => "Record",
            Self::Table => "Table",
            Self::OptionSetValue => "OptionSetValue",
            Self::Polymorphic => "Polymorphic",
            Self::UntypedObject => "UntypedObject",
        }
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Kind::{}", self.name())
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests;
