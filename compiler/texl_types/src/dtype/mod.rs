//! The structural type value.

mod format;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use texl_ir::Name;

use crate::{DataSourceId, Kind, OptionSetId, TypeFlags};

pub use format::TypeDisplay;

/// An immutable Texl type.
///
/// Scalars are plain constants (`DType::NUMBER`). Records and tables share
/// their field map behind an `Arc`, so cloning a type is cheap and every
/// "modification" returns a new value.
///
/// A table is always a record shape seen as a sequence of rows: `to_table`
/// and `to_record` only flip the kind.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct DType {
    kind: Kind,
    flags: TypeFlags,
    payload: Payload,
}

#[derive(Clone, Eq, PartialEq, Hash)]
enum Payload {
    None,
    Shape(Arc<Shape>),
    OptionSet(OptionSetId),
    Sources(Arc<[DataSourceId]>),
}

#[derive(Clone, Default, Eq, PartialEq, Hash)]
struct Shape {
    fields: BTreeMap<Name, DType>,
    source: Option<DataSourceId>,
    /// Rows reach related rows through a one-to-many relationship.
    expand: bool,
}

impl DType {
    pub const UNKNOWN: DType = DType::simple(Kind::Unknown);
    pub const ERROR: DType = DType::simple(Kind::Error);
    pub const OBJ_NULL: DType = DType::simple(Kind::ObjNull);
    pub const VOID: DType = DType::simple(Kind::Void);

    pub const NUMBER: DType = DType::simple(Kind::Number);
    pub const DECIMAL: DType = DType::simple(Kind::Decimal);
    pub const BOOLEAN: DType = DType::simple(Kind::Boolean);
    pub const STRING: DType = DType::simple(Kind::String);
    pub const HYPERLINK: DType = DType::simple(Kind::Hyperlink);
    pub const IMAGE: DType = DType::simple(Kind::Image);
    pub const MEDIA: DType = DType::simple(Kind::Media);
    pub const BLOB: DType = DType::simple(Kind::Blob);
    pub const COLOR: DType = DType::simple(Kind::Color);
    pub const GUID: DType = DType::simple(Kind::Guid);
    pub const DATE: DType = DType::simple(Kind::Date);
    pub const TIME: DType = DType::simple(Kind::Time);
    pub const DATE_TIME: DType = DType::simple(Kind::DateTime);

    pub const UNTYPED_OBJECT: DType = DType::simple(Kind::UntypedObject);

    const fn simple(kind: Kind) -> Self {
        DType {
            kind,
            flags: TypeFlags::for_kind(kind),
            payload: Payload::None,
        }
    }

    /// A payload-free type of `kind`.
    ///
    /// # Panics
    ///
    /// If `kind` needs a payload (aggregates, option sets, polymorphic).
    pub fn scalar(kind: Kind) -> Self {
        assert!(
            !kind.is_aggregate() && !matches!(kind, Kind::OptionSetValue | Kind::Polymorphic),
            "{kind:?} is not a scalar kind"
        );
        Self::simple(kind)
    }

    pub fn record(fields: impl IntoIterator<Item = (Name, DType)>) -> Self {
        Self::aggregate(Kind::Record, Shape {
            fields: fields.into_iter().collect(),
            ..Shape::default()
        })
    }

    pub fn table(fields: impl IntoIterator<Item = (Name, DType)>) -> Self {
        Self::aggregate(Kind::Table, Shape {
            fields: fields.into_iter().collect(),
            ..Shape::default()
        })
    }

    pub fn empty_record() -> Self {
        Self::record([])
    }

    pub fn empty_table() -> Self {
        Self::table([])
    }

    /// A one-column table.
    pub fn single_column_table(column: Name, column_type: DType) -> Self {
        Self::table([(column, column_type)])
    }

    pub fn option_set(id: OptionSetId) -> Self {
        DType {
            kind: Kind::OptionSetValue,
            flags: TypeFlags::for_kind(Kind::OptionSetValue),
            payload: Payload::OptionSet(id),
        }
    }

    /// A record drawn from one of `sources`. Sources are kept sorted and
    /// deduplicated so equal sets compare equal.
    pub fn polymorphic(sources: impl IntoIterator<Item = DataSourceId>) -> Self {
        let mut sources: Vec<_> = sources.into_iter().collect();
        sources.sort_unstable();
        sources.dedup();
        DType {
            kind: Kind::Polymorphic,
            flags: TypeFlags::for_kind(Kind::Polymorphic),
            payload: Payload::Sources(sources.into()),
        }
    }

    fn aggregate(kind: Kind, shape: Shape) -> Self {
        debug_assert!(kind.is_aggregate());
        let mut flags =
            TypeFlags::for_kind(kind) | TypeFlags::propagate_all(shape.fields.values().map(|t| t.flags));
        if shape.expand {
            flags |= TypeFlags::HAS_EXPAND;
        }
        if shape.source.is_some() {
            flags |= TypeFlags::HAS_DATA_SOURCE;
        }
        DType {
            kind,
            flags,
            payload: Payload::Shape(Arc::new(shape)),
        }
    }

    fn shape(&self) -> Option<&Shape> {
        match &self.payload {
            Payload::Shape(shape) => Some(&**shape),
            _ => None,
        }
    }

    /// Rebuild an aggregate with an edited copy of its shape. Non-aggregates
    /// become `Error`.
    fn edit_shape(&self, kind: Kind, edit: impl FnOnce(&mut Shape)) -> Self {
        match self.shape() {
            Some(shape) => {
                let mut shape = shape.clone();
                edit(&mut shape);
                Self::aggregate(kind, shape)
            }
            None => Self::ERROR,
        }
    }

    // === Kind queries ===

    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[inline]
    pub fn flags(&self) -> TypeFlags {
        self.flags
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.kind == Kind::Error
    }

    /// Unknown or Void.
    #[inline]
    pub fn is_unknown(&self) -> bool {
        matches!(self.kind, Kind::Unknown | Kind::Void)
    }

    #[inline]
    pub fn is_blank(&self) -> bool {
        self.kind == Kind::ObjNull
    }

    #[inline]
    pub fn is_absorbing(&self) -> bool {
        self.flags.is_absorbing()
    }

    /// No Error, Unknown or Void anywhere in the type.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.flags.is_resolved()
    }

    #[inline]
    pub fn is_record(&self) -> bool {
        self.kind == Kind::Record
    }

    #[inline]
    pub fn is_table(&self) -> bool {
        self.kind == Kind::Table
    }

    #[inline]
    pub fn is_aggregate(&self) -> bool {
        self.kind.is_aggregate()
    }

    #[inline]
    pub fn is_numeric(&self) -> bool {
        self.kind.is_numeric()
    }

    #[inline]
    pub fn is_date_time(&self) -> bool {
        self.kind.is_date_time()
    }

    #[inline]
    pub fn is_textual(&self) -> bool {
        self.kind.is_textual()
    }

    // === Fields ===

    pub fn field(&self, name: Name) -> Option<&DType> {
        self.shape().and_then(|shape| shape.fields.get(&name))
    }

    pub fn has_field(&self, name: Name) -> bool {
        self.field(name).is_some()
    }

    /// Fields in name-id order. Empty for non-aggregates.
    pub fn fields(&self) -> impl Iterator<Item = (Name, &DType)> + '_ {
        self.shape()
            .into_iter()
            .flat_map(|shape| shape.fields.iter().map(|(name, ty)| (*name, ty)))
    }

    pub fn field_count(&self) -> usize {
        self.shape().map_or(0, |shape| shape.fields.len())
    }

    pub fn is_one_column_table(&self) -> bool {
        self.is_table() && self.field_count() == 1
    }

    /// The only column of a one-column table.
    pub fn single_column(&self) -> Option<(Name, &DType)> {
        if self.is_one_column_table() {
            self.fields().next()
        } else {
            None
        }
    }

    /// Insert or replace a field. Non-aggregates become `Error`.
    #[must_use]
    pub fn add_field(&self, name: Name, ty: DType) -> Self {
        self.edit_shape(self.kind, |shape| {
            shape.fields.insert(name, ty);
        })
    }

    /// Remove a field if present. Non-aggregates become `Error`.
    #[must_use]
    pub fn drop_field(&self, name: Name) -> Self {
        self.edit_shape(self.kind, |shape| {
            shape.fields.remove(&name);
        })
    }

    // === Aggregate conversions ===

    /// The row type of a table, or a record unchanged. Anything else is
    /// `Error`.
    #[must_use]
    pub fn to_record(&self) -> Self {
        match self.kind {
            Kind::Record => self.clone(),
            Kind::Table => self.edit_shape(Kind::Record, |_| {}),
            _ => Self::ERROR,
        }
    }

    /// A table of this record's rows, or a table unchanged. Anything else is
    /// `Error`.
    #[must_use]
    pub fn to_table(&self) -> Self {
        match self.kind {
            Kind::Table => self.clone(),
            Kind::Record => self.edit_shape(Kind::Table, |_| {}),
            _ => Self::ERROR,
        }
    }

    // === Data source metadata ===

    #[must_use]
    pub fn with_source(&self, source: DataSourceId) -> Self {
        self.edit_shape(self.kind, |shape| shape.source = Some(source))
    }

    #[must_use]
    pub fn without_source(&self) -> Self {
        self.edit_shape(self.kind, |shape| shape.source = None)
    }

    pub fn source(&self) -> Option<DataSourceId> {
        self.shape().and_then(|shape| shape.source)
    }

    /// Mark the aggregate as reaching related rows through a one-to-many
    /// relationship.
    #[must_use]
    pub fn with_expand_info(&self) -> Self {
        self.edit_shape(self.kind, |shape| shape.expand = true)
    }

    pub fn has_expand_info(&self) -> bool {
        self.shape().is_some_and(|shape| shape.expand)
    }

    pub fn option_set_id(&self) -> Option<OptionSetId> {
        match self.payload {
            Payload::OptionSet(id) => Some(id),
            _ => None,
        }
    }

    pub fn polymorphic_sources(&self) -> &[DataSourceId] {
        match &self.payload {
            Payload::Sources(sources) => &**sources,
            _ => &[],
        }
    }
}

impl Default for DType {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl fmt::Debug for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.name())?;
        match &self.payload {
            Payload::None => Ok(()),
            Payload::OptionSet(id) => write!(f, "({id:?})"),
            Payload::Sources(sources) => f.debug_list().entries(sources.iter()).finish(),
            Payload::Shape(shape) => {
                f.write_str("{")?;
                for (i, (name, ty)) in shape.fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name:?}:{ty:?}")?;
                }
                f.write_str("}")?;
                if let Some(source) = shape.source {
                    write!(f, "@{source:?}")?;
                }
                if shape.expand {
                    f.write_str("+expand")?;
                }
                Ok(())
            }
        }
    }
}
