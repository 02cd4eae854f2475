//! Implicit conversions.
//!
//! Every function check goes through [`try_coerce`]; no overload carries
//! its own conversion rules. The decisions for one call site are collected
//! in a [`CoercionMap`] keyed by argument node.

use rustc_hash::FxHashMap;
use texl_ir::NodeId;
use texl_stack::ensure_sufficient_stack;

use crate::{DType, Features, Kind};

/// Result of a successful coercion check.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Coercion {
    /// Accepted without conversion.
    Exact,
    /// Accepted after converting to the carried type.
    To(DType),
}

impl Coercion {
    #[inline]
    pub fn is_exact(&self) -> bool {
        matches!(self, Self::Exact)
    }

    /// The conversion target, if a conversion is needed.
    #[inline]
    pub fn target(&self) -> Option<&DType> {
        match self {
            Self::Exact => None,
            Self::To(ty) => Some(ty),
        }
    }
}

/// Decide whether `actual` can be used where `target` is expected.
///
/// Allowed conversions:
/// - Boolean to Number or Decimal
/// - Number to Decimal and Decimal to Number
/// - Date to DateTime
/// - Text to DateTime, only without the V1 compatibility rules
/// - Records and tables field by field; the converted type keeps every
///   field, source and kind of `actual` and only replaces converted field
///   types.
///
/// Text to Number is never implicit.
pub fn try_coerce(actual: &DType, target: &DType, features: &Features) -> Option<Coercion> {
    if target.accepts(actual) {
        return Some(Coercion::Exact);
    }
    if actual.is_absorbing() || target.is_absorbing() {
        return None;
    }

    let converted = match (actual.kind(), target.kind()) {
        (Kind::Boolean | Kind::Number | Kind::Decimal, Kind::Number | Kind::Decimal)
        | (Kind::Date, Kind::DateTime) => true,
        (Kind::String, Kind::DateTime) => features.allows_text_to_date_time(),
        (Kind::Record, Kind::Record) | (Kind::Table, Kind::Table) => {
            return ensure_sufficient_stack(|| coerce_fields(actual, target, features));
        }
        _ => false,
    };
    converted.then(|| Coercion::To(target.clone()))
}

fn coerce_fields(actual: &DType, target: &DType, features: &Features) -> Option<Coercion> {
    let mut converted: Option<DType> = None;
    for (name, expected) in target.fields() {
        let field = actual.field(name)?;
        if let Coercion::To(field_type) = try_coerce(field, expected, features)? {
            let base = converted.as_ref().unwrap_or(actual);
            converted = Some(base.add_field(name, field_type));
        }
    }
    Some(converted.map_or(Coercion::Exact, Coercion::To))
}

/// Coercion for parameters declared as Text.
///
/// Unlike the general rule, scalar values become text implicitly when the
/// function explicitly takes text (`Len(42)`).
pub fn try_coerce_to_text(actual: &DType, features: &Features) -> Option<Coercion> {
    if DType::STRING.accepts(actual) {
        return Some(Coercion::Exact);
    }
    match actual.kind() {
        Kind::Number
        | Kind::Decimal
        | Kind::Boolean
        | Kind::Date
        | Kind::Time
        | Kind::DateTime
        | Kind::Guid
        | Kind::OptionSetValue
        | Kind::UntypedObject => Some(Coercion::To(DType::STRING)),
        _ => try_coerce(actual, &DType::STRING, features),
    }
}

impl DType {
    /// True if `self` is accepted by `target`, or converts implicitly.
    pub fn coerces_to(&self, target: &DType, features: &Features) -> bool {
        try_coerce(self, target, features).is_some()
    }
}

/// Coercions decided for one call site, keyed by argument node identity.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CoercionMap {
    entries: FxHashMap<NodeId, DType>,
}

impl CoercionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `node` converts to `ty`. A later decision for the same
    /// node replaces the earlier one.
    pub fn insert(&mut self, node: NodeId, ty: DType) -> Option<DType> {
        self.entries.insert(node, ty)
    }

    /// Record `coercion` for `node` if it needs a conversion.
    pub fn record(&mut self, node: NodeId, coercion: Coercion) {
        if let Coercion::To(ty) = coercion {
            self.entries.insert(node, ty);
        }
    }

    pub fn remove(&mut self, node: NodeId) -> Option<DType> {
        self.entries.remove(&node)
    }

    pub fn get(&self, node: NodeId) -> Option<&DType> {
        self.entries.get(&node)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.entries.contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &DType)> + '_ {
        self.entries.iter().map(|(node, ty)| (*node, ty))
    }

    /// Entries sorted by node, for deterministic output.
    pub fn sorted(&self) -> Vec<(NodeId, &DType)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by_key(|(node, _)| *node);
        entries
    }

    pub fn merge(&mut self, other: CoercionMap) {
        self.entries.extend(other.entries);
    }
}

impl FromIterator<(NodeId, DType)> for CoercionMap {
    fn from_iter<I: IntoIterator<Item = (NodeId, DType)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
