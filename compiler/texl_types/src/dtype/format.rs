//! User-facing rendering of types.

use std::fmt;

use texl_ir::StringInterner;

use super::{DType, Payload};

impl DType {
    /// Render with field names resolved, e.g. `Table{Value:Number}`.
    ///
    /// Fields are listed alphabetically so the output does not depend on
    /// interning order.
    pub fn display<'a>(&'a self, interner: &'a StringInterner) -> TypeDisplay<'a> {
        TypeDisplay { ty: self, interner }
    }
}

/// [`fmt::Display`] adapter returned by [`DType::display`].
pub struct TypeDisplay<'a> {
    ty: &'a DType,
    interner: &'a StringInterner,
}

impl fmt::Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        texl_stack::ensure_sufficient_stack(|| write_type(f, self.ty, self.interner))
    }
}

fn write_type(f: &mut fmt::Formatter<'_>, ty: &DType, interner: &StringInterner) -> fmt::Result {
    f.write_str(ty.kind.name())?;
    let Payload::Shape(shape) = &ty.payload else {
        return Ok(());
    };

    let mut fields: Vec<_> = shape
        .fields
        .iter()
        .map(|(name, field)| (interner.lookup(*name), field))
        .collect();
    fields.sort_unstable_by_key(|(name, _)| *name);

    f.write_str("{")?;
    for (i, (name, field)) in fields.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{name}:")?;
        texl_stack::ensure_sufficient_stack(|| write_type(f, field, interner))?;
    }
    f.write_str("}")
}
