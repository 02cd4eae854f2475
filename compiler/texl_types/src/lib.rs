//! Structural type system for Texl.
//!
//! [`DType`] is an immutable value: a [`Kind`] tag, precomputed
//! [`TypeFlags`], and for aggregates a shared field map. Every
//! transformation (`to_table`, `union`, coercion, adding a field) builds a
//! new value; nothing is mutated in place, so a `DType` can be cloned into
//! any number of call-site results and shared across threads.
//!
//! # Relations
//!
//! - [`DType::accepts`]: usable as-is where `self` is expected.
//! - [`try_coerce`]: usable after an implicit conversion the checker records
//!   in a [`CoercionMap`].
//! - [`DType::union`]: the common type of two operands, used for
//!   heterogeneous records in `Table(...)` and friends.
//! - [`numeric_return_type`]: the one Decimal-vs-Number policy every numeric
//!   function goes through.
//!
//! `Error`, `Unknown` and `Void` are absorbing: no relation involving them
//! succeeds.

mod coercion;
mod data_source;
mod dtype;
mod features;
mod flags;
mod kind;
mod numeric;
mod relate;
mod union;

pub use coercion::{try_coerce, try_coerce_to_text, Coercion, CoercionMap};
pub use data_source::{DataSourceId, OptionSetId};
pub use dtype::{DType, TypeDisplay};
pub use features::Features;
pub use flags::{TypeCategory, TypeFlags};
pub use kind::Kind;
pub use numeric::{default_numeric_type, numeric_return_type};
pub use union::UnionError;

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Kind, TypeFlags};
    texl_ir::static_assert_size!(Kind, 1);
    texl_ir::static_assert_size!(TypeFlags, 4);
}
