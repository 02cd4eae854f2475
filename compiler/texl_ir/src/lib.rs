//! Texl IR - the inputs of the type checker.
//!
//! The parser and binder live outside this workspace. What they hand to the
//! checker is defined here:
//! - [`Name`]: interned identifiers (field names, function names)
//! - [`Span`]: byte ranges used when rendering diagnostics
//! - [`NodeId`] / [`NodeArena`] / [`NodeKind`]: the expression tree as a flat
//!   arena of tagged nodes
//!
//! Nodes are identified by `NodeId`, never by value. Two identical literals
//! at different positions are two different nodes and two different
//! coercion targets.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod interner;
mod name;
mod span;

pub use ast::{BinaryOp, Node, NodeArena, NodeId, NodeKind, NodeList, UnaryOp};
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use span::Span;

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Name, NodeId, Span};
    static_assert_size!(Name, 4);
    static_assert_size!(NodeId, 4);
    static_assert_size!(Span, 8);
}
