//! Flat expression tree handed over by the binder.
//!
//! The checker only ever needs three things from the tree: the identity of
//! each argument node (coercion and diagnostic key), its span, and its shape
//! (is it a literal, a column reference, a nested call...). The last one
//! drives the constant-argument checks and the delegation-eligibility walk.

use std::fmt;

use smallvec::SmallVec;

use crate::{Name, Span};

/// Index of a node in a [`NodeArena`].
///
/// Identity, not value: coercion maps and diagnostics key on `NodeId`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Argument lists rarely exceed four entries.
pub type NodeList = SmallVec<[NodeId; 4]>;

/// Binary operators, as far as the checker needs to distinguish them.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Power,
    Concat,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
    In,
    ExactIn,
}

impl BinaryOp {
    /// Comparison operators, the ones a data source can evaluate in a filter.
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq
        )
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Not,
    Neg,
    Percent,
}

/// Shape of one expression node.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum NodeKind {
    /// Floating point literal.
    NumLit,
    /// Decimal literal.
    DecLit,
    BoolLit(bool),
    /// Text literal; the text itself is interned.
    StrLit(Name),
    /// `Blank()` spelled as a literal.
    Blank,
    /// Unqualified identifier: a column in row scope, a global, a data source.
    FirstName(Name),
    /// `left.right`: record field access or relationship navigation.
    DottedName { left: NodeId, right: Name },
    Call {
        namespace: Option<Name>,
        func: Name,
        args: NodeList,
    },
    Record(Vec<(Name, NodeId)>),
    Table(NodeList),
    UnaryOp { op: UnaryOp, operand: NodeId },
    BinaryOp {
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    },
    /// A type written in type position (`AsType(x, Type(...))`). Its resolved
    /// `DType` is supplied by the binder as the argument type.
    TypeLiteral,
}

impl NodeKind {
    /// Literals whose value is known without evaluation.
    pub const fn is_constant(&self) -> bool {
        matches!(
            self,
            Self::NumLit | Self::DecLit | Self::BoolLit(_) | Self::StrLit(_) | Self::Blank
        )
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

/// Append-only storage for one expression's nodes.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its id.
    ///
    /// # Panics
    /// Panics past `u32::MAX` nodes; hosts bound expression size long before.
    pub fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let index = u32::try_from(self.nodes.len())
            .unwrap_or_else(|_| panic!("node arena exceeded u32::MAX nodes"));
        self.nodes.push(Node { kind, span });
        NodeId::new(index)
    }

    /// # Panics
    /// Panics if `id` was not allocated by this arena. That is a defect in
    /// the caller, not a user error.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        assert!(
            id.index() < self.nodes.len(),
            "{id:?} does not belong to this arena ({} nodes)",
            self.nodes.len()
        );
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn try_get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.get(id).kind
    }

    #[inline]
    pub fn span(&self, id: NodeId) -> Span {
        self.get(id).span
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Arguments of a call node, empty for anything else.
    pub fn call_args(&self, id: NodeId) -> &[NodeId] {
        match self.kind(id) {
            NodeKind::Call { args, .. } => args,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests;
