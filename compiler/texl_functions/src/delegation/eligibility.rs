//! Recursive walk over a row-scoped argument.

use texl_ir::{BinaryOp, NodeId, NodeKind, UnaryOp};
use texl_stack::ensure_sufficient_stack;
use texl_types::DataSourceId;

use super::DelegationQuery;
use crate::DelegationCapability;

/// `Err(node)` names the first node the source cannot evaluate.
pub(super) fn check_row_expr(
    query: &DelegationQuery<'_>,
    source: DataSourceId,
    node: NodeId,
) -> Result<(), NodeId> {
    ensure_sufficient_stack(|| check_node(query, source, node))
}

fn check_node(query: &DelegationQuery<'_>, source: DataSourceId, node: NodeId) -> Result<(), NodeId> {
    let arena = query.cx.arena;
    let require = |capability: DelegationCapability| {
        if query.cx.catalog.supports_delegation(source, capability) {
            Ok(())
        } else {
            Err(node)
        }
    };

    match arena.kind(node) {
        NodeKind::NumLit
        | NodeKind::DecLit
        | NodeKind::BoolLit(_)
        | NodeKind::StrLit(_)
        | NodeKind::Blank
        | NodeKind::FirstName(_) => Ok(()),

        // Relationship navigation and constructed values stay local.
        NodeKind::DottedName { .. } | NodeKind::Record(_) | NodeKind::Table(_) | NodeKind::TypeLiteral => {
            Err(node)
        }

        NodeKind::UnaryOp { op, operand } => {
            require(match op {
                UnaryOp::Not => DelegationCapability::NOT,
                UnaryOp::Neg | UnaryOp::Percent => DelegationCapability::ARITHMETIC,
            })?;
            check_row_expr(query, source, *operand)
        }

        NodeKind::BinaryOp { op, left, right } => {
            // Sources disagree on blank comparison semantics.
            if op.is_comparison()
                && (matches!(arena.kind(*left), NodeKind::Blank)
                    || matches!(arena.kind(*right), NodeKind::Blank))
            {
                return Err(node);
            }
            require(operator_capability(*op).ok_or(node)?)?;
            check_row_expr(query, source, *left)?;
            check_row_expr(query, source, *right)
        }

        NodeKind::Call {
            namespace,
            func,
            args,
        } => {
            let interner = query.cx.interner;
            let namespace = namespace.map(|ns| interner.lookup(ns));
            let capability = query
                .registry
                .delegation_capability(namespace, interner.lookup(*func))
                .ok_or(node)?;
            require(capability)?;
            args.iter()
                .try_for_each(|&arg| check_row_expr(query, source, arg))
        }
    }
}

fn operator_capability(op: BinaryOp) -> Option<DelegationCapability> {
    Some(match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
            DelegationCapability::ARITHMETIC
        }
        BinaryOp::Eq => DelegationCapability::EQ,
        BinaryOp::NotEq => DelegationCapability::NOT_EQ,
        BinaryOp::Lt => DelegationCapability::LT,
        BinaryOp::LtEq => DelegationCapability::LT_EQ,
        BinaryOp::Gt => DelegationCapability::GT,
        BinaryOp::GtEq => DelegationCapability::GT_EQ,
        BinaryOp::And => DelegationCapability::AND,
        BinaryOp::Or => DelegationCapability::OR,
        BinaryOp::In | BinaryOp::ExactIn => DelegationCapability::IN,
        BinaryOp::Power | BinaryOp::Concat => return None,
    })
}
