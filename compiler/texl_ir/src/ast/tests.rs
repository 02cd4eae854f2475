use pretty_assertions::assert_eq;
use smallvec::smallvec;

use super::*;
use crate::StringInterner;

#[test]
fn alloc_hands_out_sequential_ids() {
    let mut arena = NodeArena::new();
    let a = arena.alloc(NodeKind::NumLit, Span::new(0, 1));
    let b = arena.alloc(NodeKind::NumLit, Span::new(2, 3));
    assert_eq!(a.index(), 0);
    assert_eq!(b.index(), 1);
    assert_eq!(arena.len(), 2);
}

#[test]
fn identical_literals_are_distinct_nodes() {
    let mut arena = NodeArena::new();
    let a = arena.alloc(NodeKind::NumLit, Span::new(4, 5));
    let b = arena.alloc(NodeKind::NumLit, Span::new(4, 5));
    assert_ne!(a, b);
    assert_eq!(arena.get(a), arena.get(b));
}

#[test]
fn call_args_of_call_node() {
    let interner = StringInterner::new();
    let mut arena = NodeArena::new();
    let x = arena.alloc(NodeKind::NumLit, Span::new(4, 5));
    let y = arena.alloc(NodeKind::NumLit, Span::new(7, 8));
    let call = arena.alloc(
        NodeKind::Call {
            namespace: None,
            func: interner.intern("Max"),
            args: smallvec![x, y],
        },
        Span::new(0, 9),
    );
    assert_eq!(arena.call_args(call), &[x, y]);
    assert!(arena.call_args(x).is_empty());
}

#[test]
fn constants() {
    let interner = StringInterner::new();
    assert!(NodeKind::StrLit(interner.intern("^a+$")).is_constant());
    assert!(NodeKind::Blank.is_constant());
    assert!(!NodeKind::FirstName(interner.intern("Pattern")).is_constant());
}

#[test]
fn try_get_outside_arena() {
    let arena = NodeArena::new();
    assert!(arena.try_get(NodeId::new(3)).is_none());
}

#[test]
#[should_panic(expected = "does not belong to this arena")]
fn get_outside_arena_is_a_defect() {
    let arena = NodeArena::new();
    let _ = arena.get(NodeId::new(0));
}

#[test]
fn comparison_ops() {
    assert!(BinaryOp::LtEq.is_comparison());
    assert!(!BinaryOp::Concat.is_comparison());
}
