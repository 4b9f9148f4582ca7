use super::*;
use crate::StringInterner;
use pretty_assertions::assert_eq;

#[test]
fn test_alloc_returns_sequential_ids() {
    let interner = StringInterner::new();
    let mut arena = NodeArena::new();
    let a = arena.identifier(interner.intern("a"));
    let b = arena.identifier(interner.intern("b"));
    assert_eq!(a.index(), 0);
    assert_eq!(b.index(), 1);
    assert_eq!(arena.len(), 2);
}

#[test]
fn test_call_helper_keeps_children() {
    let interner = StringInterner::new();
    let mut arena = NodeArena::new();
    let callee = arena.identifier(interner.intern("print"));
    let arg = arena.literal(LiteralKind::Decimal, interner.intern("1"));
    let call = arena.call(callee, vec![arg]);

    assert_eq!(
        arena.kind(call),
        &NodeKind::FunctionCall {
            callable: callee,
            arguments: vec![arg],
        }
    );
    assert_eq!(arena.span(call), Span::DUMMY);
}

#[test]
fn test_shared_arena_clones_point_to_same_nodes() {
    let interner = StringInterner::new();
    let mut arena = NodeArena::new();
    let id = arena.identifier(interner.intern("x"));
    let shared = arena.into_shared();
    let clone = shared.clone();

    assert!(shared.ptr_eq(&clone));
    assert_eq!(clone.kind(id), &NodeKind::Identifier(interner.intern("x")));
}

#[test]
fn test_describe_names_node_kinds() {
    assert_eq!(NodeKind::Block(Vec::new()).describe(), "block");
    assert_eq!(
        NodeKind::Unhandled("goto".to_owned()).describe(),
        "unhandled node"
    );
}
