#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

fn frame(name: Option<Name>) -> CallFrame {
    CallFrame {
        name,
        call_span: Span::DUMMY,
    }
}

#[test]
fn test_push_pop_tracks_depth() {
    let mut stack = CallStack::new(4);
    stack.push(frame(None)).unwrap();
    stack.push(frame(None)).unwrap();
    assert_eq!(stack.depth(), 2);
    stack.pop();
    assert_eq!(stack.depth(), 1);
}

#[test]
fn test_limit_rejects_extra_frame() {
    let mut stack = CallStack::new(2);
    stack.push(frame(None)).unwrap();
    stack.push(frame(None)).unwrap();
    assert_eq!(
        stack.push(frame(None)),
        Err(RuntimeError::RecursionLimitExceeded { depth: 2 })
    );
    assert_eq!(stack.depth(), 2);
}

#[test]
fn test_backtrace_lists_innermost_first() {
    let interner = SharedInterner::new();
    let (outer, inner) = (interner.intern("outer"), interner.intern("inner"));
    let mut stack = CallStack::default();
    stack.push(frame(Some(outer))).unwrap();
    stack.push(frame(Some(inner))).unwrap();
    stack.push(frame(None)).unwrap();

    assert_eq!(
        stack.backtrace(&interner),
        vec!["<anonymous>", "inner", "outer"]
    );
    assert_eq!(stack.max_depth(), DEFAULT_MAX_CALL_DEPTH);
}
