//! `if`, `while`, `when` and control signals.

use pretty_assertions::assert_eq;
use zeal_diagnostic::ErrorCode;

use super::{error_codes, lookup_int, run, Doc};

/// `name = add(name, 1)`
fn increment(doc: &mut Doc, name: &str) -> zeal_ir::NodeId {
    let current = doc.ident(name);
    let one = doc.int(1);
    let sum = doc.call("add", vec![current, one]);
    doc.set(name, sum)
}

/// `lt(name, limit)`
fn below(doc: &mut Doc, name: &str, limit: i64) -> zeal_ir::NodeId {
    let current = doc.ident(name);
    let limit = doc.int(limit);
    doc.call("lt", vec![current, limit])
}

// === If ===

#[test]
fn test_if_picks_branch_by_truthiness() {
    let mut doc = Doc::new();
    let zero = doc.int(0);
    let yes = doc.string("yes");
    let no = doc.string("no");
    let print_yes = doc.print(vec![yes]);
    let print_no = doc.print(vec![no]);
    let stmt = doc.if_(None, zero, print_yes, Some(print_no));
    let (interp, _) = run(doc, vec![stmt]);
    assert_eq!(interp.output(), "no\n");
}

#[test]
fn test_if_name_is_visible_in_both_branches_only() {
    let mut doc = Doc::new();
    let condition = doc.int(7);
    let seen = doc.ident("c");
    let print = doc.print(vec![seen]);
    let stmt = doc.if_(Some("c"), condition, print, None);
    let after = doc.ident("c");
    let (interp, _) = run(doc, vec![stmt, after]);

    assert_eq!(interp.output(), "7\n");
    assert_eq!(error_codes(&interp), vec![ErrorCode::E1001]);
}

// === While ===

#[test]
fn test_while_runs_until_condition_is_false() {
    let mut doc = Doc::new();
    let zero = doc.int(0);
    let decl = doc.var("i", None, Some(zero));
    let condition = below(&mut doc, "i", 5);
    let step = increment(&mut doc, "i");
    let body = doc.block(vec![step]);
    let done = doc.string("done");
    let print_done = doc.print(vec![done]);
    let stmt = doc.while_(None, condition, body, Some(print_done));
    let (interp, _) = run(doc, vec![decl, stmt]);

    assert_eq!(lookup_int(&interp, "i"), 5);
    assert_eq!(interp.output(), "done\n");
}

#[test]
fn test_break_skips_else() {
    let mut doc = Doc::new();
    let t = doc.keyword("true");
    let brk = doc.break_(None);
    let body = doc.block(vec![brk]);
    let text = doc.string("else");
    let print_else = doc.print(vec![text]);
    let stmt = doc.while_(None, t, body, Some(print_else));
    let (interp, _) = run(doc, vec![stmt]);

    assert_eq!(interp.output(), "");
    assert!(interp.diagnostics().is_empty());
}

#[test]
fn test_unlabelled_break_ends_innermost_loop_only() {
    let mut doc = Doc::new();
    let zero = doc.int(0);
    let decl = doc.var("count", None, Some(zero));
    let outer_condition = below(&mut doc, "count", 3);
    let step = increment(&mut doc, "count");
    let t = doc.keyword("true");
    let brk = doc.break_(None);
    let inner_body = doc.block(vec![brk]);
    let inner = doc.while_(None, t, inner_body, None);
    let outer_body = doc.block(vec![step, inner]);
    let outer = doc.while_(Some("outer"), outer_condition, outer_body, None);
    let (interp, _) = run(doc, vec![decl, outer]);

    assert_eq!(lookup_int(&interp, "count"), 3);
}

#[test]
fn test_labelled_break_crosses_inner_loop() {
    let mut doc = Doc::new();
    let zero = doc.int(0);
    let decl = doc.var("count", None, Some(zero));
    let outer_condition = below(&mut doc, "count", 3);
    let step = increment(&mut doc, "count");
    let t = doc.keyword("true");
    let brk = doc.break_(Some("outer"));
    let inner_body = doc.block(vec![brk]);
    let inner = doc.while_(None, t, inner_body, None);
    let text = doc.string("unreachable");
    let print = doc.print(vec![text]);
    let outer_body = doc.block(vec![step, inner, print]);
    let outer = doc.while_(Some("outer"), outer_condition, outer_body, None);
    let (interp, _) = run(doc, vec![decl, outer]);

    assert_eq!(lookup_int(&interp, "count"), 1);
    assert_eq!(interp.output(), "");
}

#[test]
fn test_continue_skips_rest_of_body() {
    let mut doc = Doc::new();
    let zero = doc.int(0);
    let decl = doc.var("i", None, Some(zero));
    let condition = below(&mut doc, "i", 3);
    let step = increment(&mut doc, "i");
    let cont = doc.continue_(None);
    let i = doc.ident("i");
    let print = doc.print(vec![i]);
    let body = doc.block(vec![step, cont, print]);
    let stmt = doc.while_(None, condition, body, None);
    let (interp, _) = run(doc, vec![decl, stmt]);

    assert_eq!(lookup_int(&interp, "i"), 3);
    assert_eq!(interp.output(), "");
}

#[test]
fn test_break_target_must_be_a_loop() {
    let mut doc = Doc::new();
    let one = doc.int(1);
    let x = doc.var("x", None, Some(one));
    let zero = doc.int(0);
    let i = doc.var("i", None, Some(zero));
    let condition = below(&mut doc, "i", 2);
    let brk = doc.break_(Some("x"));
    let step = increment(&mut doc, "i");
    let body = doc.block(vec![brk, step]);
    let stmt = doc.while_(None, condition, body, None);
    let (interp, _) = run(doc, vec![x, i, stmt]);

    assert_eq!(error_codes(&interp), vec![ErrorCode::E4004, ErrorCode::E4004]);
    assert_eq!(lookup_int(&interp, "i"), 2);
}

#[test]
fn test_break_outside_loop_is_reported() {
    let mut doc = Doc::new();
    let brk = doc.break_(None);
    let text = doc.string("after");
    let print = doc.print(vec![text]);
    let (interp, _) = run(doc, vec![brk, print]);

    assert_eq!(error_codes(&interp), vec![ErrorCode::E4005]);
    assert_eq!(interp.output(), "after\n");
}

// === When ===

/// `when (subject) { case 1 -> break; case 2 -> continue; case 3 -> print("A") } else print("B")`
fn fallthrough_program(subject: i64) -> (Doc, Vec<zeal_ir::NodeId>) {
    let mut doc = Doc::new();
    let subject = doc.int(subject);
    let one = doc.int(1);
    let two = doc.int(2);
    let three = doc.int(3);
    let brk = doc.break_(None);
    let case_one = doc.block(vec![brk]);
    let cont = doc.continue_(None);
    let case_two = doc.block(vec![cont]);
    let a = doc.string("A");
    let print_a = doc.print(vec![a]);
    let case_three = doc.block(vec![print_a]);
    let b = doc.string("B");
    let print_b = doc.print(vec![b]);
    let stmt = doc.when(
        None,
        subject,
        vec![(one, case_one), (two, case_two), (three, case_three)],
        Some(print_b),
    );
    (doc, vec![stmt])
}

#[test]
fn test_when_continue_falls_into_next_case() {
    let (doc, statements) = fallthrough_program(2);
    let (interp, _) = run(doc, statements);
    assert_eq!(interp.output(), "A\n");
}

#[test]
fn test_when_break_ends_without_else() {
    let (doc, statements) = fallthrough_program(1);
    let (interp, _) = run(doc, statements);
    assert_eq!(interp.output(), "");
}

#[test]
fn test_when_without_match_runs_else() {
    let (doc, statements) = fallthrough_program(9);
    let (interp, _) = run(doc, statements);
    assert_eq!(interp.output(), "B\n");
}

#[test]
fn test_when_binds_subject_as_value() {
    let mut doc = Doc::new();
    let subject = doc.int(2);
    let two = doc.int(2);
    let shown = doc.ident("value");
    let print_case = doc.print(vec![shown]);
    let case_two = doc.block(vec![print_case]);
    let matched = doc.when(None, subject, vec![(two, case_two)], None);
    let other = doc.int(9);
    let three = doc.int(3);
    let empty = doc.block(vec![]);
    let shown = doc.ident("value");
    let print_else = doc.print(vec![shown]);
    let unmatched = doc.when(None, other, vec![(three, empty)], Some(print_else));
    let (interp, _) = run(doc, vec![matched, unmatched]);

    assert!(interp.diagnostics().is_empty());
    assert_eq!(interp.output(), "2\n9\n");
    assert!(interp.lookup("value").is_none());
}

#[test]
fn test_when_subject_is_evaluated_once() {
    let mut doc = Doc::new();
    let zero = doc.int(0);
    let decl = doc.var("calls", None, Some(zero));
    let step = increment(&mut doc, "calls");
    let calls = doc.ident("calls");
    let ret = doc.ret(Some(calls));
    let next = doc.function(Some("next"), &[], Some("int"), Some(vec![step, ret]));
    let subject = doc.call("next", vec![]);
    let five = doc.int(5);
    let six = doc.int(6);
    let empty_a = doc.block(vec![]);
    let empty_b = doc.block(vec![]);
    let stmt = doc.when(None, subject, vec![(five, empty_a), (six, empty_b)], None);
    let (interp, _) = run(doc, vec![decl, next, stmt]);

    assert_eq!(lookup_int(&interp, "calls"), 1);
}
