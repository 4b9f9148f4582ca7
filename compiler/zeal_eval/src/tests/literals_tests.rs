//! Literals, tuples, unions and name resolution.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use zeal_diagnostic::ErrorCode;
use zeal_runtime::Object;

use super::{error_codes, int_of, run, Doc};

// === Literals ===

#[test]
fn test_decimal_literal_is_int() {
    let mut doc = Doc::new();
    let forty_two = doc.decimal("42");
    let (interp, value) = run(doc, vec![forty_two]);
    assert_eq!(int_of(&interp, value), 42);
    assert!(interp.diagnostics().is_empty());
}

#[test]
fn test_keywords_are_singletons() {
    let mut doc = Doc::new();
    let t = doc.keyword("true");
    let f = doc.keyword("false");
    let n = doc.keyword("null");
    let tuple = doc.tuple(vec![t, f, n]);
    let (interp, value) = run(doc, vec![tuple]);

    let core = interp.runtime().core();
    let Object::Tuple(items) = interp.runtime().object(value) else {
        panic!("expected a tuple");
    };
    assert_eq!(
        items.items,
        vec![core.true_value, core.false_value, core.null_value]
    );
    assert_ne!(core.true_value, core.false_value);
}

#[test]
fn test_only_null_is_a_null_instance() {
    let mut doc = Doc::new();
    let n = doc.keyword("null");
    let (mut interp, value) = run(doc, vec![n]);
    let rt = interp.runtime_mut();
    let null_type = rt.core().null;
    let zero = rt.int(0);
    let unit = rt.core().unit_value;

    assert!(rt.is_instance(value, null_type));
    assert!(!rt.is_instance(zero, null_type));
    assert!(!rt.is_instance(unit, null_type));
}

#[test]
fn test_real_and_string_literals() {
    let mut doc = Doc::new();
    let real = doc.real("2.5");
    let text = doc.string("hi");
    let tuple = doc.tuple(vec![real, text]);
    let (interp, value) = run(doc, vec![tuple]);
    assert_eq!(interp.runtime().display(value), "(2.5, hi)");
}

#[test]
fn test_malformed_literal_is_reported() {
    let mut doc = Doc::new();
    let bad = doc.decimal("4x2");
    let (interp, value) = run(doc, vec![bad]);
    assert_eq!(error_codes(&interp), vec![ErrorCode::E2013]);
    assert_eq!(value, interp.runtime().core().null_value);
}

// === Tuples and unions ===

#[test]
fn test_tuple_of_types_is_a_tuple_type() {
    let mut doc = Doc::new();
    let int = doc.ident("int");
    let string = doc.ident("string");
    let tuple = doc.tuple(vec![int, string]);
    let (interp, value) = run(doc, vec![tuple]);
    assert!(interp.runtime().is_type(value));
    assert_eq!(interp.runtime().type_name(value), "(int, string)");
}

#[test]
fn test_union_requires_types() {
    let mut doc = Doc::new();
    let int = doc.ident("int");
    let one = doc.int(1);
    let union = doc.union(vec![int, one]);
    let (interp, _) = run(doc, vec![union]);
    assert_eq!(error_codes(&interp), vec![ErrorCode::E2010]);
}

// === Names ===

#[test]
fn test_unknown_name_is_reported_and_siblings_run() {
    let mut doc = Doc::new();
    let missing = doc.ident("missing");
    let hello = doc.string("hello");
    let print = doc.print(vec![hello]);
    let (interp, _) = run(doc, vec![missing, print]);

    assert_eq!(error_codes(&interp), vec![ErrorCode::E1001]);
    assert_eq!(interp.output(), "hello\n");
}

#[test]
fn test_unhandled_node_is_reported() {
    let mut doc = Doc::new();
    let node = doc.unhandled("lambda");
    let (interp, _) = run(doc, vec![node]);
    let diagnostic = interp.diagnostics().iter().next().unwrap();
    assert_eq!(diagnostic.code, ErrorCode::E9002);
    assert_eq!(diagnostic.message, "no evaluation rule for lambda");
    assert_eq!(diagnostic.node, Some(node));
}
