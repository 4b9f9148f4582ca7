#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::buffer_handler;
use pretty_assertions::assert_eq;
use zeal_ir::SharedInterner;

fn prelude() -> (Runtime, ScopeId) {
    let mut rt = Runtime::new(SharedInterner::new(), buffer_handler());
    let global = rt.new_scope(None);
    install(&mut rt, global).unwrap();
    (rt, global)
}

/// Resolve `name` for the argument values and call the native directly.
fn call(rt: &mut Runtime, global: ScopeId, name: &str, args: &[ObjectId]) -> RuntimeResult<ObjectId> {
    let name = rt.intern(name);
    let callee = rt.get_name(global, name)?;
    let types: Vec<ObjectId> = args.iter().map(|&a| rt.runtime_type(a)).collect();
    let target = match rt.object(callee) {
        Object::OverloadGroup(_) => rt.resolve_overload(callee, &types)?,
        _ => callee,
    };
    let Object::NativeFunction(native) = rt.object(target) else {
        panic!("expected a native function");
    };
    let func = native.func;
    func(rt, args)
}

// === Bindings ===

#[test]
fn test_core_types_are_owned_members() {
    let (rt, global) = prelude();
    let int = rt.intern("int");
    assert_eq!(rt.get_name(global, int), Ok(rt.core().int));
    assert!(rt.scope(global).is_member(int));
}

#[test]
fn test_arithmetic_names_are_overload_groups() {
    let (rt, global) = prelude();
    let add = rt.intern("add");
    let group = rt.get_name(global, add).unwrap();
    assert_eq!(rt.overload_group(group).map(|g| g.overloads.len()), Some(3));
}

// === Arithmetic ===

#[test]
fn test_add_dispatches_on_argument_types() {
    let (mut rt, global) = prelude();
    let (two, three) = (rt.int(2), rt.int(3));
    let (a, b) = (rt.string("ab"), rt.string("cd"));
    let (x, y) = (rt.float(1.5), rt.float(2.0));

    let sum = call(&mut rt, global, "add", &[two, three]).unwrap();
    let joined = call(&mut rt, global, "add", &[a, b]).unwrap();
    let real = call(&mut rt, global, "add", &[x, y]).unwrap();
    assert_eq!(rt.display(sum), "5");
    assert_eq!(rt.display(joined), "abcd");
    assert_eq!(rt.display(real), "3.5");
}

#[test]
fn test_integer_overflow_is_error() {
    let (mut rt, global) = prelude();
    let (max, one) = (rt.int(i64::MAX), rt.int(1));
    assert_eq!(
        call(&mut rt, global, "add", &[max, one]),
        Err(RuntimeError::IntegerOverflow { operation: "add" })
    );
}

#[test]
fn test_integer_division_by_zero_is_error() {
    let (mut rt, global) = prelude();
    let (one, zero) = (rt.int(1), rt.int(0));
    assert_eq!(
        call(&mut rt, global, "div", &[one, zero]),
        Err(RuntimeError::DivisionByZero)
    );
}

#[test]
fn test_mixed_arithmetic_has_no_overload() {
    let (mut rt, global) = prelude();
    let (one, half) = (rt.int(1), rt.float(0.5));
    assert!(matches!(
        call(&mut rt, global, "add", &[one, half]),
        Err(RuntimeError::NoMatchingOverload { .. })
    ));
}

#[test]
fn test_comparisons() {
    let (mut rt, global) = prelude();
    let (one, two) = (rt.int(1), rt.int(2));
    assert_eq!(call(&mut rt, global, "lt", &[one, two]), Ok(rt.core().true_value));
    assert_eq!(call(&mut rt, global, "gt", &[one, two]), Ok(rt.core().false_value));
    assert_eq!(call(&mut rt, global, "eq", &[one, one]), Ok(rt.core().true_value));
}

// === Reflection and output ===

#[test]
fn test_print_joins_with_spaces() {
    let (mut rt, global) = prelude();
    let (text, number) = (rt.string("answer:"), rt.int(42));
    let result = call(&mut rt, global, "print", &[text, number]).unwrap();

    assert_eq!(result, rt.core().unit_value);
    assert_eq!(rt.print_handler().output(), "answer: 42\n");
}

#[test]
fn test_type_of_and_is_instance() {
    let (mut rt, global) = prelude();
    let five = rt.int(5);
    let int = rt.core().int;
    assert_eq!(call(&mut rt, global, "type_of", &[five]), Ok(int));
    assert_eq!(
        call(&mut rt, global, "is_instance", &[five, int]),
        Ok(rt.core().true_value)
    );
}

#[test]
fn test_nullable_builds_nullable_type() {
    let (mut rt, global) = prelude();
    let int = rt.core().int;
    let ty = call(&mut rt, global, "nullable", &[int]).unwrap();
    assert_eq!(rt.type_name(ty), "int?");
    assert!(rt.assignable(rt.core().null, ty));
}

#[test]
fn test_getattr_and_setattr_go_through_members() {
    let (mut rt, global) = prelude();
    let counter_name = rt.intern("Counter");
    let counter = rt.new_class(Some(counter_name), None, global).unwrap();
    let count = rt.intern("count");
    let zero = rt.int(0);
    let variable = rt.new_variable(count, rt.core().int, zero);
    rt.class_define(counter, count, variable, false).unwrap();
    let instance = rt.new_instance(counter).unwrap();
    let (field, nine) = (rt.string("count"), rt.int(9));

    call(&mut rt, global, "setattr", &[instance, field, nine]).unwrap();
    assert_eq!(call(&mut rt, global, "getattr", &[instance, field]), Ok(nine));
}
