#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::{stdout_handler, Object, Runtime, RuntimeError};
use pretty_assertions::assert_eq;
use zeal_ir::SharedInterner;

fn runtime() -> Runtime {
    Runtime::new(SharedInterner::new(), stdout_handler())
}

#[test]
fn test_module_member_reads_module_scope_only() {
    let mut rt = runtime();
    let outer = rt.new_scope(None);
    let inner = rt.new_scope(Some(outer));
    let (answer, hidden) = (rt.intern("answer"), rt.intern("hidden"));
    let (one, two) = (rt.int(1), rt.int(2));
    rt.define(inner, answer, one).unwrap();
    rt.define(outer, hidden, two).unwrap();
    let name = rt.intern("m");
    let module = rt.new_module(name, inner);

    assert_eq!(rt.get_member(module, answer), Ok(one));
    assert_eq!(
        rt.get_member(module, hidden),
        Err(RuntimeError::UnknownMember {
            member: "hidden".to_owned(),
            ty: "<module m>".to_owned(),
        })
    );
}

#[test]
fn test_native_values_have_no_members() {
    let mut rt = runtime();
    let five = rt.int(5);
    let name = rt.intern("size");
    assert_eq!(
        rt.get_member(five, name),
        Err(RuntimeError::UnknownMember {
            member: "size".to_owned(),
            ty: "int".to_owned(),
        })
    );
}

#[test]
fn test_type_class_member_is_a_dispatcher() {
    let mut rt = runtime();
    let global = rt.new_scope(None);
    let (eq_name, tc_name) = (rt.intern("equals"), rt.intern("Eq"));
    let tc = rt.new_type_class(tc_name, global);
    let scope = rt.type_class_scope(tc).unwrap();
    let member = rt.new_function(Some(eq_name), None, scope, None);
    rt.define(scope, eq_name, member).unwrap();

    let dispatcher = rt.get_member(tc, eq_name).unwrap();
    assert!(matches!(rt.object(dispatcher), Object::TypeClassMethod(m) if m.type_class == tc));
}
