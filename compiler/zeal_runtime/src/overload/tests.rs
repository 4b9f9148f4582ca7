use super::*;
use crate::stdout_handler;
use pretty_assertions::assert_eq;
use zeal_ir::SharedInterner;

fn runtime() -> Runtime {
    Runtime::new(SharedInterner::new(), stdout_handler())
}

fn unit(rt: &mut Runtime, _: &[ObjectId]) -> RuntimeResult<ObjectId> {
    Ok(rt.core().unit_value)
}

// === Matching ===

#[test]
fn test_single_match_resolves() {
    let mut rt = runtime();
    let (int, string) = (rt.core().int, rt.core().string);
    let f_int = rt.new_native("f", Some(vec![int]), int, unit);
    let f_str = rt.new_native("f", Some(vec![string]), int, unit);
    let group = rt.new_overload_group(Some(rt.intern("f")), vec![f_int, f_str], None);

    assert_eq!(rt.resolve_overload(group, &[string]), Ok(f_str));
    assert_eq!(rt.resolve_overload(group, &[int]), Ok(f_int));
}

#[test]
fn test_arity_must_match_exactly() {
    let mut rt = runtime();
    let int = rt.core().int;
    let unary = rt.new_native("f", Some(vec![int]), int, unit);
    let binary = rt.new_native("f", Some(vec![int, int]), int, unit);
    let group = rt.new_overload_group(Some(rt.intern("f")), vec![unary, binary], None);

    assert_eq!(rt.resolve_overload(group, &[int, int]), Ok(binary));
}

#[test]
fn test_no_match_is_error() {
    let mut rt = runtime();
    let (int, float) = (rt.core().int, rt.core().float);
    let f = rt.new_native("f", Some(vec![int]), int, unit);
    let group = rt.new_overload_group(Some(rt.intern("f")), vec![f], None);

    assert_eq!(
        rt.resolve_overload(group, &[float]),
        Err(RuntimeError::NoMatchingOverload {
            name: "f".to_owned(),
            arguments: "float".to_owned(),
        })
    );
}

#[test]
fn test_two_matches_are_ambiguous() {
    let mut rt = runtime();
    let (int, any) = (rt.core().int, rt.core().any);
    let exact = rt.new_native("f", Some(vec![int]), int, unit);
    let loose = rt.new_native("f", Some(vec![any]), int, unit);
    let group = rt.new_overload_group(Some(rt.intern("f")), vec![exact, loose], None);

    assert!(matches!(
        rt.resolve_overload(group, &[int]),
        Err(RuntimeError::AmbiguousOverload { count: 2, .. })
    ));
}

// === Parent groups ===

#[test]
fn test_parent_consulted_only_without_local_match() {
    let mut rt = runtime();
    let (int, string) = (rt.core().int, rt.core().string);
    let name = rt.intern("f");
    let outer_int = rt.new_native("f", Some(vec![int]), int, unit);
    let outer_str = rt.new_native("f", Some(vec![string]), int, unit);
    let outer = rt.new_overload_group(Some(name), vec![outer_int, outer_str], None);
    let inner_int = rt.new_native("f", Some(vec![int]), int, unit);
    let inner = rt.new_overload_group(Some(name), vec![inner_int], Some(outer));

    // Local match wins, no ambiguity with the outer `f(int)`.
    assert_eq!(rt.resolve_overload(inner, &[int]), Ok(inner_int));
    // No local match: the parent answers alone.
    assert_eq!(rt.resolve_overload(inner, &[string]), Ok(outer_str));
}

#[test]
fn test_group_type_is_union_of_overloads() {
    let mut rt = runtime();
    let int = rt.core().int;
    let f = rt.new_native("f", Some(vec![int]), int, unit);
    let group = rt.new_overload_group(Some(rt.intern("f")), vec![f], None);
    let ty = rt.runtime_type(group);

    assert_eq!(rt.type_name(ty), "fun(int) -> int");
    assert_eq!(rt.type_application(ty, &[int]), Ok(int));
}
